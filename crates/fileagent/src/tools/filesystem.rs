use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, MAIN_SEPARATOR};

use super::arguments::{MoveFileArgs, PathArgs, WriteFileArgs};
use super::error::{ToolError, ToolResult};
use super::ToolOutput;
use crate::text::clean_newlines;

/// Split a full path into its directory and file name.
///
/// Returns None for a bare file name, a trailing separator, or a path with no file name.
fn split_path(full_path: &str) -> Option<(&Path, String)> {
    if full_path.ends_with('/') || full_path.ends_with(MAIN_SEPARATOR) {
        return None;
    }
    let path = Path::new(full_path);
    let name = path.file_name()?.to_string_lossy().into_owned();
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty())?;
    Some((dir, name))
}

fn dir_and_name(full_path: &str) -> (&Path, String) {
    let path = Path::new(full_path);
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, name)
}

/// Create an empty file; the directory must exist and the file must not
pub fn create_file(args: &PathArgs) -> ToolResult<ToolOutput> {
    let (dir, name) = split_path(&args.path).ok_or(ToolError::MissingPathOrFilename)?;
    let dir_display = dir.display().to_string();
    if !dir.is_dir() {
        return Err(ToolError::PathNotFound(dir_display));
    }

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dir.join(&name))
    {
        Ok(_) => Ok(ToolOutput::FileCreated {
            name,
            dir: dir_display,
        }),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(ToolError::FileExists {
            name,
            dir: dir_display,
        }),
        Err(e) => Err(ToolError::io("Failed to create file", e)),
    }
}

/// Overwrite a file with the given content, unescaping `\n` sequences first
pub fn write_file(args: &WriteFileArgs) -> ToolResult<ToolOutput> {
    let (dir, name) = dir_and_name(&args.path);
    let dir_display = dir.display().to_string();
    if !dir.is_dir() {
        return Err(ToolError::PathNotFound(dir_display));
    }

    let content = clean_newlines(&args.content);
    fs::write(&args.path, content).map_err(|e| ToolError::io("Failed to write to file", e))?;

    Ok(ToolOutput::FileWritten {
        name,
        dir: dir_display,
    })
}

pub fn delete_file(args: &PathArgs) -> ToolResult<ToolOutput> {
    let path = Path::new(&args.path);
    if !path.is_file() {
        return Err(ToolError::FileNotFound);
    }
    fs::remove_file(path).map_err(|e| ToolError::io("Failed to delete file", e))?;
    Ok(ToolOutput::FileDeleted {
        path: args.path.clone(),
    })
}

/// Create a directory and any missing parents
pub fn create_dir(args: &PathArgs) -> ToolResult<ToolOutput> {
    let path = Path::new(&args.path);
    if path.exists() {
        return Err(ToolError::DirectoryExists);
    }
    if args.path.is_empty() {
        // create_dir_all treats the empty path as already present
        return Err(ToolError::io(
            "Error creating directory",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| ToolError::io("Error creating directory", e))?;
    Ok(ToolOutput::DirectoryCreated {
        path: args.path.clone(),
    })
}

/// Remove a directory and everything below it
pub fn delete_dir(args: &PathArgs) -> ToolResult<ToolOutput> {
    let path = Path::new(&args.path);
    if !path.is_dir() {
        return Err(ToolError::DirectoryNotFound);
    }
    fs::remove_dir_all(path).map_err(|e| ToolError::io("Error deleting directory", e))?;
    Ok(ToolOutput::DirectoryDeleted {
        path: args.path.clone(),
    })
}

/// Move a file.
///
/// A destination that is an existing directory receives the file under its own name;
/// any other existing destination file is overwritten.
pub fn move_file(args: &MoveFileArgs) -> ToolResult<ToolOutput> {
    let source = Path::new(&args.source);
    if !source.is_file() {
        return Err(ToolError::SourceNotFound);
    }

    let destination = Path::new(&args.destination);
    let target = if destination.is_dir() {
        let name = source.file_name().ok_or(ToolError::SourceNotFound)?;
        let target = destination.join(name);
        if target.exists() {
            return Err(ToolError::DestinationExists(target.display().to_string()));
        }
        target
    } else {
        destination.to_path_buf()
    };

    relocate(source, &target).map_err(|e| ToolError::io("Failed to move file", e))?;

    Ok(ToolOutput::FileMoved {
        from: args.source.clone(),
        to: args.destination.clone(),
    })
}

fn relocate(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            // rename cannot cross filesystems, so fall back to copy and remove
            if fs::copy(source, target).is_err() {
                return Err(rename_err);
            }
            fs::remove_file(source)
        }
    }
}
