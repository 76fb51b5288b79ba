//! Structured argument records for each tool.
//!
//! Models are given a JSON schema with explicit fields, but older prompts (and some models)
//! still send a single string with two fields joined by `|||`. Both forms decode here.
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::{ToolError, ToolResult};

pub const DELIMITER: &str = "|||";

pub const WRITE_FILE_FORMAT: &str = "<full_path>|||<content>";
pub const MOVE_FILE_FORMAT: &str = "<source_path>|||<destination_path>";
pub const TERMINAL_FORMAT: &str = "<path>|||<command>";

pub trait ToolArgs: DeserializeOwned {
    /// Build the record from the single-string form
    fn from_legacy(input: &str) -> ToolResult<Self>;

    fn decode(arguments: &Value) -> ToolResult<Self> {
        if let Some(input) = legacy_input(arguments) {
            return Self::from_legacy(input);
        }
        serde_json::from_value(arguments.clone())
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))
    }
}

/// A bare string, or an object whose only field is the string `input` (or `__arg1`)
fn legacy_input(arguments: &Value) -> Option<&str> {
    match arguments {
        Value::String(s) => Some(s),
        Value::Object(map) if map.len() == 1 => map
            .get("input")
            .or_else(|| map.get("__arg1"))
            .and_then(Value::as_str),
        _ => None,
    }
}

/// Split on the first delimiter only, so the second field may itself contain `|||`
fn split_fields<'a>(input: &'a str, format: &'static str) -> ToolResult<(&'a str, &'a str)> {
    input
        .split_once(DELIMITER)
        .ok_or(ToolError::InvalidFormat(format))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathArgs {
    pub path: String,
}

impl ToolArgs for PathArgs {
    fn from_legacy(input: &str) -> ToolResult<Self> {
        Ok(Self {
            path: input.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WriteFileArgs {
    pub path: String,
    pub content: String,
}

impl ToolArgs for WriteFileArgs {
    fn from_legacy(input: &str) -> ToolResult<Self> {
        let (path, content) = split_fields(input, WRITE_FILE_FORMAT)?;
        Ok(Self {
            path: path.trim().to_string(),
            content: content.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveFileArgs {
    pub source: String,
    pub destination: String,
}

impl ToolArgs for MoveFileArgs {
    fn from_legacy(input: &str) -> ToolResult<Self> {
        let (source, destination) = split_fields(input, MOVE_FILE_FORMAT)?;
        Ok(Self {
            source: source.trim().to_string(),
            destination: destination.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerminalArgs {
    pub directory: String,
    pub command: String,
}

impl ToolArgs for TerminalArgs {
    fn from_legacy(input: &str) -> ToolResult<Self> {
        let (directory, command) = split_fields(input, TERMINAL_FORMAT)?;
        Ok(Self {
            directory: directory.trim().to_string(),
            command: command.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateTextArgs {
    pub prompt: String,
}

impl ToolArgs for GenerateTextArgs {
    fn from_legacy(input: &str) -> ToolResult<Self> {
        Ok(Self {
            prompt: input.to_string(),
        })
    }
}
