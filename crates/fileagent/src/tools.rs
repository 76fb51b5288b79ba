pub mod arguments;
pub mod error;
pub mod filesystem;
pub mod generate;
pub mod terminal;

use std::fmt;

use serde_json::{json, Value};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::models::tool::Tool;
use crate::providers::base::Provider;
use arguments::{GenerateTextArgs, MoveFileArgs, PathArgs, TerminalArgs, ToolArgs, WriteFileArgs};
pub use error::{ToolError, ToolResult};

/// The fixed set of tools the agent can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToolKind {
    CreateFile,
    WriteFile,
    DeleteFile,
    CreateDir,
    DeleteDir,
    MoveFile,
    TerminalTool,
    GenerateText,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::CreateFile => "Create an empty file at a full path. Fails if the file exists.",
            ToolKind::WriteFile => {
                "Write content to a file at a full path, replacing what was there. \
                 A literal \\n in the content becomes a line break."
            }
            ToolKind::DeleteFile => "Delete a file by full path.",
            ToolKind::CreateDir => "Create a directory by full path, including missing parents.",
            ToolKind::DeleteDir => "Delete a directory by full path, with everything inside it.",
            ToolKind::MoveFile => {
                "Move a file. If the destination is an existing directory the file keeps its name."
            }
            ToolKind::TerminalTool => {
                "Run a terminal command in a given directory and return its combined output."
            }
            ToolKind::GenerateText => {
                "Generate text based on a given prompt like poem, code, or explanation."
            }
        }
    }

    pub fn input_schema(self) -> Value {
        match self {
            ToolKind::CreateFile | ToolKind::DeleteFile => path_schema("Full path of the file."),
            ToolKind::CreateDir | ToolKind::DeleteDir => {
                path_schema("Full path of the directory.")
            }
            ToolKind::WriteFile => json!({
                "type": "object",
                "required": ["path", "content"],
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Full path of the file to write."
                    },
                    "content": {
                        "type": "string",
                        "description": "The text to write."
                    }
                }
            }),
            ToolKind::MoveFile => json!({
                "type": "object",
                "required": ["source", "destination"],
                "properties": {
                    "source": {
                        "type": "string",
                        "description": "Full path of the file to move."
                    },
                    "destination": {
                        "type": "string",
                        "description": "Target file path or existing directory."
                    }
                }
            }),
            ToolKind::TerminalTool => json!({
                "type": "object",
                "required": ["directory", "command"],
                "properties": {
                    "directory": {
                        "type": "string",
                        "description": "Directory to run the command in."
                    },
                    "command": {
                        "type": "string",
                        "description": "The shell command to run."
                    }
                }
            }),
            ToolKind::GenerateText => json!({
                "type": "object",
                "required": ["prompt"],
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "What to write."
                    }
                }
            }),
        }
    }

    pub fn tool(self) -> Tool {
        Tool::new(self.name(), self.description(), self.input_schema())
    }

    /// Decode the arguments for this tool and run it
    pub async fn invoke(self, arguments: &Value, provider: &dyn Provider) -> ToolResult<ToolOutput> {
        match self {
            ToolKind::CreateFile => filesystem::create_file(&PathArgs::decode(arguments)?),
            ToolKind::WriteFile => filesystem::write_file(&WriteFileArgs::decode(arguments)?),
            ToolKind::DeleteFile => filesystem::delete_file(&PathArgs::decode(arguments)?),
            ToolKind::CreateDir => filesystem::create_dir(&PathArgs::decode(arguments)?),
            ToolKind::DeleteDir => filesystem::delete_dir(&PathArgs::decode(arguments)?),
            ToolKind::MoveFile => filesystem::move_file(&MoveFileArgs::decode(arguments)?),
            ToolKind::TerminalTool => terminal::terminal_tool(&TerminalArgs::decode(arguments)?),
            ToolKind::GenerateText => {
                generate::generate_text(&GenerateTextArgs::decode(arguments)?, provider).await
            }
        }
    }
}

fn path_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "required": ["path"],
        "properties": {
            "path": {
                "type": "string",
                "description": description
            }
        }
    })
}

/// What a tool did. Display text is the observation handed back to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    FileCreated { name: String, dir: String },
    FileWritten { name: String, dir: String },
    FileDeleted { path: String },
    DirectoryCreated { path: String },
    DirectoryDeleted { path: String },
    FileMoved { from: String, to: String },
    CommandOutput(String),
    Generated(String),
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::FileCreated { name, dir } => write!(f, "File '{name}' created at {dir}"),
            ToolOutput::FileWritten { name, dir } => {
                write!(f, "Wrote content to '{name}' in {dir}")
            }
            ToolOutput::FileDeleted { path } => write!(f, "Deleted file at {path}"),
            ToolOutput::DirectoryCreated { path } => write!(f, "Directory created at {path}"),
            ToolOutput::DirectoryDeleted { path } => write!(f, "Deleted directory {path}"),
            ToolOutput::FileMoved { from, to } => write!(f, "Moved file from {from} to {to}"),
            ToolOutput::CommandOutput(text) | ToolOutput::Generated(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use tempfile::TempDir;

    #[test]
    fn test_names_are_snake_case() {
        let names: Vec<&str> = ToolKind::iter().map(ToolKind::name).collect();
        assert_eq!(
            names,
            vec![
                "create_file",
                "write_file",
                "delete_file",
                "create_dir",
                "delete_dir",
                "move_file",
                "terminal_tool",
                "generate_text"
            ]
        );
        assert_eq!(ToolKind::from_str("move_file").unwrap(), ToolKind::MoveFile);
        assert!(ToolKind::from_str("rm_rf").is_err());
    }

    #[test]
    fn test_schemas_require_their_fields() {
        for kind in ToolKind::iter() {
            let schema = kind.input_schema();
            let properties = schema["properties"].as_object().unwrap();
            for required in schema["required"].as_array().unwrap() {
                assert!(properties.contains_key(required.as_str().unwrap()));
            }
        }
    }

    #[test]
    fn test_output_display() {
        let output = ToolOutput::FileMoved {
            from: "/a/x".into(),
            to: "/b/x".into(),
        };
        assert_eq!(output.to_string(), "Moved file from /a/x to /b/x");
        assert_eq!(ToolOutput::CommandOutput("hi\n".into()).to_string(), "hi\n");
    }

    #[tokio::test]
    async fn test_invoke_structured_and_legacy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        let provider = MockProvider::new(vec![]);

        let created = ToolKind::CreateFile
            .invoke(&json!({"path": path.to_str().unwrap()}), &provider)
            .await
            .unwrap();
        assert!(matches!(created, ToolOutput::FileCreated { .. }));

        let legacy = format!("{}|||a|||b", path.display());
        ToolKind::WriteFile
            .invoke(&json!(legacy), &provider)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a|||b");
    }

    #[tokio::test]
    async fn test_write_without_content_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("important.txt");
        std::fs::write(&path, "keep me").unwrap();
        let provider = MockProvider::new(vec![]);

        let err = ToolKind::WriteFile
            .invoke(&json!({"path": path.to_str().unwrap()}), &provider)
            .await
            .unwrap_err();
        assert!(err.is_malformed_input());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_invoke_rejects_malformed_arguments() {
        let provider = MockProvider::new(vec![]);
        let err = ToolKind::MoveFile
            .invoke(&json!({"input": "/only/one/path"}), &provider)
            .await
            .unwrap_err();
        assert!(err.is_malformed_input());
        assert_eq!(
            err.to_string(),
            "Invalid input format. Expected: <source_path>|||<destination_path>"
        );
    }
}
