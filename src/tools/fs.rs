//! Filesystem tools: read, list, write, mkdir, delete.
//!
//! Result strings are stable — the model reads them verbatim, and the
//! delete flow reports refusal as a normal outcome rather than an error.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::confirm::ConfirmationPolicy;
use super::Tool;

/// Read the full text content of a file.
pub struct ReadFile;

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file from the local filesystem"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file path to read"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;

        if !Path::new(path).exists() {
            return Ok(format!("Error: File not found at {}", path));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to read file {}: {}", path, e))?;
        Ok(content)
    }
}

/// List a directory, directories first, each group sorted.
pub struct ListDirectory;

#[async_trait]
impl Tool for ListDirectory {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List files and directories in a given path"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory path to list (default: current directory)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let path = args["path"].as_str().unwrap_or(".");

        if !Path::new(path).exists() {
            return Ok(format!("Error: Directory not found at {}", path));
        }

        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to list directory {}: {}", path, e))?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read entry in {}: {}", path, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks, like the directory listing a shell would show.
            match tokio::fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_dir() => dirs.push(format!("[DIR]  {}", name)),
                Ok(meta) if meta.is_file() => files.push(format!("[FILE] {}", name)),
                _ => {}
            }
        }

        dirs.sort();
        files.sort();
        dirs.extend(files);

        Ok(format!("Contents of {}:\n{}", path, dirs.join("\n")))
    }
}

/// Create or overwrite a file with the given content.
pub struct WriteFile;

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file path to write to"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;
        let content = args["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'content' argument"))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path, e))?;

        Ok(format!("Successfully wrote to {}", path))
    }
}

/// Create a directory, including missing parents. Idempotent.
pub struct CreateDirectory;

#[async_trait]
impl Tool for CreateDirectory {
    fn name(&self) -> &str {
        "create_directory"
    }

    fn description(&self) -> &str {
        "Create a new directory at the specified path"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory path to create"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;

        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create directory {}: {}", path, e))?;

        Ok(format!("Successfully created directory at {}", path))
    }
}

/// Delete a file, gated by the confirmation policy.
pub struct DeleteFile {
    confirm: Arc<dyn ConfirmationPolicy>,
}

impl DeleteFile {
    pub fn new(confirm: Arc<dyn ConfirmationPolicy>) -> Self {
        Self { confirm }
    }
}

#[async_trait]
impl Tool for DeleteFile {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a file at the specified path. This is a destructive operation that requires user confirmation before execution."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file path to delete"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;

        if !Path::new(path).exists() {
            return Ok(format!("Error: File not found at {}", path));
        }

        // No filesystem mutation happens before this answer arrives.
        if !self.confirm.confirm(path) {
            return Ok("Operation cancelled: File deletion aborted by user".to_string());
        }

        tokio::fs::remove_file(path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to delete {}: {}", path, e))?;

        Ok(format!("Successfully deleted file at {}", path))
    }
}
