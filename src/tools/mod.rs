//! Tool abstraction and registry.
//!
//! Tools implement the [`Tool`] trait once and are exposed through both the
//! agent loop and the stdio serving surface. The registry is keyed by the
//! closed [`ToolKind`] enum, resolved once at startup, so dispatch is
//! exhaustive instead of falling through a string-keyed default case.

mod confirm;
mod fs;

pub use confirm::{AlwaysConfirm, ConfirmationPolicy, StdinConfirmation};
pub use fs::{CreateDirectory, DeleteFile, ListDirectory, ReadFile, WriteFile};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolSchema;

/// A capability the model can invoke.
///
/// `execute` returns `Err` only for internal failures; the registry converts
/// those into `"Error: ..."` result text at the dispatch boundary, so no
/// tool failure ever escapes as control flow.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// The closed set of tools this agent ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ReadFile,
    ListDirectory,
    WriteFile,
    CreateDirectory,
    DeleteFile,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::ReadFile,
        ToolKind::ListDirectory,
        ToolKind::WriteFile,
        ToolKind::CreateDirectory,
        ToolKind::DeleteFile,
    ];

    /// Resolve a wire-format tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "read_file" => Some(ToolKind::ReadFile),
            "list_directory" => Some(ToolKind::ListDirectory),
            "write_file" => Some(ToolKind::WriteFile),
            "create_directory" => Some(ToolKind::CreateDirectory),
            "delete_file" => Some(ToolKind::DeleteFile),
            _ => None,
        }
    }
}

/// Registry of all available tools, resolved once at startup.
pub struct ToolRegistry {
    read_file: ReadFile,
    list_directory: ListDirectory,
    write_file: WriteFile,
    create_directory: CreateDirectory,
    delete_file: DeleteFile,
}

impl ToolRegistry {
    /// Build the registry, injecting the confirmation policy into the
    /// destructive tool.
    pub fn new(confirm: Arc<dyn ConfirmationPolicy>) -> Self {
        Self {
            read_file: ReadFile,
            list_directory: ListDirectory,
            write_file: WriteFile,
            create_directory: CreateDirectory,
            delete_file: DeleteFile::new(confirm),
        }
    }

    fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::ReadFile => &self.read_file,
            ToolKind::ListDirectory => &self.list_directory,
            ToolKind::WriteFile => &self.write_file,
            ToolKind::CreateDirectory => &self.create_directory,
            ToolKind::DeleteFile => &self.delete_file,
        }
    }

    /// Tool descriptors for the completion request, in catalog order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        ToolKind::ALL
            .iter()
            .map(|&kind| {
                let tool = self.get(kind);
                ToolSchema::function(tool.name(), tool.description(), tool.parameters_schema())
            })
            .collect()
    }

    /// Execute the named tool with decoded arguments.
    ///
    /// Always returns result text: unknown names and executor failures are
    /// reported to the model, never raised.
    pub async fn dispatch(&self, name: &str, args: Value) -> String {
        let Some(kind) = ToolKind::from_name(name) else {
            return format!("Unknown tool: {}", name);
        };

        match self.get(kind).execute(args).await {
            Ok(result) => result,
            Err(e) => format!("Error: {}", e),
        }
    }
}
