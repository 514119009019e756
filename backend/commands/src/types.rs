//! Chat command types.
use serde::{Deserialize, Serialize};

/// A chat command entry in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique key (e.g. "help").
    pub key: String,
    pub description: String,
    /// Literal message bodies that trigger the command (e.g. "!help", "/help").
    pub text_aliases: Vec<String>,
}

/// A detected command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    pub raw_alias: String,
}
