//! Command detection: identify chat commands in inbound messages.
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Detect a command in a message body.
///
/// The whole body must equal an alias: no trimming, no arguments, no case
/// folding. `"!help please"` and `" !help"` are ordinary messages.
pub fn detect_command(text: &str, registry: &CommandRegistry) -> Option<CommandInvocation> {
    let def = registry.find_by_alias(text)?;
    Some(CommandInvocation {
        key: def.key.clone(),
        raw_alias: text.to_string(),
    })
}
