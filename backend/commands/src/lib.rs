pub mod detection;
pub mod dispatch;
pub mod registry;
pub mod types;

pub use detection::detect_command;
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler, CommandResponse, HelpHandler};
pub use registry::{builtin_commands, CommandRegistry, HELP_TEXT};
pub use types::{CommandDef, CommandInvocation};

use std::sync::Arc;

/// Build a dispatcher pre-wired with all built-in handlers.
pub fn build_default_dispatcher() -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register("help", Arc::new(HelpHandler));
    dispatcher
}
