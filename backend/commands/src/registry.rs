//! Chat command registry.
use crate::types::CommandDef;

/// Reply sent for the help command.
pub const HELP_TEXT: &str = "🤖 *Social Media Downloader Bot*\n\n*Commands:*\n• Send YouTube link to download\n• !help - Show help\n\n*Note:* Currently supports YouTube only";

/// Build the built-in command registry.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![CommandDef {
        key: "help".into(),
        description: "Show help.".into(),
        text_aliases: vec!["!help".into(), "/help".into()],
    }]
}

pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    /// Find a command whose alias equals `alias` byte for byte.
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandDef> {
        self.commands
            .iter()
            .find(|c| c.text_aliases.iter().any(|a| a == alias))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
