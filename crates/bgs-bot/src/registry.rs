//! Command registry and message dispatcher.

#[path = "registry_tests.rs"]
mod registry_tests;

use std::collections::HashMap;

use anyhow::Result;
use bgs_types::{HelpEntry, ResponseKind};
use elitebgs_client::EbgsApi;
use tracing::info;

use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

/// Named commands, keyed by lowercase name.
pub struct CommandRegistry<S, A> {
    commands: HashMap<String, Box<dyn Command<S, A>>>,
}

impl<S: GuildStore, A: EbgsApi> CommandRegistry<S, A> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Store `command` under its lowercased name. Duplicate registration
    /// overwrites silently; last write wins.
    pub fn register(&mut self, command: Box<dyn Command<S, A>>) {
        self.commands.insert(command.name().to_lowercase(), command);
    }

    /// Help metadata of every registered command.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.commands.values().map(|command| command.help()).collect()
    }

    /// Resolve and run the command named by the first token of `raw`.
    ///
    /// The bot mention is stripped and whitespace collapsed first. An empty
    /// message or an unregistered name gets the not-a-command response;
    /// everything after the name is rejoined single-spaced and handed to
    /// the command.
    pub async fn dispatch(
        &self,
        ctx: &CommandContext<'_, S, A>,
        raw: &str,
        bot_user_id: u64,
    ) -> Result<()> {
        let text = strip_mention(raw, bot_user_id);
        let mut tokens = text.split(' ').filter(|token| !token.is_empty());

        let Some(first) = tokens.next() else {
            ctx.sink.send_text(ResponseKind::NotACommand.text()).await?;
            return Ok(());
        };
        let name = first.to_lowercase();
        let Some(command) = self.commands.get(&name) else {
            ctx.sink.send_text(ResponseKind::NotACommand.text()).await?;
            return Ok(());
        };

        info!("{} command requested", name);
        let arguments = tokens.collect::<Vec<_>>().join(" ");
        command.exec(ctx, &arguments).await
    }
}

impl<S: GuildStore, A: EbgsApi> Default for CommandRegistry<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the first mention of the bot (`<@id>` or `<@!id>`) from
/// `content`, then collapse runs of whitespace and trim.
pub fn strip_mention(content: &str, bot_user_id: u64) -> String {
    let mut text = content.to_string();
    for pattern in [
        format!("<@!{}>", bot_user_id),
        format!("<@{}>", bot_user_id),
    ] {
        if let Some(position) = text.find(&pattern) {
            text.replace_range(position..position + pattern.len(), "");
            break;
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
