//! Renders one embed listing every registered command.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::{EmbedField, EmbedPage, HelpEntry, EMBED_COLOR};
use chrono::Utc;
use elitebgs_client::EbgsApi;

use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

pub struct Help {
    entries: Vec<HelpEntry>,
}

impl Help {
    /// `entries` is gathered from the registry at build time, so the
    /// listing always matches what is actually registered.
    pub fn new(entries: Vec<HelpEntry>) -> Self {
        Self { entries }
    }

    pub fn entry() -> HelpEntry {
        HelpEntry {
            command: "help",
            description: "Lists every command with its usage",
            template: "help",
            examples: &["`@BGSBot help`"],
        }
    }
}

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn help(&self) -> HelpEntry {
        Self::entry()
    }

    async fn exec(&self, ctx: &CommandContext<'_, S, A>, _args: &str) -> Result<()> {
        let fields = self
            .entries
            .iter()
            .map(|entry| {
                let mut value = format!("{}\nUsage: `{}`", entry.description, entry.template);
                for example in entry.examples {
                    value.push('\n');
                    value.push_str(example);
                }
                EmbedField::new(entry.command, value)
            })
            .collect();
        let page = EmbedPage {
            title: "Commands".to_string(),
            color: EMBED_COLOR,
            fields,
            timestamp: Utc::now(),
        };
        ctx.sink.send_embed(&page).await
    }
}
