//! Friendly liveness check.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::HelpEntry;
use elitebgs_client::EbgsApi;

use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

pub struct Hi;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for Hi {
    fn name(&self) -> &'static str {
        "hi"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "hi",
            description: "Say hi to the bot",
            template: "hi",
            examples: &["`@BGSBot hi`"],
        }
    }

    async fn exec(&self, ctx: &CommandContext<'_, S, A>, _args: &str) -> Result<()> {
        ctx.sink.send_text("Hey there! o7").await
    }
}
