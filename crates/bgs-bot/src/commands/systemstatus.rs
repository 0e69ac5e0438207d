//! Paginated report card for one system.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::{HelpEntry, ResponseKind};
use elitebgs_client::EbgsApi;

use crate::access::{has_access, AccessCategory};
use crate::commands::{Command, CommandContext};
use crate::report;
use crate::sink::ReplySink;
use crate::store::GuildStore;

pub struct SystemStatus;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for SystemStatus {
    fn name(&self) -> &'static str {
        "systemstatus"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "systemstatus",
            description: "Gets the details of a system",
            template: "systemstatus get <system name>",
            examples: &["`@BGSBot systemstatus get qa'wakana`"],
        }
    }

    async fn exec(&self, ctx: &CommandContext<'_, S, A>, args: &str) -> Result<()> {
        let tokens: Vec<&str> = args.split(' ').filter(|t| !t.is_empty()).collect();
        let Some(verb) = tokens.first() else {
            ctx.sink.send_text(ResponseKind::NoParams.text()).await?;
            return Ok(());
        };
        match verb.to_lowercase().as_str() {
            "get" => {
                let required = [
                    AccessCategory::Admin,
                    AccessCategory::Bgs,
                    AccessCategory::Forbidden,
                ];
                if !has_access(ctx.store, &ctx.invoker, &required).await {
                    ctx.sink
                        .send_text(ResponseKind::InsufficientPerms.text())
                        .await?;
                    return Ok(());
                }
                if tokens.len() < 2 {
                    ctx.sink.send_text(ResponseKind::NoParams.text()).await?;
                    return Ok(());
                }
                let system_name = tokens[1..].join(" ");
                report::system_status(ctx, &system_name).await
            }
            _ => {
                ctx.sink.send_text(ResponseKind::NotACommand.text()).await?;
                Ok(())
            }
        }
    }
}
