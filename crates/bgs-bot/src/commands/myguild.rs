//! Creates, deletes, or shows this guild's record.
//!
//! `set` is the bootstrap verb: until a guild record exists no role check
//! can pass, so it is the one verb with no access gate.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::{EmbedField, EmbedPage, GuildConfig, HelpEntry, ResponseKind, EMBED_COLOR};
use chrono::Utc;
use elitebgs_client::EbgsApi;

use crate::access::{has_access, AccessCategory};
use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

const GUILD_NOT_SET: &str = "Your guild is not set yet";

pub struct MyGuild;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for MyGuild {
    fn name(&self) -> &'static str {
        "myguild"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "myguild",
            description: "Sets, removes or shows the guild record everything else hangs off",
            template: "myguild <set|remove|show>",
            examples: &["`@BGSBot myguild set`", "`@BGSBot myguild show`"],
        }
    }

    async fn exec(&self, ctx: &CommandContext<'_, S, A>, args: &str) -> Result<()> {
        let tokens: Vec<&str> = args.split(' ').filter(|t| !t.is_empty()).collect();
        let Some(verb) = tokens.first() else {
            ctx.sink.send_text(ResponseKind::NoParams.text()).await?;
            return Ok(());
        };
        let Some(guild_id) = ctx.invoker.guild_id else {
            ctx.sink.send_text(ResponseKind::Fail.text()).await?;
            return Ok(());
        };
        match verb.to_lowercase().as_str() {
            "set" => {
                if tokens.len() > 1 {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    return Ok(());
                }
                if ctx.store.get(guild_id).await?.is_some() {
                    ctx.sink.send_text("Your guild is already set").await?;
                    return Ok(());
                }
                ctx.store.insert(GuildConfig::new(guild_id)).await?;
                ctx.sink.send_text(ResponseKind::Success.text()).await?;
                Ok(())
            }
            "remove" => {
                if tokens.len() > 1 {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    return Ok(());
                }
                let required = [AccessCategory::Admin, AccessCategory::Forbidden];
                if !has_access(ctx.store, &ctx.invoker, &required).await {
                    ctx.sink
                        .send_text(ResponseKind::InsufficientPerms.text())
                        .await?;
                    return Ok(());
                }
                if ctx.store.remove(guild_id).await? {
                    ctx.sink.send_text(ResponseKind::Success.text()).await?;
                } else {
                    ctx.sink.send_text(GUILD_NOT_SET).await?;
                }
                Ok(())
            }
            "show" => {
                if tokens.len() > 1 {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    return Ok(());
                }
                let required = [AccessCategory::Admin, AccessCategory::Forbidden];
                if !has_access(ctx.store, &ctx.invoker, &required).await {
                    ctx.sink
                        .send_text(ResponseKind::InsufficientPerms.text())
                        .await?;
                    return Ok(());
                }
                match ctx.store.get(guild_id).await? {
                    Some(config) => {
                        let page = EmbedPage {
                            title: "Your Guild".to_string(),
                            color: EMBED_COLOR,
                            fields: vec![EmbedField::new("Guild Id", config.guild_id.to_string())],
                            timestamp: Utc::now(),
                        };
                        ctx.sink.send_embed(&page).await?;
                    }
                    None => {
                        ctx.sink.send_text(GUILD_NOT_SET).await?;
                    }
                }
                Ok(())
            }
            _ => {
                ctx.sink.send_text(ResponseKind::NotACommand.text()).await?;
                Ok(())
            }
        }
    }
}
