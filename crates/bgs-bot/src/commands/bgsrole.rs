//! Manages the single role allowed to run the reporting commands.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::{EmbedField, EmbedPage, HelpEntry, ResponseKind, EMBED_COLOR};
use chrono::Utc;
use elitebgs_client::EbgsApi;

use crate::access::{has_access, AccessCategory};
use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

const GUILD_NOT_SET: &str = "Your guild is not set yet";

pub struct BgsRole;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for BgsRole {
    fn name(&self) -> &'static str {
        "bgsrole"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "bgsrole",
            description: "Sets, removes or shows the role set up for using the reporting commands",
            template: "bgsrole <set|remove|show> <role id>",
            examples: &[
                "`@BGSBot bgsrole set 123456789012345678`",
                "`@BGSBot bgsrole remove`",
                "`@BGSBot bgsrole show`",
            ],
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

        let required = [AccessCategory::Admin, AccessCategory::Forbidden];
        if !has_access(ctx.store, &ctx.invoker, &required).await {
            ctx.sink
                .send_text(ResponseKind::InsufficientPerms.text())
                .await?;
            return Ok(());
        }

        match verb.to_lowercase().as_str() {
            "set" => match tokens.len() {
                2 => {
                    let Some(role_id) = parse_known_role(tokens[1], &ctx.invoker.guild_roles)
                    else {
                        ctx.sink.send_text(ResponseKind::IdNotFound.text()).await?;
                        return Ok(());
                    };
                    match ctx.store.update(guild_id, |c| c.bgs_role = Some(role_id)).await? {
                        Some(_) => ctx.sink.send_text(ResponseKind::Success.text()).await?,
                        None => ctx.sink.send_text(GUILD_NOT_SET).await?,
                    }
                    Ok(())
                }
                n if n > 2 => {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    Ok(())
                }
                _ => {
                    ctx.sink.send_text(ResponseKind::NoParams.text()).await?;
                    Ok(())
                }
            },
            "remove" => {
                if tokens.len() > 1 {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    return Ok(());
                }
                match ctx.store.update(guild_id, |c| c.bgs_role = None).await? {
                    Some(_) => ctx.sink.send_text(ResponseKind::Success.text()).await?,
                    None => ctx.sink.send_text(GUILD_NOT_SET).await?,
                }
                Ok(())
            }
            "show" => {
                if tokens.len() > 1 {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    return Ok(());
                }
                match ctx.store.get(guild_id).await? {
                    Some(config) => match config.bgs_role {
                        Some(role_id) => {
                            let page = EmbedPage {
                                title: "BGS Role".to_string(),
                                color: EMBED_COLOR,
                                fields: vec![EmbedField::new(
                                    "Ids and Names",
                                    format!("{} - <@&{}>", role_id, role_id),
                                )],
                                timestamp: Utc::now(),
                            };
                            ctx.sink.send_embed(&page).await?;
                        }
                        None => {
                            ctx.sink
                                .send_text("You don't have a bgs role set up")
                                .await?;
                        }
                    },
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

/// Parse a role id and check it exists in the guild.
pub(super) fn parse_known_role(token: &str, guild_roles: &[u64]) -> Option<u64> {
    let role_id: u64 = token.parse().ok()?;
    guild_roles.contains(&role_id).then_some(role_id)
}
