//! Manages the override roles that bypass access checks.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::{EmbedField, EmbedPage, HelpEntry, ResponseKind, EMBED_COLOR};
use chrono::Utc;
use elitebgs_client::EbgsApi;

use crate::access::{has_access, AccessCategory};
use crate::commands::bgsrole::parse_known_role;
use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

const GUILD_NOT_SET: &str = "Your guild is not set yet";

pub struct ForbiddenRoles;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for ForbiddenRoles {
    fn name(&self) -> &'static str {
        "forbiddenroles"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "forbiddenroles",
            description: "Adds, removes or shows the override roles that bypass access checks",
            template: "forbiddenroles <add|remove|show> <role id>",
            examples: &[
                "`@BGSBot forbiddenroles add 123456789012345678`",
                "`@BGSBot forbiddenroles show`",
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
            "add" => match tokens.len() {
                2 => {
                    let Some(role_id) = parse_known_role(tokens[1], &ctx.invoker.guild_roles)
                    else {
                        ctx.sink.send_text(ResponseKind::IdNotFound.text()).await?;
                        return Ok(());
                    };
                    let updated = ctx
                        .store
                        .update(guild_id, |c| {
                            if !c.forbidden_roles.contains(&role_id) {
                                c.forbidden_roles.push(role_id);
                            }
                        })
                        .await?;
                    match updated {
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
            "remove" => match tokens.len() {
                2 => {
                    let Ok(role_id) = tokens[1].parse::<u64>() else {
                        ctx.sink.send_text(ResponseKind::IdNotFound.text()).await?;
                        return Ok(());
                    };
                    let updated = ctx
                        .store
                        .update(guild_id, |c| c.forbidden_roles.retain(|r| *r != role_id))
                        .await?;
                    match updated {
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
            "show" => {
                if tokens.len() > 1 {
                    ctx.sink.send_text(ResponseKind::TooManyParams.text()).await?;
                    return Ok(());
                }
                match ctx.store.get(guild_id).await? {
                    Some(config) if !config.forbidden_roles.is_empty() => {
                        let listing = config
                            .forbidden_roles
                            .iter()
                            .map(|id| format!("{} - <@&{}>", id, id))
                            .collect::<Vec<_>>()
                            .join("\n");
                        let page = EmbedPage {
                            title: "Forbidden Roles".to_string(),
                            color: EMBED_COLOR,
                            fields: vec![EmbedField::new("Ids and Names", listing)],
                            timestamp: Utc::now(),
                        };
                        ctx.sink.send_embed(&page).await?;
                        Ok(())
                    }
                    Some(_) => {
                        ctx.sink
                            .send_text("You don't have any forbidden roles set up")
                            .await?;
                        Ok(())
                    }
                    None => {
                        ctx.sink.send_text(GUILD_NOT_SET).await?;
                        Ok(())
                    }
                }
            }
            _ => {
                ctx.sink.send_text(ResponseKind::NotACommand.text()).await?;
                Ok(())
            }
        }
    }
}
