//! Guild sort preference for report cards.

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::{EmbedField, EmbedPage, HelpEntry, ResponseKind, SortField, EMBED_COLOR};
use chrono::Utc;
use elitebgs_client::EbgsApi;

use crate::access::{has_access, AccessCategory};
use crate::commands::{Command, CommandContext};
use crate::sink::ReplySink;
use crate::store::GuildStore;

const GUILD_NOT_SET: &str = "Your guild is not set yet";

pub struct Sort;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for Sort {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "sort",
            description: "Sets, removes or shows how report cards get sorted",
            template: "sort <set|remove|show> <name|influence> <increasing|decreasing>",
            examples: &[
                "`@BGSBot sort set influence decreasing`",
                "`@BGSBot sort remove`",
                "`@BGSBot sort show`",
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
                3 => {
                    let field = match tokens[1].to_lowercase().as_str() {
                        "name" => SortField::Name,
                        "influence" => SortField::Influence,
                        other => {
                            ctx.sink
                                .send_text(&format!("I can't sort by {}", other))
                                .await?;
                            return Ok(());
                        }
                    };
                    let order: i8 = match tokens[2].to_lowercase().as_str() {
                        "increasing" => 1,
                        "decreasing" => -1,
                        other => {
                            ctx.sink
                                .send_text(&format!("I can't sort in {} order", other))
                                .await?;
                            return Ok(());
                        }
                    };
                    let updated = ctx
                        .store
                        .update(guild_id, |c| {
                            c.sort = Some(field);
                            c.sort_order = order;
                        })
                        .await?;
                    match updated {
                        Some(_) => ctx.sink.send_text(ResponseKind::Success.text()).await?,
                        None => ctx.sink.send_text(GUILD_NOT_SET).await?,
                    }
                    Ok(())
                }
                n if n > 3 => {
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
                let updated = ctx
                    .store
                    .update(guild_id, |c| {
                        c.sort = None;
                        c.sort_order = 0;
                    })
                    .await?;
                match updated {
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
                    Some(config) => match (config.sort, config.sort_order) {
                        (Some(field), order) if order != 0 => {
                            let field_name = match field {
                                SortField::Name => "name",
                                SortField::Influence => "influence",
                            };
                            let order_name = if order == 1 { "increasing" } else { "decreasing" };
                            let page = EmbedPage {
                                title: "Sort Preference".to_string(),
                                color: EMBED_COLOR,
                                fields: vec![EmbedField::new(
                                    "Order",
                                    format!("{}, {}", field_name, order_name),
                                )],
                                timestamp: Utc::now(),
                            };
                            ctx.sink.send_embed(&page).await?;
                        }
                        _ => {
                            ctx.sink
                                .send_text("You don't have a sort order set up")
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
