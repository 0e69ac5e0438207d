//! Manages the roles allowed to run configuration commands.

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

pub struct AdminRoles;

#[async_trait]
impl<S: GuildStore, A: EbgsApi> Command<S, A> for AdminRoles {
    fn name(&self) -> &'static str {
        "adminroles"
    }

    fn help(&self) -> HelpEntry {
        HelpEntry {
            command: "adminroles",
            description: "Adds, removes or shows the roles allowed to configure the bot",
            template: "adminroles <add|remove|show> <role id>",
            examples: &[
                "`@BGSBot adminroles add 123456789012345678`",
                "`@BGSBot adminroles remove 123456789012345678`",
                "`@BGSBot adminroles show`",
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
                            if !c.admin_roles.contains(&role_id) {
                                c.admin_roles.push(role_id);
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
                        .update(guild_id, |c| c.admin_roles.retain(|r| *r != role_id))
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
                    Some(config) if !config.admin_roles.is_empty() => {
                        let listing = config
                            .admin_roles
                            .iter()
                            .map(|id| format!("{} - <@&{}>", id, id))
                            .collect::<Vec<_>>()
                            .join("\n");
                        let page = EmbedPage {
                            title: "Admin Roles".to_string(),
                            color: EMBED_COLOR,
                            fields: vec![EmbedField::new("Ids and Names", listing)],
                            timestamp: Utc::now(),
                        };
                        ctx.sink.send_embed(&page).await?;
                        Ok(())
                    }
                    Some(_) => {
                        ctx.sink
                            .send_text("You don't have any admin roles set up")
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

#[cfg(test)]
mod tests {
    use bgs_types::GuildConfig;

    use super::*;
    use crate::commands::Invoker;
    use crate::sink::MockSink;
    use crate::store::{GuildStore as _, MemoryGuildStore};
    use elitebgs_client::MockApi;

    const ADMIN_ROLE: u64 = 10;
    const NEW_ROLE: u64 = 555;

    fn context<'a>(
        store: &'a MemoryGuildStore,
        api: &'a MockApi,
        sink: &'a MockSink,
    ) -> CommandContext<'a, MemoryGuildStore, MockApi> {
        CommandContext {
            invoker: Invoker {
                user_id: 1,
                guild_id: Some(100),
                roles: vec![ADMIN_ROLE],
                guild_roles: vec![ADMIN_ROLE, NEW_ROLE],
            },
            store,
            api,
            sink,
        }
    }

    async fn store_with_admin() -> MemoryGuildStore {
        let store = MemoryGuildStore::new();
        let mut config = GuildConfig::new(100);
        config.admin_roles = vec![ADMIN_ROLE];
        store.insert(config).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_add_and_remove_round_trip() {
        let store = store_with_admin().await;
        let api = MockApi::new();
        let sink = MockSink::new();
        AdminRoles
            .exec(&context(&store, &api, &sink), "add 555")
            .await
            .unwrap();
        assert_eq!(
            store.get(100).await.unwrap().unwrap().admin_roles,
            vec![ADMIN_ROLE, NEW_ROLE]
        );
        AdminRoles
            .exec(&context(&store, &api, &sink), "remove 555")
            .await
            .unwrap();
        assert_eq!(
            store.get(100).await.unwrap().unwrap().admin_roles,
            vec![ADMIN_ROLE]
        );
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = store_with_admin().await;
        let api = MockApi::new();
        let sink = MockSink::new();
        AdminRoles
            .exec(&context(&store, &api, &sink), "add 10")
            .await
            .unwrap();
        assert_eq!(
            store.get(100).await.unwrap().unwrap().admin_roles,
            vec![ADMIN_ROLE]
        );
    }

    #[tokio::test]
    async fn test_show_lists_roles() {
        let store = store_with_admin().await;
        let api = MockApi::new();
        let sink = MockSink::new();
        AdminRoles
            .exec(&context(&store, &api, &sink), "show")
            .await
            .unwrap();
        let pages = sink.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Admin Roles");
        assert!(pages[0].fields[0].value.contains("10 - <@&10>"));
    }
}
