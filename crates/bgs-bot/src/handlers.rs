//! Serenity event handler wiring gateway messages into the dispatcher.

use std::sync::atomic::{AtomicU64, Ordering};

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};

use elitebgs_client::EbgsClient;

use crate::commands::{CommandContext, Invoker};
use crate::health::AppState;
use crate::registry::CommandRegistry;
use crate::sink::DiscordSink;
use crate::store::MemoryGuildStore;

/// Gateway handler owning the command registry and the injected services.
pub struct Handler {
    registry: CommandRegistry<MemoryGuildStore, EbgsClient>,
    store: MemoryGuildStore,
    api: EbgsClient,
    health: AppState,
    bot_user_id: AtomicU64,
}

impl Handler {
    pub fn new(
        registry: CommandRegistry<MemoryGuildStore, EbgsClient>,
        store: MemoryGuildStore,
        api: EbgsClient,
        health: AppState,
    ) -> Self {
        Self {
            registry,
            store,
            api,
            health,
            bot_user_id: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.bot_user_id.store(ready.user.id.get(), Ordering::Relaxed);
        self.health.set_bot_username(ready.user.name.clone()).await;
        info!("Connected as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        // The bot only answers when addressed. Until `ready` has run the
        // bot id is unknown and nothing can be addressed to it.
        let bot_id = self.bot_user_id.load(Ordering::Relaxed);
        if bot_id == 0 || !msg.mentions_user_id(bot_id) {
            return;
        }

        let roles = msg
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|role| role.get()).collect())
            .unwrap_or_default();
        let guild_roles: Vec<u64> = msg
            .guild(&ctx.cache)
            .map(|guild| guild.roles.keys().map(|role| role.get()).collect())
            .unwrap_or_default();

        let invoker = Invoker {
            user_id: msg.author.id.get(),
            guild_id: msg.guild_id.map(|guild| guild.get()),
            roles,
            guild_roles,
        };
        let sink = DiscordSink::new(ctx.http.clone(), msg.channel_id);
        let context = CommandContext {
            invoker,
            store: &self.store,
            api: &self.api,
            sink: &sink,
        };

        if let Err(err) = self.registry.dispatch(&context, &msg.content, bot_id).await {
            error!("command dispatch failed: {:#}", err);
        }
    }
}
