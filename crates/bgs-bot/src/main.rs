//! BGS guild bot
//!
//! Listens for mention-addressed commands on the Discord gateway, resolves
//! per-guild configuration and permissions, queries the EliteBGS statistics
//! API, and answers with paginated report cards.

mod access;
mod commands;
mod config;
mod handlers;
mod health;
mod registry;
mod report;
mod sink;
mod store;

use anyhow::Result;
use clap::Parser;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elitebgs_client::EbgsClient;

use crate::commands::build_registry;
use crate::config::Config;
use crate::handlers::Handler;
use crate::health::AppState;
use crate::store::MemoryGuildStore;

/// BGS guild bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/bgs-bot.toml")]
    config: String,

    /// Discord bot token (overrides config file)
    #[arg(long, env = "DISCORD_BOT_TOKEN")]
    bot_token: Option<String>,

    /// Statistics API base URL (overrides config file)
    #[arg(long, env = "EBGS_BASE_URL")]
    ebgs_url: Option<String>,

    /// Health check server port
    #[arg(long, env = "HEALTH_CHECK_PORT", default_value = "3001")]
    health_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bgs_bot=debug,elitebgs_client=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BGS guild bot");

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, loading from environment");
        Config::from_env()?
    };
    if let Some(bot_token) = args.bot_token {
        config.discord.bot_token = bot_token;
    }
    if let Some(ebgs_url) = args.ebgs_url {
        config.ebgs.base_url = ebgs_url;
    }

    info!("Statistics API: {}", config.ebgs.base_url);

    let api = EbgsClient::new(config.ebgs.base_url.clone(), config.ebgs.timeout())?;
    let store = MemoryGuildStore::new();
    let registry = build_registry();

    // Start health check server
    let health_state = AppState::new();
    let health_for_server = health_state.clone();
    let health_port = args.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_for_server, health_port).await {
            error!("Health server error: {}", e);
        }
    });

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(registry, store, api, health_state);
    let mut client = Client::builder(&config.discord.bot_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Discord client: {}", e))?;

    // Graceful shutdown: close all shards on SIGTERM or Ctrl+C.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM handler");
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok();
        }
        info!("Shutdown signal received, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord gateway connection...");

    // Blocks until all shards are stopped.
    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Discord client error: {}", e))?;

    info!("BGS guild bot stopped");
    Ok(())
}
