//! Alliance roster sync daemon entry point
//!
//! Run with:
//! ```bash
//! cargo run -p alliance-sync
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use alliance_common::{try_init_tracing, AppConfig, TracingConfig};
use alliance_db::{
    create_pool, run_migrations, PgMemberRepository, PgOrgDirectory, PgOrgRepository, PoolConfig,
};
use alliance_directory::{HttpDirectoryClient, HttpDirectoryConfig};
use alliance_sync::{
    ChannelNotifyList, MembershipIndex, NotifyCommand, RosterSyncService, ServiceContext,
};

#[tokio::main]
async fn main() {
    // Configuration first; tracing format depends on the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = if config.bot.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Sync daemon failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        bot = %config.bot.name,
        dimension = config.bot.dimension,
        env = ?config.bot.env,
        "Starting alliance roster sync daemon"
    );

    // Database pool and schema
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..PoolConfig::default()
    };
    let pool = create_pool(&pool_config)
        .await
        .context("failed to connect to PostgreSQL")?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;
    info!("PostgreSQL connection established");

    // Repositories
    let org_repo = Arc::new(PgOrgRepository::new(pool.clone()));
    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let org_directory = Arc::new(PgOrgDirectory::new(pool));

    // Remote people directory
    let fetch_timeout = Duration::from_secs(config.directory.fetch_timeout_secs);
    let directory = Arc::new(
        HttpDirectoryClient::new(HttpDirectoryConfig {
            base_url: config.directory.base_url.clone(),
            dimension: config.bot.dimension,
            request_timeout: fetch_timeout,
        })
        .context("failed to build directory client")?,
    );

    // Notification-list consumer. The watch list itself lives with the chat
    // connection; until one is attached, commands are drained and logged.
    let (notify, mut notify_rx) = ChannelNotifyList::new();
    tokio::spawn(async move {
        while let Some(cmd) = notify_rx.recv().await {
            match cmd {
                NotifyCommand::Add { name, tag } => {
                    info!(%name, %tag, "Notification list add");
                }
                NotifyCommand::Remove { name, tag } => {
                    info!(%name, %tag, "Notification list remove");
                }
            }
        }
    });

    // Restore the membership index from stored rows
    let index = Arc::new(MembershipIndex::new());
    let restored = index
        .rebuild(member_repo.as_ref())
        .await
        .context("failed to rebuild the membership index")?;
    info!(members = restored, "Membership index rebuilt");

    let ctx = ServiceContext::new(
        org_repo,
        member_repo,
        org_directory,
        directory,
        Arc::new(notify),
        index,
        config.bot.name.clone(),
        fetch_timeout,
    );
    let sync = RosterSyncService::new(ctx);

    // First tick fires immediately, so startup always runs a full sync
    let mut ticker = interval(Duration::from_secs(config.sync.interval_hours * 3600));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = sync.sync_all().await {
                    error!(error = %e, "Alliance roster update failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping sync daemon");
                break;
            }
        }
    }

    Ok(())
}
