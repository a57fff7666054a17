use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rollcall_offline::presentation::views::PendingListView;
use rollcall_offline::{AppConfig, AppState, CachedMember, CachedService, SyncError};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rollcall-offline")]
#[command(about = "Offline attendance queue and sync tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database holding the local queue and caches
    #[arg(long, env = "ROLLCALL_DATABASE_URL")]
    database_url: Option<String>,

    /// Base URL of the attendance server
    #[arg(long, env = "ROLLCALL_SERVER_URL")]
    server_url: Option<String>,

    /// Log filter (e.g. info, rollcall_offline=debug)
    #[arg(short, long, default_value = "rollcall_offline=info,warn", env = "LOG_LEVEL")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show connectivity and queue status
    Status,
    /// List attendance records waiting to be synced
    Pending,
    /// Queue attendance for a cached member and service
    Mark {
        #[arg(long)]
        member_id: i64,
        #[arg(long)]
        service_id: i64,
    },
    /// Push all pending records to the server
    Sync,
    /// Remove synced records older than the retention period
    Prune,
    /// Replace the cached member list from a JSON file
    CacheMembers { path: PathBuf },
    /// Replace the cached service list from a JSON file
    CacheServices { path: PathBuf },
    /// Search cached members by name or phone
    Search { query: String },
    /// Keep monitoring connectivity and auto-sync on reconnect
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    rollcall_offline::init_logging_with(&cli.log_level);

    let mut config = AppConfig::from_env();
    if let Some(url) = cli.database_url {
        config.storage.database_url = url;
    }
    if let Some(url) = cli.server_url {
        config.sync.server_url = url;
    }

    let state = AppState::new(config)
        .await
        .context("failed to initialize offline attendance")?;
    let attendance = state.attendance.clone();

    match cli.command {
        Commands::Status => {
            state.probe_once().await;
            let status = attendance.refresh_status();
            let queue = attendance.get_queue().await?;
            let pending = attendance.pending_count().await?;
            println!("connection: {}", status.label());
            println!("pending:    {}", pending);
            println!("stored:     {}", queue.len());
        }
        Commands::Pending => match attendance.display_pending_list().await? {
            PendingListView::Empty { message } => println!("{}", message),
            PendingListView::Entries { entries } => {
                for entry in entries {
                    println!("{}", entry);
                }
            }
        },
        Commands::Mark {
            member_id,
            service_id,
        } => {
            let record = attendance.mark_attendance_for(member_id, service_id).await?;
            println!(
                "queued {} for {} ({})",
                record.id, record.member_name, record.service_name
            );
        }
        Commands::Sync => {
            state.probe_once().await;
            match attendance.sync_all().await {
                Ok(report) => println!(
                    "synced {} of {} records",
                    report.reported_synced, report.sent
                ),
                Err(err) if err.is_guard() => println!("{}", err),
                Err(SyncError::Rejected(message)) => {
                    return Err(anyhow!("server rejected sync: {}", message));
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Prune => {
            let removed = attendance.clear_old_records().await?;
            println!("removed {} synced records", removed);
        }
        Commands::CacheMembers { path } => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let members: Vec<CachedMember> = serde_json::from_str(&raw)?;
            attendance.cache_members(&members).await?;
            println!("cached {} members", members.len());
        }
        Commands::CacheServices { path } => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let services: Vec<CachedService> = serde_json::from_str(&raw)?;
            attendance.cache_services(&services).await?;
            println!("cached {} services", services.len());
        }
        Commands::Search { query } => {
            for member in attendance.search_members(&query).await? {
                let id = member.id.map(|id| id.to_string()).unwrap_or_default();
                println!("{:>6}  {}  {}", id, member.name, member.phone);
            }
        }
        Commands::Watch => {
            let tasks = state.start().await?;
            info!("watching connectivity; press Ctrl+C to stop");
            tokio::signal::ctrl_c().await?;
            tasks.shutdown();
            info!("stopped");
        }
    }

    Ok(())
}
