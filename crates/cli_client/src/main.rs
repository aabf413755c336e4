//! POS gateway client
//!
//! Authorizes one sale against a payment terminal and records the outcome
//! in the transaction ledger, or lists recent outcomes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use posgw_core::{AuthSession, LedgerEntry, LedgerStore};
use tracing::{warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// POS gateway client - terminal authorization and transaction ledger
#[derive(Parser, Debug)]
#[command(name = "posgw")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Point-of-sale gateway client", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to the transaction ledger database
    #[arg(long, default_value = "transactions.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authorize a sale amount against the terminal
    Sale {
        /// Amount to authorize, e.g. 12.34
        amount: String,

        /// Terminal IPv4 address (dotted quad; hostnames are not resolved)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Terminal TCP port
        #[arg(long, default_value_t = 9100)]
        port: u16,
    },
    /// List the most recent ledger entries
    Recent {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level)?;

    // Ledger failures are non-fatal for a sale: the authorization still
    // runs, the outcome just is not recorded.
    let ledger = match LedgerStore::open(&args.db) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, db = %args.db.display(), "ledger unavailable, outcomes will not be recorded");
            None
        }
    };

    match args.command {
        Command::Sale { amount, host, port } => {
            let mut session = AuthSession::new(&host, port);
            let result = session.authorize(&amount).await;

            if let Some(store) = &ledger {
                let entry = LedgerEntry::from_result(&amount, &result);
                if let Err(e) = store.append(&entry) {
                    warn!(error = %e, "outcome not recorded");
                }
            }

            if result.is_approved() {
                println!("{}", result.status);
            } else {
                println!("{}: {}", result.status, result.reason);
                std::process::exit(1);
            }
        }
        Command::Recent { count } => {
            let store = ledger.context("ledger unavailable")?;
            let entries = store.recent(count).context("ledger query failed")?;
            for entry in entries {
                println!("{}\t{}\t{}", entry.amount, entry.status, entry.reason);
            }
        }
    }

    Ok(())
}

/// Setup logging with tracing
fn setup_logging(level: &str) -> Result<()> {
    let log_level = level.parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
