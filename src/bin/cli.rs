//! shardstore CLI
//!
//! Command-line interface for inspecting and editing a store directory.

use std::io::Write;
use std::path::PathBuf;

use bytes::Bytes;
use clap::{Parser, Subcommand};
use shardstore::path::{path_style_for, Platform};
use shardstore::{Config, FsStorageAdapter, StorageAdapter, StorageKey};
use tracing_subscriber::{fmt, EnvFilter};

/// shardstore CLI
#[derive(Parser, Debug)]
#[command(name = "shardstore-cli")]
#[command(about = "CLI for shardstore blob stores")]
#[command(version)]
struct Args {
    /// Store base directory
    #[arg(short, long, default_value = "./shardstore-data")]
    data_dir: PathBuf,

    /// Write blobs directly instead of staging and renaming
    #[arg(long)]
    no_atomic_writes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the payload stored under a key
    Get {
        /// Key segments
        #[arg(required = true)]
        key: Vec<String>,
    },

    /// Store a payload under a key
    Put {
        /// Key segments
        #[arg(required = true)]
        key: Vec<String>,

        /// Payload as a UTF-8 string
        #[arg(short, long, conflicts_with = "file")]
        value: Option<String>,

        /// Read the payload from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Remove a key
    Rm {
        /// Key segments
        #[arg(required = true)]
        key: Vec<String>,
    },

    /// List every key under a prefix with its payload size
    Ls {
        /// Prefix segments
        #[arg(required = true)]
        prefix: Vec<String>,
    },

    /// Remove every key under a prefix
    RmRange {
        /// Prefix segments
        #[arg(required = true)]
        prefix: Vec<String>,
    },

    /// Compute the relative path between two absolute paths
    Rel {
        from: String,
        to: String,

        /// Use Windows path rules
        #[arg(long)]
        windows: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,shardstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> shardstore::Result<()> {
    // Path arithmetic needs no store
    if let Commands::Rel { from, to, windows } = &args.command {
        let platform = if *windows { Platform::Windows } else { Platform::Posix };
        println!("{}", path_style_for(platform).relative(from, to));
        return Ok(());
    }

    let config = Config::builder()
        .base_dir(&args.data_dir)
        .atomic_writes(!args.no_atomic_writes)
        .build();
    let store = FsStorageAdapter::open(config).await?;

    match args.command {
        Commands::Get { key } => {
            let key = StorageKey::new(key)?;
            match store.load(&key).await? {
                Some(data) => std::io::stdout().write_all(&data)?,
                None => {
                    tracing::warn!("{} not found", key);
                    std::process::exit(2);
                }
            }
        }
        Commands::Put { key, value, file } => {
            let key = StorageKey::new(key)?;
            let data = match (value, file) {
                (Some(value), _) => Bytes::from(value.into_bytes()),
                (None, Some(file)) => Bytes::from(tokio::fs::read(&file).await?),
                (None, None) => Bytes::new(),
            };
            store.save(&key, data).await?;
        }
        Commands::Rm { key } => {
            let key = StorageKey::new(key)?;
            store.remove(&key).await?;
        }
        Commands::Ls { prefix } => {
            let prefix = StorageKey::new(prefix)?;
            let mut chunks = store.load_range(&prefix).await?;
            chunks.sort_by(|a, b| a.key.cmp(&b.key));
            for chunk in chunks {
                match chunk.data {
                    Some(data) => println!("{}\t{}", chunk.key.segments().join("/"), data.len()),
                    None => println!("{}\t-", chunk.key.segments().join("/")),
                }
            }
        }
        Commands::RmRange { prefix } => {
            let prefix = StorageKey::new(prefix)?;
            store.remove_range(&prefix).await?;
        }
        Commands::Rel { .. } => unreachable!("handled before opening the store"),
    }

    Ok(())
}
