//! FolioStore CLI
//!
//! Command-line tool for inspecting and editing a store directory.

use std::collections::HashSet;
use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use foliostore::{Compression, FileStore, Page, Store, StoreConfig, TimeUuid};

/// FolioStore CLI
#[derive(Parser, Debug)]
#[command(name = "foliostore-cli")]
#[command(about = "CLI for inspecting FolioStore page directories")]
#[command(version)]
struct Args {
    /// Store directory
    #[arg(short, long, default_value = "./foliostore_data")]
    dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Scheme {
    None,
    Deflate,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all keys in the store
    Keys,

    /// Print a page's payload to stdout
    Get {
        /// The key to read
        key: String,
    },

    /// Store a page under a key
    Put {
        /// The key to write
        key: String,

        /// The payload to store
        value: String,

        /// Compression scheme for the record
        #[arg(short, long, value_enum, default_value = "none")]
        compression: Scheme,
    },

    /// Remove one or more keys
    Remove {
        /// The keys to remove
        keys: Vec<String>,
    },

    /// Print key count and store configuration
    Stats,

    /// Allocate and print a fresh time-ordered key
    NewId,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,foliostore=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    // new-id needs no store at all
    if matches!(args.command, Commands::NewId) {
        println!("{}", TimeUuid::time_based_version7().to_short_string());
        return;
    }

    let config = StoreConfig::builder().dir(&args.dir).build();
    let store = match FileStore::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store at {}: {}", args.dir, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(store: &FileStore, command: Commands) -> foliostore::Result<()> {
    match command {
        Commands::Keys => {
            let mut keys: Vec<String> = store.key_set()?.into_iter().collect();
            keys.sort();
            for key in keys {
                println!("{}", key);
            }
        }
        Commands::Get { key } => match store.get_if_exists(&key)? {
            Some(page) => {
                let mut out = std::io::stdout().lock();
                out.write_all(page.data())?;
            }
            None => {
                eprintln!("(absent)");
                std::process::exit(2);
            }
        },
        Commands::Put {
            key,
            value,
            compression,
        } => {
            store.set_write_compression(match compression {
                Scheme::None => Compression::None,
                Scheme::Deflate => Compression::Deflate,
            });
            store.put(&key, &Page::new(value.into_bytes()))?;
        }
        Commands::Remove { keys } => {
            let keys: HashSet<String> = keys.into_iter().collect();
            store.remove(&keys)?;
        }
        Commands::Stats => {
            let config = store.config();
            println!("dir:         {}", config.dir.display());
            println!("async:       {}", config.async_write);
            println!("queue:       {}", config.queue_capacity);
            println!("keys:        {}", store.key_set()?.len());
            println!("writes:      {}", store.write_count());
            println!("reads:       {}", store.read_count());
        }
        Commands::NewId => unreachable!("handled before the store is opened"),
    }
    Ok(())
}
