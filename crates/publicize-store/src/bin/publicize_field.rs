//! publicize-field: Inspect and toggle per-post Publicize connections.
//!
//! Operates on a TOML connection store, the same way the REST field does:
//! reads are projected for a context, writes are reconciled and every skip
//! record of the post is resynced.
//!
//! # Usage
//!
//! ```bash
//! # Show the connections of post 42
//! publicize-field --store connections.toml get 42
//!
//! # Stop sharing post 42 to twitter, except for one account
//! publicize-field --store connections.toml update 42 \
//!     '[{"service_name":"twitter","enabled":false},{"id":"A1","enabled":true}]'
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use publicize_format::{FieldContext, PostId};
use publicize_runtime::{Error, PostConnectionsField};
use publicize_store::{FileConnectionStore, StoreConfig};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Inspect and toggle per-post Publicize connections.
#[derive(Parser, Debug)]
#[command(name = "publicize-field")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the connection store file
    #[arg(short, long, value_name = "FILE")]
    store: PathBuf,

    /// Optional store config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the connections of a post
    Get {
        /// Post identifier
        post_id: PostId,

        /// Rendering context
        #[arg(long, value_enum, default_value = "edit")]
        context: ContextArg,
    },
    /// Apply share toggles to a post
    Update {
        /// Post identifier
        post_id: PostId,

        /// JSON array of requests, or @path to read it from a file
        requests: String,
    },
    /// Print the field schema
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ContextArg {
    View,
    Edit,
}

impl From<ContextArg> for FieldContext {
    fn from(value: ContextArg) -> Self {
        match value {
            ContextArg::View => FieldContext::View,
            ContextArg::Edit => FieldContext::Edit,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let config = match &args.config {
        Some(path) => match StoreConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => StoreConfig::default(),
    };

    if !args.store.is_file() {
        error!("Store not found: {}", args.store.display());
        process::exit(1);
    }

    let store = match FileConnectionStore::open(&args.store, config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };
    let field = PostConnectionsField::new(&store, &store, &store);

    let result = match args.command {
        Command::Get { post_id, context } => field
            .get(post_id, context.into())
            .and_then(|connections| print_json(&connections)),
        Command::Update { post_id, requests } => {
            let raw = match read_requests(&requests) {
                Ok(raw) => raw,
                Err(e) => {
                    error!("Failed to read requests: {}", e);
                    process::exit(1);
                }
            };
            serde_json::from_str::<serde_json::Value>(&raw)
                .map_err(Error::from)
                .and_then(|value| field.update(post_id, &value))
                .and_then(|report| {
                    info!(
                        "{} changed, {} locked, {} ignored",
                        report.changed_count(),
                        report.connections.locked().count(),
                        report.ignored
                    );
                    print_json(&report.connections)
                })
        }
        Command::Schema => print_json(&field.schema()),
    };

    if let Err(e) = result {
        match &e {
            Error::PermissionDenied { code, status, .. } => {
                error!("Permission denied ({}, status {})", code, status);
            }
            _ => error!("{}", e),
        }
        process::exit(1);
    }
}

fn read_requests(arg: &str) -> std::io::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path),
        None => Ok(arg.to_string()),
    }
}

fn print_json<T: Serialize>(value: &T) -> publicize_runtime::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}
