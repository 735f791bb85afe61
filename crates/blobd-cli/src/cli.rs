use std::net::SocketAddr;
use std::path::PathBuf;

use blobd_crypto::OidStrategy;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blobd", about = "In-memory blob store over HTTP", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

/// Flags override values from `--config`.
#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// `random` (fresh OID per upload) or `content` (BLAKE3 of the payload)
    #[arg(long)]
    pub oid_strategy: Option<OidStrategy>,
    /// Largest accepted upload, in bytes
    #[arg(long)]
    pub max_blob_size: Option<usize>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub serve: ServeArgs,
}
