use anyhow::Context;
use blobd_server::{BlobServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Config(args) => cmd_config(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    BlobServer::new(config)
        .serve()
        .await
        .context("server terminated")
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.serve)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// File values first, then command-line overrides.
fn resolve_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(strategy) = args.oid_strategy {
        config.oid_strategy = strategy;
    }
    if let Some(max) = args.max_blob_size {
        config.max_blob_size = max;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
