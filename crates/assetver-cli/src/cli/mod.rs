//! CLI for the assetver asset URL rewriter.

mod commands;

use anyhow::Result;
use assetver_core::config::{self, RewriteConfig};
use assetver_core::AssetKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_config, run_explain, run_man, run_render, run_rewrite};

/// Top-level CLI for assetver.
#[derive(Debug, Parser)]
#[command(name = "assetver")]
#[command(about = "Move asset versions from the query string into the file name", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/assetver/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the URL the rewriter would emit for one asset.
    Rewrite(AssetArgs),

    /// Print which check decides the outcome for one asset.
    Explain(AssetArgs),

    /// Render every asset of a JSON page manifest.
    Render {
        /// Path to the manifest file.
        path: PathBuf,
    },

    /// Show the resolved configuration.
    Config {
        /// Print the config file location instead of its contents.
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page.
    Man,
}

/// One asset as the host would hand it to the rewriter.
#[derive(Debug, Clone, Args)]
pub struct AssetArgs {
    /// Asset URL as emitted by the host, e.g. `/js/app.js?ver=1.2`.
    pub url: String,

    /// Handle the asset was registered under.
    #[arg(long)]
    pub handle: String,

    /// Site base URL; assets on other hosts are not rewritten.
    #[arg(long, value_name = "URL")]
    pub site_url: String,

    /// Version the asset was registered with (omit for an unregistered handle).
    #[arg(long, value_name = "VER")]
    pub ver: Option<String>,

    /// Treat the request as an administrative page.
    #[arg(long)]
    pub admin: bool,

    /// Kind of asset.
    #[arg(long, value_enum, default_value_t = KindArg::Script)]
    pub kind: KindArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Script,
    Style,
}

impl From<KindArg> for AssetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Script => AssetKind::Script,
            KindArg::Style => AssetKind::Style,
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<RewriteConfig> {
    let cfg = match explicit {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let config_file = cli.config.as_deref();

        match cli.command {
            CliCommand::Rewrite(args) => run_rewrite(load_config(config_file)?, &args)?,
            CliCommand::Explain(args) => run_explain(load_config(config_file)?, &args)?,
            CliCommand::Render { path } => run_render(load_config(config_file)?, &path)?,
            CliCommand::Config { path } => {
                let cfg = load_config(config_file)?;
                run_config(&cfg, config_file, path)?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
