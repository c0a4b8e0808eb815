pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::Result;
use crate::config::{Config, ConfigError};
use crate::scheduler::ScheduleConfig;

#[derive(Parser)]
#[command(name = "quiethn")]
#[command(about = "A quiet, link-only Hacker News front page", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/quiethn/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers for resolving stories
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Maximum number of stories to keep
    #[arg(short = 'n', long, global = true)]
    pub limit: Option<usize>,

    /// Base URL of the Hacker News API
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the story list over HTTP, refreshing in the background
    Serve {
        /// Port to listen on, on all interfaces
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Full bind address; takes precedence over --port
        #[arg(long)]
        bind: Option<String>,

        /// Refresh interval (e.g., "1h", "30m", "90s")
        #[arg(short, long)]
        interval: Option<String>,

        /// Skip the refresh on startup
        #[arg(long)]
        no_initial_refresh: bool,

        /// Deployment environment; "dev" disables the HTTPS redirect
        #[arg(long, env = "ENV")]
        env: Option<String>,
    },
    /// Run one refresh and print the stories
    Refresh {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Load the config file and apply command-line overrides on top.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(limit) = self.limit {
            config.display_limit = limit;
        }
        if let Some(ref base) = self.api_base_url {
            config.api_base_url = base.clone();
        }

        if let Commands::Serve {
            port,
            bind,
            interval,
            no_initial_refresh,
            env,
        } = &self.command
        {
            if let Some(bind) = bind {
                config.bind = bind.clone();
            } else if let Some(port) = port {
                config.bind = format!("0.0.0.0:{}", port);
            }
            if let Some(interval) = interval {
                config.refresh_interval_secs =
                    ScheduleConfig::parse_interval(interval).map_err(ConfigError::Invalid)?;
            }
            if *no_initial_refresh {
                config.refresh_on_start = false;
            }
            if let Some(env) = env {
                config.env = env.clone();
            }
        }

        Ok(config.validated()?)
    }
}
