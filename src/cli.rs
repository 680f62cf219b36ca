//! CLI definitions for tfdkron.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tfdkron CLI.
#[derive(Parser)]
#[command(name = "tfdkron")]
#[command(about = "Manage Dkron jobs as declarative resources")]
#[command(version)]
pub(crate) struct Cli {
    /// Provider configuration file path
    #[arg(short, long, default_value = "tfdkron.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the schemas of all resource types as JSON
    Schema,

    /// Check a resource configuration against its schema
    Validate {
        /// JSON file with the resource attributes
        file: PathBuf,

        /// Resource type
        #[arg(short = 't', long = "type", default_value = "dkron_job")]
        type_name: String,
    },

    /// Create the resource, or update it when the state file exists
    Apply {
        /// JSON file with the resource attributes
        file: PathBuf,

        /// State file path
        #[arg(short, long)]
        state: PathBuf,

        /// Resource type, used when no state exists yet
        #[arg(short = 't', long = "type", default_value = "dkron_job")]
        type_name: String,
    },

    /// Read the remote object and rewrite the state file
    Refresh {
        /// State file path
        #[arg(short, long)]
        state: PathBuf,
    },

    /// Adopt an existing remote object by identity
    Import {
        /// Identity of the remote object (the job name)
        id: String,

        /// State file path
        #[arg(short, long)]
        state: PathBuf,

        /// Resource type
        #[arg(short = 't', long = "type", default_value = "dkron_job")]
        type_name: String,
    },

    /// Delete the remote object and remove the state file
    Destroy {
        /// State file path
        #[arg(short, long)]
        state: PathBuf,
    },
}
