//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the AdLab studio.

use clap::{Args, Parser, Subcommand};

/// AdLab Studio - Creative concept generation for marketing campaigns
///
/// Selects a company, product, and user persona from the catalog, takes an
/// optional campaign brief, and generates editable creative concepts.
#[derive(Parser, Debug)]
#[command(name = "adlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the studio
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate creative concepts for a selection
    Generate(GenerateArgs),

    /// List catalog rows
    Catalog {
        /// Path to configuration file
        #[arg(short, long, env = "ADLAB_CONFIG", global = true)]
        config: Option<String>,

        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to configuration file
    #[arg(short, long, env = "ADLAB_CONFIG")]
    pub config: Option<String>,

    /// Company to generate for (catalog id or display name)
    #[arg(long)]
    pub company: String,

    /// Product to generate for (catalog id or display name)
    #[arg(long)]
    pub product: String,

    /// User persona to target (catalog id or display name)
    #[arg(long)]
    pub persona: String,

    /// Campaign brief text steering the generation
    #[arg(long, conflicts_with = "no_brief")]
    pub brief: Option<String>,

    /// Generate without a campaign brief
    #[arg(long)]
    pub no_brief: bool,

    /// Number of concepts to generate (default from configuration)
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Print the generated concepts as JSON
    #[arg(long)]
    pub json: bool,
}

/// Catalog listing subcommands
#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// List all companies
    Companies,

    /// List the products of a company
    Products {
        /// Company (catalog id or display name)
        #[arg(long)]
        company: String,
    },

    /// List the user personas of a company
    Personas {
        /// Company (catalog id or display name)
        #[arg(long)]
        company: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}
