//! AdLab Studio - Creative concept generation for marketing campaigns
//!
//! This is the main entry point for the adlab binary. The studio selects
//! a company, product, and user persona from the catalog, takes an
//! optional campaign brief, and generates editable creative concepts
//! through the campaign workflow.

mod catalog;
mod cli;
mod config;
mod error;
mod generator;
mod logging;
mod types;
mod version;
mod workflow;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::catalog::{DemoCatalog, RestCatalog, RestCatalogConfig, SharedCatalog};
use crate::cli::{CatalogSubcommand, Cli, Commands, ConfigSubcommand, GenerateArgs};
use crate::config::StudioConfig;
use crate::error::{Error, Result};
use crate::generator::{SharedGenerator, TemplateConfig, TemplateGenerator};
use crate::types::{Company, Product, UserPersona};
use crate::workflow::CampaignWorkflow;

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    // For commands that don't need full logging, use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        _ => {}
    }

    // Load configuration for generate/catalog commands
    let config_path = match &cli.command {
        Commands::Generate(args) => args.config.clone(),
        Commands::Catalog { config, .. } => config.clone(),
        _ => None,
    };

    let config = match StudioConfig::load(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    };

    // Initialize logging with config settings
    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    info!(version = %build.full_version(), "Starting AdLab studio");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    let result = match cli.command {
        Commands::Generate(args) => runtime.block_on(run_generate(&config, args)),
        Commands::Catalog { subcommand, .. } => runtime.block_on(run_catalog(&config, subcommand)),
        Commands::Version | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    };

    if let Err(e) = result {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Generate Command
// ─────────────────────────────────────────────────────────────────

/// Drive the campaign workflow end to end and print the results
async fn run_generate(config: &StudioConfig, args: GenerateArgs) -> Result<()> {
    let catalog = build_catalog(config)?;
    let generator: SharedGenerator = Arc::new(TemplateGenerator::with_config(TemplateConfig {
        latency_ms: config.generator.latency_ms,
        max_count: config.generator.max_count,
        fail_generate: false,
    }));

    let mut workflow = CampaignWorkflow::new(catalog, generator);

    workflow.load_companies().await;
    let company_id = resolve_company(workflow.companies(), &args.company)?;
    let token = workflow.select_company(company_id);
    workflow.refresh_dependents(token).await;

    let product_id = resolve_product(workflow.products(), &args.product)?;
    let persona_id = resolve_persona(workflow.personas(), &args.persona)?;
    workflow.select_product(product_id);
    workflow.select_persona(persona_id);

    if args.no_brief {
        workflow.set_no_brief(true);
    } else if let Some(brief) = args.brief {
        workflow.set_brief(brief);
    }

    let count = args.count.unwrap_or(config.generator.default_count);
    let appended = workflow.generate_concepts(count).await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(workflow.concepts())
            .map_err(|e| Error::Internal(format!("Failed to render concepts: {}", e)))?;
        println!("{}", rendered);
    } else {
        println!("Generated {} concept(s):", appended);
        for (index, concept) in workflow.concepts().iter().enumerate() {
            println!();
            println!("Concept {} ({})", index + 1, concept.id);
            println!("  Concept:  {}", concept.concept);
            println!("  Copy Out: {}", concept.copy_out);
            println!("  Copy In:  {}", concept.copy_in);
            println!("  CTA:      {}", concept.cta);
        }
    }

    Ok(())
}

/// Resolve a company argument (id or display name) to its id
fn resolve_company(companies: &[Company], needle: &str) -> Result<String> {
    companies
        .iter()
        .find(|c| c.id == needle || c.name == needle)
        .map(|c| c.id.clone())
        .ok_or_else(|| Error::unknown_selection("company", needle))
}

/// Resolve a product argument (id or display name) to its id
fn resolve_product(products: &[Product], needle: &str) -> Result<String> {
    products
        .iter()
        .find(|p| p.id == needle || p.name == needle)
        .map(|p| p.id.clone())
        .ok_or_else(|| Error::unknown_selection("product", needle))
}

/// Resolve a persona argument (id or display name) to its id
fn resolve_persona(personas: &[UserPersona], needle: &str) -> Result<String> {
    personas
        .iter()
        .find(|p| p.id == needle || p.name == needle)
        .map(|p| p.id.clone())
        .ok_or_else(|| Error::unknown_selection("persona", needle))
}

// ─────────────────────────────────────────────────────────────────
// Catalog Command
// ─────────────────────────────────────────────────────────────────

/// List catalog rows
async fn run_catalog(config: &StudioConfig, subcommand: CatalogSubcommand) -> Result<()> {
    let catalog = build_catalog(config)?;

    match subcommand {
        CatalogSubcommand::Companies => {
            for company in catalog.companies().await? {
                println!("{}\t{}", company.id, company.name);
            }
        }
        CatalogSubcommand::Products { company } => {
            let companies = catalog.companies().await?;
            let company_id = resolve_company(&companies, &company)?;
            for product in catalog.products_for(&company_id).await? {
                println!("{}\t{}", product.id, product.name);
            }
        }
        CatalogSubcommand::Personas { company } => {
            let companies = catalog.companies().await?;
            let company_id = resolve_company(&companies, &company)?;
            for persona in catalog.personas_for(&company_id).await? {
                println!("{}\t{}", persona.id, persona.name);
            }
        }
    }

    Ok(())
}

/// Build the catalog source from configuration
fn build_catalog(config: &StudioConfig) -> Result<SharedCatalog> {
    if config.catalog.is_demo() {
        info!("No catalog URL configured, using bundled demo catalog");
        Ok(Arc::new(DemoCatalog::new()))
    } else {
        info!(base_url = %config.catalog.base_url, "Using REST catalog");
        let rest = RestCatalog::new(RestCatalogConfig {
            base_url: config.catalog.base_url.clone(),
            api_key: config.catalog.api_key.clone(),
            timeout_secs: config.catalog.timeout_secs,
        })?;
        Ok(Arc::new(rest))
    }
}

// ─────────────────────────────────────────────────────────────────
// Config Command
// ─────────────────────────────────────────────────────────────────

/// Handle the config subcommands
fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let loaded = StudioConfig::load(config.as_deref())?;
            let rendered = toml::to_string_pretty(&loaded)?;
            print!("{}", rendered);
            Ok(())
        }
        ConfigSubcommand::Init { path, force } => config::init_config(path.as_deref(), force),
        ConfigSubcommand::Validate { config } => {
            StudioConfig::load(config.as_deref())?;
            println!("Configuration is valid");
            Ok(())
        }
    }
}
