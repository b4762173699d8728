mod config;
mod dto;
mod logging;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fixed_rate_tax_plugin::FixedRateTaxationProvider;
use taxation::{
    GatewayProviderKey, InMemoryCustomerRepository, InMemoryGatewayProviderService, Invoice,
    TaxationContext,
};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::dto::{InvoiceInput, TaxMethodOutput, TaxResultOutput};

/// Taxation CLI - calculate invoice tax with configured providers
#[derive(Parser)]
#[command(name = "taxation-cli")]
#[command(about = "Taxation CLI - calculate invoice tax with configured providers")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and print it as JSON
    Check,
    /// Print the tax methods of a provider as JSON
    TaxMethods {
        /// Provider key
        #[arg(long)]
        provider: Uuid,
    },
    /// Calculate tax for an invoice read from a YAML file
    Calculate {
        /// Invoice file
        #[arg(long)]
        invoice: PathBuf,

        /// Calculate with this provider instead of routing by billing country
        #[arg(long)]
        provider: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose)?;
    config.validate()?;

    let ctx = build_context(&config)?;
    tracing::info!(
        providers = config.fixed_rate_providers.len(),
        customers = config.customers.len(),
        "Taxation context ready"
    );

    match cli.command {
        Commands::Check => print_json(&config),
        Commands::TaxMethods { provider } => {
            let provider = ctx.provider(GatewayProviderKey::new(provider))?;
            let methods = provider.tax_methods().await?;
            let output: Vec<TaxMethodOutput> = methods.iter().map(Into::into).collect();
            print_json(&output)
        }
        Commands::Calculate { invoice, provider } => {
            let invoice = read_invoice(&invoice)?;
            let result = match provider {
                Some(key) => {
                    ctx.provider(GatewayProviderKey::new(key))?
                        .calculate_tax_for_invoice(&invoice)
                        .await?
                }
                None => ctx.calculate_tax_for_invoice(&invoice).await?,
            };
            print_json(&TaxResultOutput::from(result))
        }
    }
}

fn build_context(config: &AppConfig) -> Result<TaxationContext> {
    let service = Arc::new(InMemoryGatewayProviderService::new());
    let customers: InMemoryCustomerRepository = config.customers.iter().map(Into::into).collect();

    let mut ctx = TaxationContext::new(config.taxation.clone())
        .with_customer_repository(Arc::new(customers));
    for provider_config in &config.fixed_rate_providers {
        service.set_tax_methods(provider_config.provider_key(), provider_config.tax_methods());
        let provider = FixedRateTaxationProvider::new(
            provider_config.provider_info(),
            service.clone(),
            provider_config.rounding_scale,
        );
        ctx.register(Arc::new(provider), provider_config.priority)?;
    }
    Ok(ctx)
}

fn read_invoice(path: &Path) -> Result<Invoice> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read invoice {}", path.display()))?;
    let input: InvoiceInput = serde_saphyr::from_str(&raw)
        .with_context(|| format!("failed to parse invoice {}", path.display()))?;
    Ok(input.into())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
