//! # Registry Node
//!
//! Entry point: deploy a provenance registry, then either persist its
//! location, host it until Ctrl+C, or replay the scripted publish/verify run.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use provenance_registry::VerificationStatus;
use registry_node::cli::{Args, Command};
use registry_node::{deploy, load_config, persist, run_exercise, DevRoles};
use shared_bus::EventFilter;

fn format_status(status: &VerificationStatus) -> String {
    format!(
        "exists={}, verified={}, verifierCount={}",
        status.exists, status.is_verified, status.verifier_count
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut config = load_config().context("Failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    info!("===========================================");
    info!("  Provenance Registry Node v{}", provenance_registry::VERSION);
    info!("  Network: {} (chain {})", config.network.name, config.network.chain_id);
    info!("===========================================");

    let deployment = deploy(&config);
    if args.command.persists_deployment() {
        let record_path =
            persist(&deployment.record, &config).context("Failed to persist deployment")?;
        info!("Deployment info saved to {}", record_path.display());
    }

    match args.command {
        Command::Deploy => {
            println!("{}", serde_json::to_string_pretty(&deployment.record)?);
        }
        Command::Run => {
            let mut events = deployment.bus.subscribe(EventFilter::all());
            info!(address = %deployment.address, "Registry is running. Press Ctrl+C to stop.");
            loop {
                tokio::select! {
                    event = events.recv() => match event {
                        Some(event) => info!(event = event.name(), ?event, "Registry event"),
                        None => {
                            warn!("Event bus closed");
                            break;
                        }
                    },
                    signal = tokio::signal::ctrl_c() => {
                        signal.context("Failed to listen for Ctrl+C")?;
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        }
        Command::Exercise => {
            let roles = DevRoles::with_owner(config.registry.owner);
            println!("Registry deployed to: {}", deployment.address.to_hex());
            println!("\nAccounts used for testing:");
            println!("Owner: {}", roles.owner.to_hex());
            println!("Publisher: {}", roles.publisher.to_hex());
            println!("Verifier1: {}", roles.verifier1.to_hex());
            println!("Verifier2: {}", roles.verifier2.to_hex());
            println!("Reader: {}", roles.reader.to_hex());

            let report = run_exercise(&deployment.service, &roles)
                .await
                .context("Exercise failed")?;

            println!("\nArticle published with ID: {}", report.article_id.value());
            for (label, status) in &report.statuses {
                println!("Verification status {label}: {}", format_status(status));
            }

            let article = &report.article;
            println!("\nArticle details:");
            println!("  Content Hash: {}", article.content_fingerprint().to_hex());
            println!("  Published at: {}", article.created_at());
            println!("  Publisher: {}", article.publisher().to_hex());
            println!("  Verified: {}", article.is_verified());
            println!("  Verifier Count: {}", article.verifier_count());
            println!("  Metadata URI: {}", article.metadata_pointer());

            let stats = deployment.service.stats();
            info!(
                applied = stats.calls_applied,
                rejected = stats.calls_rejected,
                events = stats.events_published,
                "Exercise complete"
            );
            println!("\nPROVENANCE_REGISTRY_ADDRESS={}", deployment.address.to_hex());
        }
    }

    Ok(())
}
