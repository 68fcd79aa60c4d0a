//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig, PipelineStats};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    info!(
        adapter = %blueprint.adapter.name,
        org_ids = ?blueprint.verification.org_ids,
        probe = ?blueprint.health.probe,
        outputs = blueprint.outputs.len(),
        "Configuration loaded"
    );

    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let dispatcher = dispatcher::create_dispatcher(&blueprint)
        .await
        .context("Failed to create dispatcher")?;

    let config = PipelineConfig {
        max_events: if args.max_events == 0 {
            None
        } else {
            Some(args.max_events)
        },
    };
    let pipeline = Pipeline::new(&dispatcher, config);
    let shutdown_signal = setup_shutdown_signal();

    info!("Dispatching events...");

    let outcome: Option<PipelineStats> = match &args.events {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open events file {}", path.display()))?;
            tokio::select! {
                result = pipeline.run(file) => Some(result.context("Pipeline execution failed")?),
                _ = shutdown_signal => None,
            }
        }
        None => {
            tokio::select! {
                result = pipeline.run(tokio::io::stdin()) => Some(result.context("Pipeline execution failed")?),
                _ = shutdown_signal => None,
            }
        }
    };

    let router = dispatcher.into_sink();
    let output_stats = router.stats();
    router.shutdown().await;

    match outcome {
        Some(mut stats) => {
            stats.outputs = output_stats;
            info!(
                events = stats.events,
                malformed = stats.malformed,
                failed = stats.failed,
                duration_secs = stats.duration.as_secs_f64(),
                "Event input exhausted"
            );
            stats.print_summary();
        }
        None => warn!("Received shutdown signal, outputs drained"),
    }

    info!("Tilganger adapter finished");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::AdapterBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Adapter:");
    println!("  Name: {}", blueprint.adapter.name);
    println!("  Health component: {}", blueprint.adapter.health_component);
    println!(
        "  Unknown actions: {:?}",
        blueprint.adapter.unknown_action_policy
    );

    println!("\nVerification:");
    if blueprint.verification.supported_actions.is_empty() {
        println!("  Actions: all registered handlers");
    } else {
        for action in &blueprint.verification.supported_actions {
            println!("  - {}", action);
        }
    }
    if blueprint.verification.org_ids.is_empty() {
        println!("  Organisations: any");
    } else {
        println!("  Organisations: {}", blueprint.verification.org_ids.join(", "));
    }

    println!("\nHealth probe: {:?}", blueprint.health.probe);
    if let Some(ref addr) = blueprint.health.addr {
        println!("  Address: {} (timeout {}ms)", addr, blueprint.health.timeout_ms);
    }

    if !blueprint.outputs.is_empty() {
        println!("\nOutputs ({}):", blueprint.outputs.len());
        for output in &blueprint.outputs {
            println!("  - {} ({:?})", output.name, output.output_type);
        }
    }

    println!();
}
