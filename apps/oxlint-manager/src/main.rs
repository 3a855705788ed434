//! oxlint-manager binary entry point.
//! Delegates to the library for serving, one-shot lint runs and client edits.

use anyhow::{Context, Result};
use clap::Parser;
use oxlint_manager::cli::{Cli, Commands};
use oxlint_manager::config::{self, Effective, Overrides};
use oxlint_manager::controller::{Controller, HttpBackend};
use oxlint_manager::lint::LintRunner;
use oxlint_manager::models::LintReport;
use oxlint_manager::server::{self, AppState};
use oxlint_manager::store::ConfigStore;
use oxlint_manager::{output, utils};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

fn init_tracing(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve(overrides: &Overrides<'_>) -> Result<Effective> {
    config::resolve_effective(overrides).map_err(anyhow::Error::msg)
}

fn note_defaults(eff: &Effective) {
    if !eff.settings_found {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No oxlint-manager.toml found; using defaults."
        );
    }
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Serve {
            repo_root,
            config,
            dist,
            host,
            port,
        } => {
            init_tracing("oxlint_manager=info,tower_http=debug");
            let eff = resolve(&Overrides {
                repo_root: repo_root.as_deref(),
                config: config.as_deref(),
                dist: dist.as_deref(),
                host: host.as_deref(),
                port,
                ..Default::default()
            })?;
            note_defaults(&eff);
            if !eff.config_path.is_file() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    format!(
                        "Config file not found: {} (GET /config fails until it exists)",
                        utils::rel_to_wd(&eff.config_path)
                    )
                );
            }
            serve(eff).await?;
            Ok(0)
        }
        Commands::Lint { repo_root, output } => {
            init_tracing("oxlint_manager=warn");
            let eff = resolve(&Overrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                ..Default::default()
            })?;
            note_defaults(&eff);
            if eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!("Running: {}", eff.lint.display())
                );
            }
            let runner = LintRunner::new(eff.lint.clone(), &eff.repo_root);
            match runner.run().await {
                Ok(report) => {
                    output::print_lint(&report, &eff.output)?;
                    let errors = report.counts().map(|(_, e)| e).unwrap_or(0);
                    Ok(if errors > 0 { 1 } else { 0 })
                }
                Err(e) => {
                    output::print_lint(&LintReport::spawn_failed(e.to_string()), &eff.output)?;
                    Ok(2)
                }
            }
        }
        Commands::Show {
            url,
            repo_root,
            output,
        } => {
            init_tracing("oxlint_manager=warn");
            let eff = resolve(&Overrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                ..Default::default()
            })?;
            let mut ctl = Controller::new(HttpBackend::new(&url), eff.catalog.clone());
            ctl.mount().await;
            if !ctl.loaded() {
                output::print_messages(ctl.messages(), &eff.output)?;
                return Ok(1);
            }
            output::print_selectors(&ctl.category_rows(), &ctl.rule_rows(), ctl.status(), &eff.output)?;
            Ok(0)
        }
        Commands::SetRule {
            rule,
            severity,
            url,
            repo_root,
        } => {
            init_tracing("oxlint_manager=warn");
            let eff = resolve(&Overrides {
                repo_root: repo_root.as_deref(),
                ..Default::default()
            })?;
            let mut ctl = Controller::new(HttpBackend::new(&url), eff.catalog.clone());
            ctl.mount().await;
            if !ctl.loaded() {
                output::print_messages(ctl.messages(), &eff.output)?;
                return Ok(1);
            }
            ctl.set_rule(&rule, severity).await?;
            output::print_messages(ctl.messages(), &eff.output)?;
            Ok(0)
        }
        Commands::SetCategory {
            category,
            severity,
            url,
            repo_root,
        } => {
            init_tracing("oxlint_manager=warn");
            let eff = resolve(&Overrides {
                repo_root: repo_root.as_deref(),
                ..Default::default()
            })?;
            let mut ctl = Controller::new(HttpBackend::new(&url), eff.catalog.clone());
            ctl.mount().await;
            if !ctl.loaded() {
                output::print_messages(ctl.messages(), &eff.output)?;
                return Ok(1);
            }
            ctl.set_category(category, severity).await?;
            output::print_messages(ctl.messages(), &eff.output)?;
            Ok(0)
        }
    }
}

async fn serve(eff: Effective) -> Result<()> {
    let store = ConfigStore::new(&eff.config_path);
    let runner = LintRunner::new(eff.lint.clone(), &eff.repo_root);
    info!(
        config = %eff.config_path.display(),
        lint = %runner.command().display(),
        "Initializing oxlint-manager..."
    );
    let state = Arc::new(AppState::new(store, runner));

    let dist = eff.dist_dir.is_dir().then_some(eff.dist_dir.as_path());
    if dist.is_none() {
        info!("No UI bundle at {}; serving API only", eff.dist_dir.display());
    }
    let app = server::router(state, dist);

    let listener = tokio::net::TcpListener::bind((eff.host.as_str(), eff.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", eff.host, eff.port))?;
    info!("Server running on http://{}:{}", eff.host, eff.port);
    axum::serve(listener, app).await?;
    Ok(())
}
