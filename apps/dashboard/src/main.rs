use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{DashboardClient, ErrorSwitch, MockDataSource, MockLatency, Query, QuerySnapshot};
use serde::Serialize;
use shared::{
    domain::{AssetRow, Language},
    error::{DashboardError, ErrorReport},
    forms::ConfigForm,
    kpi::KpiMetric,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod screen;

use commands::{ListFlags, ScreenCommand};
use config::load_settings;
use screen::{AssetsScreen, Outcome};

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Operations dashboard over mock asset data")]
struct Cli {
    #[arg(long, default_value = "dashboard.toml")]
    config: PathBuf,
    /// Make every query fail.
    #[arg(long)]
    simulate_error: bool,
    #[arg(long)]
    no_latency: bool,
    #[arg(long)]
    json: bool,
    /// Extra attempts per query after a failure.
    #[arg(long, default_value_t = 0)]
    retries: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// KPI board plus the most recently listed assets.
    #[command(alias = "overview")]
    Kpis,
    Assets {
        #[command(flatten)]
        flags: ListFlags,
        #[arg(long)]
        interactive: bool,
    },
    Config {
        #[arg(long)]
        site_name: Option<String>,
        #[arg(long)]
        language: Option<Language>,
        #[arg(long)]
        refresh_interval: Option<String>,
        #[arg(long)]
        threshold: Option<String>,
        #[arg(long)]
        alerts: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for name in &settings.unknown_env {
        tracing::warn!(variable = %name, "ignoring unknown setting");
    }

    let latency = if settings.mock_latency && !cli.no_latency {
        MockLatency::default()
    } else {
        MockLatency::none()
    };
    let errors = ErrorSwitch::new(settings.simulate_error || cli.simulate_error);
    let source = MockDataSource::new(settings.asset_count, latency, errors);
    let client = DashboardClient::new(Arc::new(source));

    match cli.command {
        Command::Kpis => {
            let (kpis, assets) = tokio::join!(
                fetch(&client.kpis, cli.retries, "Dashboard unavailable", cli.json),
                refetch_with_retries(&client.assets, cli.retries)
            );
            let kpis = kpis?;
            let recent = match (assets.data, assets.error) {
                (Some(rows), None) => Ok(rows
                    .into_iter()
                    .take(render::RECENT_UPDATES_LIMIT)
                    .collect::<Vec<_>>()),
                (_, Some(err)) => Err(ErrorReport::from(DashboardError::from(err))),
                (None, None) => Ok(Vec::new()),
            };

            if cli.json {
                let (recent_updates, recent_updates_error) = match recent {
                    Ok(rows) => (Some(rows), None),
                    Err(report) => (None, Some(report)),
                };
                print_json(&Overview {
                    kpis,
                    recent_updates,
                    recent_updates_error,
                })?;
            } else {
                print!("{}", render::kpi_board(&kpis));
                println!();
                print!("{}", render::recent_updates(recent.as_deref()));
            }
        }
        Command::Assets { flags, interactive } => {
            let rows = fetch(&client.assets, cli.retries, "Assets unavailable", cli.json).await?;
            let mut screen = AssetsScreen::new(rows, settings.list_options());

            for command in flags.into_commands() {
                screen.handle(command)?;
            }

            if interactive {
                run_interactive(&mut screen).await?;
            } else if cli.json {
                print_json(&screen.visible())?;
            } else {
                print!("{}", render::asset_page(&screen.visible(), screen.list().state()));
            }
        }
        Command::Config {
            site_name,
            language,
            refresh_interval,
            threshold,
            alerts,
        } => {
            let current = fetch(&client.config, cli.retries, "Configuration unavailable", cli.json).await?;
            let initial = ConfigForm::from(&current);
            let mut form = initial.clone();
            if let Some(site_name) = site_name {
                form.site_name = site_name;
            }
            if let Some(language) = language {
                form.language = language;
            }
            if let Some(refresh_interval) = refresh_interval {
                form.refresh_interval = refresh_interval;
            }
            if let Some(threshold) = threshold {
                form.threshold = threshold;
            }
            if let Some(alerts) = alerts {
                form.enable_alerts = alerts;
            }

            if !form.has_changes(&initial) {
                if cli.json {
                    print_json(&current)?;
                } else {
                    print!("{}", render::config_summary(&current));
                }
                return Ok(());
            }

            match form.save() {
                Ok(saved) => {
                    tracing::info!(site = %saved.site_name, "configuration saved");
                    if cli.json {
                        print_json(&saved)?;
                    } else {
                        println!("Configuration saved.");
                        print!("{}", render::config_summary(&saved));
                    }
                }
                Err(errors) => {
                    if cli.json {
                        print_json(&errors)?;
                    } else {
                        eprint!("{}", render::form_errors(&errors));
                    }
                    return Err(DashboardError::from(errors).into());
                }
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Overview {
    kpis: Vec<KpiMetric>,
    recent_updates: Option<Vec<AssetRow>>,
    recent_updates_error: Option<ErrorReport>,
}

/// Refetches until success or the retry budget runs out.
async fn refetch_with_retries<T>(query: &Query<T>, retries: u32) -> QuerySnapshot<T>
where
    T: Clone + Send + Sync,
{
    let mut snapshot = query.refetch().await;
    for attempt in 1..=retries {
        if !snapshot.is_error {
            break;
        }
        tracing::info!(query = %query.key(), attempt, "retrying query");
        snapshot = query.refetch().await;
    }
    snapshot
}

/// Like [`refetch_with_retries`], but a final failure renders the error state
/// and ends the command.
async fn fetch<T>(query: &Query<T>, retries: u32, title: &str, json: bool) -> Result<T>
where
    T: Clone + Send + Sync,
{
    let snapshot = refetch_with_retries(query, retries).await;

    match (snapshot.data, snapshot.error) {
        (Some(data), None) => Ok(data),
        (_, Some(err)) => {
            let report = ErrorReport::from(DashboardError::from(err.clone()));
            if json {
                print_json(&report)?;
            } else {
                eprint!("{}", render::error_state(title, &report));
            }
            Err(anyhow::Error::new(err).context(format!("{} query failed", query.key())))
        }
        (None, None) => Err(anyhow!("{} query returned no data", query.key())),
    }
}

async fn run_interactive(screen: &mut AssetsScreen) -> Result<()> {
    print!("{}", render::asset_page(&screen.visible(), screen.list().state()));
    println!("{} assets loaded. Type 'help' for commands.", screen.rows().len());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match line.parse::<ScreenCommand>() {
            Ok(command) => command,
            Err(commands::ParseCommandError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match screen.handle(command) {
            Ok(Outcome::Render) => {
                print!("{}", render::asset_page(&screen.visible(), screen.list().state()))
            }
            Ok(Outcome::Message(message)) => println!("{message}"),
            Ok(Outcome::Quit) => break,
            Err(err) => println!("{}", err.message),
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
