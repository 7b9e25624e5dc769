use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shift_board_config::{ConfigValidator, ShiftBoardConfig};
use shift_board_data::{
    AcceptOutcome, Dashboard, Notice, RequestDraft, RequestListView, ReqwestTransport,
};
use shift_board_shared::{RequestId, StatusFilterMode};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "shift-board")]
#[command(about = "Shift roster and swap request board", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (yaml, toml or json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Published roster CSV
    #[arg(long, env = "SHIFT_BOARD_CSV_URL")]
    csv_url: Option<String>,

    /// Request store endpoint
    #[arg(long, env = "SHIFT_BOARD_WEBAPP_URL")]
    webapp_url: Option<String>,

    /// Ask the request store for open requests only
    #[arg(long)]
    server_status_filter: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the roster table
    Roster {
        /// Case-insensitive name substring
        #[arg(short, long, default_value = "")]
        name: String,
        /// Exact shift label, e.g. Frühschicht
        #[arg(short, long, default_value = "")]
        shift: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print calendar events as JSON
    Events {
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        shift: String,
    },
    /// List open and accepted requests
    Requests,
    /// Submit a new request
    Add {
        #[arg(long)]
        name: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Shift code, e.g. EF
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Accept an open request
    Accept {
        #[arg(long)]
        id: String,
        #[arg(long)]
        accepter: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(&cli)?;
    let dashboard = Dashboard::new(ReqwestTransport::new(), &config)?;

    match cli.command {
        Commands::Roster { name, shift, json } => {
            load_roster(&dashboard, &name, &shift).await?;
            let table = dashboard.with_session(|s| s.table());
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!("{}", table.headers.join("\t"));
                for row in &table.rows {
                    println!("{}", row.join("\t"));
                }
            }
        }
        Commands::Events { name, shift } => {
            load_roster(&dashboard, &name, &shift).await?;
            let update = dashboard.with_session(|s| s.render_calendar());
            println!("{}", serde_json::to_string_pretty(update.events())?);
        }
        Commands::Requests => {
            if let Err(e) = dashboard.refresh_requests().await {
                warn!("Request lists unavailable: {e}");
            }
            let view = dashboard.with_session(|s| s.request_view());
            print_list("Offene Anfragen", &view.open);
            print_list("Angenommene Anfragen", &view.accepted);
        }
        Commands::Add {
            name,
            date,
            code,
            note,
        } => {
            let draft = RequestDraft::new(&name, &date, &code, &note);
            let notice = match dashboard.submit_request(&draft).await {
                Ok(id) => Notice::request_sent(&id),
                Err(e) => Notice::send_failed(&e),
            };
            report(notice)?;
        }
        Commands::Accept { id, accepter } => {
            match dashboard.accept_request(&RequestId::new(id), &accepter).await {
                Ok(AcceptOutcome::Accepted) => report(Notice::accepted())?,
                Ok(AcceptOutcome::Skipped) => warn!("Nothing sent: id and accepter are required"),
                Err(e) => report(Notice::accept_failed(&e))?,
            }
        }
    }

    Ok(())
}

/// Config file first, then command line and environment overrides
fn resolve_config(cli: &Cli) -> Result<ShiftBoardConfig> {
    let mut config = match &cli.config {
        Some(path) => ShiftBoardConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ShiftBoardConfig::new("", ""),
    };

    if let Some(url) = &cli.csv_url {
        config.csv_url = url.clone();
    }
    if let Some(url) = &cli.webapp_url {
        config.webapp_url = url.clone();
    }
    if cli.server_status_filter {
        config.status_filter = StatusFilterMode::Server;
    }

    ConfigValidator::validate(&config).context("Invalid configuration")?;
    debug!("Using roster {} and request store {}", config.csv_url, config.webapp_url);

    Ok(config)
}

async fn load_roster(
    dashboard: &Dashboard<ReqwestTransport>,
    name: &str,
    shift: &str,
) -> Result<()> {
    if let Err(e) = dashboard.load_roster().await {
        bail!(Notice::roster_failed(&e).message);
    }

    dashboard.with_session(|s| {
        s.set_name_filter(name);
        s.set_shift_filter(shift);
        info!(
            "{} of {} roster records match",
            s.visible_records().len(),
            s.roster().len()
        );
    });
    Ok(())
}

fn print_list(title: &str, list: &RequestListView) {
    println!("{title}:");
    match list {
        RequestListView::Placeholder { message } => println!("  {message}"),
        RequestListView::Items { items } => {
            for item in items {
                print!("  [{}] {} {} {}", item.id, item.date, item.name, item.detail);
                match &item.status_line {
                    Some(status) => println!(" | {status}"),
                    None => println!(),
                }
            }
        }
    }
}

fn report(notice: Notice) -> Result<()> {
    if notice.is_error() {
        bail!(notice.message);
    }
    println!("{}", notice.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flags_build_config() {
        let cli = parse(&[
            "shift-board",
            "--csv-url",
            "https://example.org/roster.csv",
            "--webapp-url",
            "https://example.org/exec",
            "--server-status-filter",
            "requests",
        ]);

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.csv_url, "https://example.org/roster.csv");
        assert_eq!(config.status_filter, StatusFilterMode::Server);
        assert!(matches!(cli.command, Commands::Requests));
    }

    #[test]
    fn test_missing_urls_are_rejected() {
        let cli = Cli {
            command: Commands::Requests,
            config: None,
            csv_url: Some("https://example.org/r.csv".to_string()),
            webapp_url: None,
            server_status_filter: false,
            debug: false,
        };

        let err = resolve_config(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("webapp_url"));
    }

    #[test]
    fn test_add_requires_fields() {
        assert!(Cli::try_parse_from(["shift-board", "add", "--name", "Anna"]).is_err());

        let cli = parse(&[
            "shift-board", "add", "--name", "Anna", "--date", "2024-05-01", "--code", "EF",
        ]);
        match cli.command {
            Commands::Add { note, .. } => assert_eq!(note, ""),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_error_notice_fails_command() {
        assert!(report(Notice::error("Fehler beim Senden: locked")).is_err());
        assert!(report(Notice::accepted()).is_ok());
    }
}
