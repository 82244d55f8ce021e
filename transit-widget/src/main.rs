use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use transit_widget::backend::TransitBackend;
use transit_widget::mock::MockTransitApi;
use transit_widget::selection::WidgetSize;
use transit_widget::settings::Settings;
use transit_widget::stations::{StationClient, StationClientConfig};
use transit_widget::tripplanner::{TripPlannerClient, TripPlannerConfig};
use transit_widget::web::{AppState, build_schedule, create_router};
use transit_widget::widget::{ConfigStore, WidgetId};

#[derive(Parser)]
#[command(name = "transit-widget", version, about = "Upcoming trips for transit widgets")]
struct Cli {
    /// Serve stations and trips from this directory instead of the live APIs
    #[arg(long, global = true)]
    mock_data: Option<PathBuf>,

    /// Directory holding widget configuration documents
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Print one widget's schedule as JSON
    Schedule {
        #[arg(long, default_value = "default")]
        widget: WidgetId,

        #[arg(long, default_value = "medium")]
        size: WidgetSize,
    },
    /// Manage widget configurations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List stored configurations
    List,
    /// Show the configuration a widget would use
    Show { id: WidgetId },
    /// Write the default configuration for a widget
    Create {
        id: WidgetId,
        /// Replace an existing configuration
        #[arg(long)]
        overwrite: bool,
    },
    /// Delete a widget's configuration
    Delete { id: WidgetId },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transit_widget=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    let store = ConfigStore::new(cli.config_dir.unwrap_or(settings.config_dir.clone()));

    match cli.command {
        Commands::Serve { bind } => {
            let backend = backend(&settings, cli.mock_data.as_ref())?;
            let addr = bind.unwrap_or(settings.bind_addr);

            info!(
                %addr,
                config_dir = %store.dir().display(),
                mock = backend.is_mock(),
                "Transit widget listening"
            );

            let app = create_router(AppState::new(backend, store));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Schedule { widget, size } => {
            let backend = backend(&settings, cli.mock_data.as_ref())?;
            let now = Local::now().naive_local();
            let loaded = store.load(&widget)?;
            let response = build_schedule(&backend, widget, loaded, size, now).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Config { action } => match action {
            ConfigAction::List => {
                let widgets = store.list()?;
                if widgets.is_empty() {
                    println!("No widget configurations in {}", store.dir().display());
                }
                for w in widgets {
                    println!(
                        "{}: {} -> {} ({})",
                        w.id, w.config.departure, w.config.arrival, w.config.travel_mode
                    );
                }
            }
            ConfigAction::Show { id } => {
                let loaded = store.load(&id)?;
                println!("{}", serde_json::to_string_pretty(&loaded)?);
            }
            ConfigAction::Create { id, overwrite } => {
                store.create(&id, overwrite)?;
                println!("Created {}", store.widget_path(&id).display());
            }
            ConfigAction::Delete { id } => {
                store.delete(&id)?;
                println!("Deleted configuration for widget {id}");
            }
        },
    }

    Ok(())
}

/// Live clients from settings, or the mock when a data directory is given.
fn backend(
    settings: &Settings,
    mock_data: Option<&PathBuf>,
) -> Result<TransitBackend, Box<dyn Error>> {
    if let Some(dir) = mock_data {
        return Ok(TransitBackend::Mock(MockTransitApi::new(dir)?));
    }

    let mut station_config =
        StationClientConfig::new(&settings.trippoint_api_key, &settings.trippoint_app_id);
    if let Some(url) = &settings.trippoint_base_url {
        station_config = station_config.with_base_url(url);
    }

    let mut trip_config = TripPlannerConfig::new();
    if let Some(url) = &settings.tripplanner_base_url {
        trip_config = trip_config.with_base_url(url);
    }

    Ok(TransitBackend::Live {
        stations: StationClient::new(station_config)?,
        trips: TripPlannerClient::new(trip_config)?,
    })
}
