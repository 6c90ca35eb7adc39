//! pointcast - terminal client for api.weather.gov.
//!
//! Startup: resolve the origin coordinate (flags, then best-effort geocoding,
//! then the continental fallback), enter the alternate screen, and run the
//! event/action/render loop. One initial `Refresh` kicks off the gridpoint
//! and alerts fetches; the forecast chains off the gridpoint result.

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use pointcast::components::{Component, Dashboard, DashboardProps};
use pointcast::logging;
use pointcast::runtime::{EffectContext, Runtime};
use pointcast_core::{
    geocode_place, Action, AppState, Coordinate, Effect, NwsClient, Store, FALLBACK_ORIGIN,
    LOADING_ANIM_TICK_MS,
};

/// Delay before a coordinate change actually hits the points endpoint, so a
/// burst of nudges collapses into one request.
const GRIDPOINT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "pointcast")]
#[command(about = "Pick a coordinate, get the api.weather.gov forecast and alerts")]
struct Args {
    /// Starting latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Starting longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Place name to geocode for the starting coordinate (best-effort)
    #[arg(long, short)]
    place: Option<String>,

    /// State/area code for the alerts query
    #[arg(long, short, default_value = "CA")]
    area: String,

    /// Alerts auto-refresh interval in seconds
    #[arg(long, default_value = "300")]
    refresh_interval: u64,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    logging::init();
    let args = Args::parse();

    let origin = resolve_origin(&args).await;

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, origin, &args).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Flags win; a geocoded place is best-effort and falls back silently.
async fn resolve_origin(args: &Args) -> Coordinate {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        return Coordinate::new(lat, lon);
    }

    if let Some(place) = &args.place {
        match geocode_place(place).await {
            Ok(found) => {
                info!(place = %found.name, lat = found.lat, lon = found.lon, "geocoded start place");
                return Coordinate::new(found.lat, found.lon);
            }
            Err(error) => {
                warn!(%error, "geocoding failed, using fallback origin");
            }
        }
    }

    FALLBACK_ORIGIN
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    origin: Coordinate,
    args: &Args,
) -> io::Result<()> {
    let store = Store::new(AppState::new(origin, &args.area));
    let mut runtime = Runtime::new(store);

    // Spinner animation.
    runtime.subscriptions().interval(
        "tick",
        Duration::from_millis(LOADING_ANIM_TICK_MS),
        || Action::Tick,
    );

    // Alerts auto-refresh; the forecast only refreshes on demand.
    runtime.subscriptions().interval(
        "alerts",
        Duration::from_secs(args.refresh_interval.max(1)),
        || Action::AlertsFetch,
    );

    // Kick off the initial gridpoint + alerts fetches.
    runtime.enqueue(Action::Refresh);

    let client = NwsClient::new();
    let ui = RefCell::new(Dashboard::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                ui.borrow_mut().render(frame, area, DashboardProps { state });
            },
            |event, state| ui.borrow_mut().handle_event(event, DashboardProps { state }),
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

/// Turn reducer effects into keyed fetch tasks. Same-key spawns abort the
/// superseded request; the reducer's key check catches anything that still
/// settles late.
fn handle_effect(client: &NwsClient, effect: Effect, ctx: &mut EffectContext<'_>) {
    match effect {
        Effect::FetchGridpoint { key } => {
            let client = client.clone();
            ctx.tasks().debounce("gridpoint", GRIDPOINT_DEBOUNCE, async move {
                match client.point(key).await {
                    Ok(info) => Action::GridpointDidLoad { key, info },
                    Err(error) => Action::GridpointDidError {
                        key,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::FetchForecast { key } => {
            let client = client.clone();
            ctx.tasks().spawn("forecast", async move {
                match client.forecast(&key).await {
                    Ok(forecast) => Action::ForecastDidLoad { key, forecast },
                    Err(error) => Action::ForecastDidError {
                        key,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::FetchAlerts { area } => {
            let client = client.clone();
            ctx.tasks().spawn("alerts", async move {
                match client.active_alerts(&area).await {
                    Ok(alerts) => Action::AlertsDidLoad { area, alerts },
                    Err(error) => Action::AlertsDidError {
                        area,
                        error: error.to_string(),
                    },
                }
            });
        }
    }
}
