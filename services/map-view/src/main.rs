//! Map view pipeline driver.
//!
//! Runs the full ingestion-to-interaction pipeline against a headless
//! engine: loads both datasets (their completion order is not guaranteed,
//! and the view tolerates either finishing first), renders the facility
//! layers, and reports a sample click so the wiring can be inspected from
//! the logs.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::RwLock;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ingestion::{load_facilities, Fetcher};
use isochrone::{load_isochrones, CorrelationIndex};
use map_view::{
    HeadlessEngine, InteractionController, MapView, MapViewConfig, SharedIndex, ViewState,
};

#[derive(Parser, Debug)]
#[command(name = "map-view")]
#[command(about = "Facility capacity map pipeline driver")]
struct Args {
    /// Path to a YAML view configuration (defaults apply if omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the facility dataset URI
    #[arg(long)]
    facilities: Option<String>,

    /// Override the isochrone dataset URI
    #[arg(long)]
    isochrones: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(args))?;
    Ok(())
}

async fn async_main(args: Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => MapViewConfig::from_yaml_file(path)?,
        None => MapViewConfig::default(),
    };
    if let Some(uri) = args.facilities {
        config.facility_source.uri = uri;
    }
    if let Some(uri) = args.isochrones {
        config.isochrone_source.uri = uri;
    }
    config.validate()?;

    let fetcher = Arc::new(Fetcher::new()?);
    let index: SharedIndex = Arc::new(RwLock::new(None));

    // The isochrone load starts before the map is ready; nothing below
    // waits for it, clicks before it resolves degrade to lookup misses.
    let iso_task = {
        let fetcher = Arc::clone(&fetcher);
        let index = Arc::clone(&index);
        let source = config.isochrone_source.clone();
        let encoding = source.text_encoding()?;
        tokio::spawn(async move {
            let features = load_isochrones(&fetcher, &source.uri, encoding).await;
            *index.write().await = Some(CorrelationIndex::build(features));
        })
    };

    let correlation_key = config.resolve_correlation_key()?;
    let facility_encoding = config.facility_source.text_encoding()?;
    let facility_delimiter = config.facility_source.field_delimiter()?;
    let facility_uri = config.facility_source.uri.clone();

    let mut view = MapView::new(config);
    view.open(HeadlessEngine::new());

    // Facility load starts on map-ready.
    let facilities =
        load_facilities(&fetcher, &facility_uri, facility_encoding, facility_delimiter).await;

    let mut state = ViewState::new();
    if !facilities.is_empty() {
        view.set_facilities(&facilities)?;
    }
    state.set_facilities(facilities);

    iso_task.await?;

    let controller = InteractionController::new(Arc::clone(&index), correlation_key);
    if let Some(first) = state.facilities().first().cloned() {
        let payload = controller.on_facility_click(&mut view, &mut state, &first).await;
        info!(
            facility = %payload.name,
            occupancy = payload.occupancy_percent,
            impacted_population = payload.impacted_population,
            state = ?view.isochrone_state(),
            "sample click handled"
        );
    }

    info!(
        facilities = state.facilities().len(),
        indexed_polygons = index.read().await.as_ref().map_or(0, |i| i.len()),
        "pipeline complete"
    );

    view.close();
    Ok(())
}
