use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use triplog::{
    AppConfig, CanvasSize, FontAsset, HoursPolicy, HttpTripSource, LogSheetRenderer,
    LogSheetTemplate, OrsDirectionsClient, RenderOpts, RouteComposer, Trip, WaypointRole,
};

#[derive(Parser, Debug)]
#[command(name = "triplog", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one PNG log sheet per daily log entry.
    Logs(LogsArgs),
    /// Fetch the driving route and write it as a GeoJSON LineString.
    Route(RouteArgs),
    /// Print the ordered routing waypoints as JSON.
    Waypoints(WaypointsArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TripInput {
    /// Trip JSON file.
    #[arg(long)]
    trip: Option<PathBuf>,

    /// Trip id in the data store (`TRIPLOG_TRIPS_URL`).
    #[arg(long)]
    trip_id: Option<u64>,
}

#[derive(Parser, Debug)]
struct LogsArgs {
    #[command(flatten)]
    input: TripInput,

    /// Blank log-sheet template (PNG, JPEG or SVG). Defaults to `TRIPLOG_TEMPLATE_PATH`.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Font for text fields. Defaults to `TRIPLOG_FONT_PATH`; without one, text is left blank.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Canvas width in pixels; height follows a 9:16 ratio.
    #[arg(long)]
    width: Option<u32>,

    /// What to do with days whose hours do not add up: flag, reject or tolerate.
    #[arg(long, default_value = "flag")]
    hours_policy: HoursPolicy,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct RouteArgs {
    #[command(flatten)]
    input: TripInput,

    /// Output GeoJSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WaypointsArgs {
    #[command(flatten)]
    input: TripInput,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Logs(args) => cmd_logs(&config, args).await,
        Command::Route(args) => cmd_route(&config, args).await,
        Command::Waypoints(args) => cmd_waypoints(&config, args).await,
    }
}

async fn read_trip(config: &AppConfig, input: &TripInput) -> anyhow::Result<Trip> {
    match (&input.trip, input.trip_id) {
        (Some(path), _) => {
            Trip::from_path(path).with_context(|| format!("read trip '{}'", path.display()))
        }
        (None, Some(id)) => {
            let source = HttpTripSource::new(&config.trips_url, config.http_timeout)?;
            source
                .fetch_trip(id)
                .await
                .with_context(|| format!("fetch trip {id} from {}", config.trips_url))
        }
        (None, None) => anyhow::bail!("either --trip or --trip-id is required"),
    }
}

async fn cmd_logs(config: &AppConfig, args: LogsArgs) -> anyhow::Result<()> {
    let trip = read_trip(config, &args.input).await?;

    let template_path = args
        .template
        .or_else(|| config.template_path.clone())
        .context("no template: pass --template or set TRIPLOG_TEMPLATE_PATH")?;
    let template = LogSheetTemplate::from_path(&template_path)
        .with_context(|| format!("load template '{}'", template_path.display()))?;

    let canvas = match args.width {
        Some(w) => CanvasSize::for_width(w)?,
        None => config.canvas,
    };
    let opts = RenderOpts {
        canvas,
        hours_policy: args.hours_policy,
    };
    let mut renderer = match args.font.or_else(|| config.font_path.clone()) {
        Some(font_path) => {
            let font = FontAsset::from_path(&font_path)
                .with_context(|| format!("load font '{}'", font_path.display()))?;
            LogSheetRenderer::with_font(&template, opts, &font)?
        }
        None => LogSheetRenderer::new(&template, opts)?,
    };

    let set = renderer.render_all_daily_logs(&trip)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for image in set.iter() {
        let path = image.write_to_dir(&args.out_dir)?;
        if !image.audit().is_plausible() {
            eprintln!("flagged {}: {}", path.display(), image.audit().describe());
        }
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

async fn cmd_route(config: &AppConfig, args: RouteArgs) -> anyhow::Result<()> {
    let trip = read_trip(config, &args.input).await?;
    let client = OrsDirectionsClient::new(
        &config.directions_url,
        &config.ors_api_key,
        config.http_timeout,
    )?;
    let composer = RouteComposer::new(client);

    let outcome = composer
        .compose(&trip)
        .await
        .context("trip has no start/end coordinates yet")?;
    let path = match outcome.value {
        Ok(path) => path,
        Err(e) => {
            let message = e.user_message();
            return Err(anyhow::Error::new(e).context(message));
        }
    };

    let geojson = serde_json::to_string_pretty(&path.to_geojson())?;
    write_or_print(args.out.as_deref(), &geojson)
}

#[derive(serde::Serialize)]
struct WaypointOut {
    role: WaypointRole,
    lat: Option<f64>,
    lon: Option<f64>,
}

async fn cmd_waypoints(config: &AppConfig, args: WaypointsArgs) -> anyhow::Result<()> {
    let trip = read_trip(config, &args.input).await?;
    let waypoints = triplog::build_waypoints(&trip)?;
    let out: Vec<WaypointOut> = waypoints
        .iter()
        .map(|w| WaypointOut {
            role: w.role,
            lat: w.lat,
            lon: w.lon,
        })
        .collect();
    write_or_print(None, &serde_json::to_string_pretty(&out)?)
}

fn write_or_print(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
