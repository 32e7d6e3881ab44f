//! Command line interface
//!
//! Every user flow is a subcommand. Results go to stdout, logs to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::format::{format_distance, format_duration, format_elevation, format_gradient, format_minutes};
use crate::models::{MergeOptions, RaceUpdate};
use crate::profile::{downsample, parse_profile, summarize, MAX_PROFILE_POINTS};
use crate::services::{admin, aid_station, analysis, contact, merge, recovery, roadbook, share, upload};
use crate::store::{StateStore, TokenStore};
use crate::validation::forms::{parse_distance_km, validate_custom_pace};
use crate::validation::{format_validation_error, validate_gpx_file, ClimbFilter, FileSource, LocalFile};

#[derive(Debug, Parser)]
#[command(name = "gpxify")]
#[command(version, about = "Validate, upload, merge and plan GPX tracks for trail running", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL, overrides GPXIFY_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Show technical details on unexpected errors
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check GPX files locally without uploading them
    Validate {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Content type to check, as a browser would report it
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Validate a GPX file, upload it and select it
    Upload {
        file: PathBuf,
    },

    /// Check that the backend answers
    Ping,

    /// Manage loaded files
    Files {
        #[command(subcommand)]
        action: Option<FilesAction>,
    },

    /// Elevation profile of a local GPX file
    Profile {
        file: PathBuf,

        /// Maximum number of points printed
        #[arg(long, default_value_t = MAX_PROFILE_POINTS)]
        max_points: usize,
    },

    /// Export a kilometre range of the selected track
    ExportSegment {
        #[arg(long)]
        start: f64,

        #[arg(long)]
        end: f64,

        /// Output file, defaults to a name derived from the track
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect climbs on the selected track
    Climbs(ClimbArgs),

    /// Plan aid stations and generate the segment table
    AidStations {
        #[command(subcommand)]
        action: AidStationAction,
    },

    /// Merge GPX files into one track
    Merge(MergeArgs),

    /// Rebuild a race trace that stopped early
    Recover {
        /// Recording that stopped early
        #[arg(long)]
        incomplete: PathBuf,

        /// Official course
        #[arg(long)]
        official: PathBuf,

        /// Official finish time, HH:MM:SS or MM:SS
        #[arg(long)]
        time: String,

        /// Approximate distance reached, in km
        #[arg(long)]
        distance: Option<f64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Share the current state or open a shared one
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Passage times and roadbook for a published race
    Roadbook {
        #[command(subcommand)]
        action: RoadbookAction,
    },

    /// Race administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Send a message to the site owner
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Message text, 10 to 2000 characters
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FilesAction {
    /// List loaded files (default)
    List,
    /// Select a file by id or name
    Select { file: String },
    /// Remove a file by id or name
    Remove { file: String },
    /// Remove every file
    Clear,
}

#[derive(Debug, Args)]
pub struct ClimbArgs {
    /// Minimum D+ in meters
    #[arg(long, default_value_t = 10.0)]
    pub min_gain: f64,

    /// Minimum length in km
    #[arg(long, default_value_t = 0.1)]
    pub min_distance: f64,

    /// Minimum average gradient in percent
    #[arg(long, default_value_t = 1.0)]
    pub min_gradient: f64,
}

#[derive(Debug, Subcommand)]
pub enum AidStationAction {
    /// List planned stations
    List,
    /// Add a station; the list stays ordered by distance
    Add {
        name: String,
        /// Distance in km, `12.5` or `12,5`
        distance: String,
    },
    /// Remove the station at a position (0-based)
    Remove { index: usize },
    /// Remove every station
    Clear,
    /// Generate the table for the selected track
    Generate {
        /// Flat pace in km/h instead of Naismith's rule
        #[arg(long)]
        pace: Option<String>,
    },
    /// Write the last generated table as CSV
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the track cut at every segment of the last table
    Segments,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Files in merge order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Name of the merged track
    #[arg(long)]
    pub name: String,

    /// Move a file before merging, `FROM:TO` (0-based, repeatable)
    #[arg(long = "move", value_parser = parse_move)]
    pub moves: Vec<(usize, usize)>,

    /// Gap above which points are interpolated, in seconds
    #[arg(long, default_value_t = 300)]
    pub gap_threshold: u32,

    /// Keep gaps as they are
    #[arg(long)]
    pub no_interpolate: bool,

    /// Order points by timestamp
    #[arg(long)]
    pub sort_by_time: bool,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ShareAction {
    /// Publish the current state and print its link
    Save,
    /// Replace the local state with a shared one
    Load { share_id: String },
    /// Print a shared state without loading it
    Show { share_id: String },
    /// Delete a share
    Delete { share_id: String },
}

#[derive(Debug, Subcommand)]
pub enum RoadbookAction {
    /// List published races
    Races,
    /// Passage times for a race
    Show(RoadbookArgs),
}

#[derive(Debug, Args)]
pub struct RoadbookArgs {
    pub slug: String,

    /// Local departure, e.g. 2026-08-29T06:00
    #[arg(long, value_parser = parse_departure)]
    pub departure: NaiveDateTime,

    /// Flat pace in km/h, between 1 and 60
    #[arg(long, value_parser = parse_pace)]
    pub pace: Option<f64>,

    /// Flasks carried by default
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub flasks: u8,

    /// Flasks at one station, `POSITION=COUNT` with POSITION 0-based (repeatable)
    #[arg(long = "station-flasks", value_parser = parse_station_flasks)]
    pub station_flasks: Vec<(usize, u8)>,

    /// Note for a station, `KEY=TEXT` with KEY its id or position (repeatable)
    #[arg(long = "note", value_parser = parse_note)]
    pub notes: Vec<(String, String)>,

    /// Who the roadbook is for: runner or assistance
    #[arg(long, default_value = "runner")]
    pub mode: roadbook::ExportMode,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Open an admin session
    Login {
        /// Password; read from GPXIFY_ADMIN_PASSWORD when omitted
        #[arg(long, env = "GPXIFY_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Close the admin session
    Logout,
    /// List every race, drafts included
    Races,
    /// Show one race
    Race { id: String },
    /// Create a race from a GPX file
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        gpx: PathBuf,
        #[arg(long)]
        description: Option<String>,
        /// Free-text aid station table to parse
        #[arg(long)]
        ravitos: Option<PathBuf>,
        #[arg(long)]
        publish: bool,
    },
    /// Update a race
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        gpx: Option<PathBuf>,
        #[arg(long, conflicts_with = "unpublish")]
        publish: bool,
        #[arg(long)]
        unpublish: bool,
    },
    /// Delete a race
    Delete { id: String },
    /// Parse a free-text aid station table
    ParseTable { file: PathBuf },
}

fn parse_move(raw: &str) -> Result<(usize, usize), String> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{raw}'"))?;
    let from = from.trim().parse().map_err(|_| format!("invalid position '{from}'"))?;
    let to = to.trim().parse().map_err(|_| format!("invalid position '{to}'"))?;
    Ok((from, to))
}

fn parse_pace(raw: &str) -> Result<f64, String> {
    validate_custom_pace(raw.trim()).map_err(|e| e.to_string())
}

fn parse_note(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, text)| (key.trim().to_string(), text.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=TEXT, got '{raw}'"))
}

fn parse_station_flasks(raw: &str) -> Result<(usize, u8), String> {
    let (index, count) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected POSITION=COUNT, got '{raw}'"))?;
    let index = index.trim().parse().map_err(|_| format!("invalid position '{index}'"))?;
    match count.trim().parse() {
        Ok(count @ 1..=3) => Ok((index, count)),
        _ => Err(format!("flask count must be 1, 2 or 3, got '{count}'")),
    }
}

fn parse_departure(raw: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got '{raw}'"))
}

/// Everything a command needs
pub struct Context {
    pub config: Config,
    pub store: StateStore,
    pub tokens: TokenStore,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            store: StateStore::new(config.state_file()),
            tokens: TokenStore::new(config.admin_token_file()),
            config,
        }
    }

    fn api(&self) -> AppResult<ApiClient> {
        Ok(ApiClient::from_config(&self.config)?)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    println!("Written {}", path.display());
    Ok(())
}

/// Run one command
pub async fn run(command: Commands, ctx: &Context) -> AppResult<()> {
    match command {
        Commands::Validate { files, content_type } => run_validate(&files, content_type.as_deref()),
        Commands::Upload { file } => {
            let file = LocalFile::open(&file)?;
            let outcome = upload::upload_file(&ctx.api()?, &ctx.store, &file).await?;
            for warning in &outcome.warnings {
                println!("Warning: {warning}");
            }
            print_file_summary(&outcome.file);
            Ok(())
        }
        Commands::Ping => {
            let api = ctx.api()?;
            let info = api.test_connection().await?;
            println!("{}: {} (version {})", api.base_url(), info.message, info.version);
            Ok(())
        }
        Commands::Files { action } => run_files(action.unwrap_or(FilesAction::List), ctx),
        Commands::Profile { file, max_points } => run_profile(&file, max_points),
        Commands::ExportSegment { start, end, output } => {
            let state = ctx.store.load()?;
            let (name, gpx) = analysis::export_segment(&ctx.api()?, &state, start, end).await?;
            write_output(&output.unwrap_or_else(|| PathBuf::from(name)), &gpx)
        }
        Commands::Climbs(args) => {
            let filter = ClimbFilter {
                min_elevation_gain: args.min_gain,
                min_distance_km: args.min_distance,
                min_gradient: args.min_gradient,
            };
            let state = ctx.store.load()?;
            let climbs = analysis::detect_climbs(&ctx.api()?, &state, &filter).await?;
            if climbs.is_empty() {
                println!("No climb matches these thresholds.");
            }
            for climb in climbs {
                println!(
                    "{:<7} km {:>6.2} -> {:>6.2}  {}  D+ {}  {}",
                    climb.type_label(),
                    climb.start_km,
                    climb.end_km,
                    format_distance(climb.distance_km),
                    format_elevation(climb.elevation_gain),
                    format_gradient(climb.avg_gradient),
                );
            }
            Ok(())
        }
        Commands::AidStations { action } => run_aid_stations(action, ctx).await,
        Commands::Merge(args) => run_merge(args, ctx).await,
        Commands::Recover {
            incomplete,
            official,
            time,
            distance,
            output,
        } => {
            let form = recovery::RecoveryForm {
                incomplete_gpx: &incomplete,
                official_gpx: &official,
                official_time: &time,
                approx_distance_km: distance,
            };
            let (name, gpx) = recovery::recover(&ctx.api()?, &form).await?;
            write_output(&output.unwrap_or_else(|| PathBuf::from(name)), &gpx)
        }
        Commands::Share { action } => run_share(action, ctx).await,
        Commands::Roadbook { action } => run_roadbook(action, ctx).await,
        Commands::Admin { action } => run_admin(action, ctx).await,
        Commands::Contact { name, email, message } => {
            let response = contact::send(&ctx.api()?, &name, &email, &message).await?;
            println!("{}", response.message.as_deref().unwrap_or("Message sent."));
            Ok(())
        }
    }
}

fn run_validate(files: &[PathBuf], content_type: Option<&str>) -> AppResult<()> {
    let mut failures = 0;

    for path in files {
        let mut file = LocalFile::open(path)?;
        if let Some(content_type) = content_type {
            file = file.with_content_type(content_type);
        }

        let result = validate_gpx_file(&file);
        if result.valid {
            println!("{}: valid", path.display());
            for warning in result.warnings() {
                println!("  warning: {warning}");
            }
        } else {
            failures += 1;
            println!("{}: {}", path.display(), format_validation_error(&result));
        }
    }

    if failures == 0 {
        Ok(())
    } else {
        Err(AppError::invalid_file(&format!("{failures} of {} files are invalid", files.len())))
    }
}

fn print_file_summary(file: &crate::store::GpxFileData) {
    println!("{} [{}]", file.name, file.id);
    for track in &file.data.tracks {
        let stats = &track.statistics;
        println!(
            "  {}: {}, D+ {}, D- {}, {} points",
            track.display_name(),
            format_distance(track.total_distance_km()),
            format_elevation(stats.total_elevation_gain),
            format_elevation(stats.total_elevation_loss),
            track.points.len(),
        );
        if let Some(seconds) = stats.duration {
            println!("  Duration: {}", format_duration(seconds / 60.0));
        }
    }
}

fn run_files(action: FilesAction, ctx: &Context) -> AppResult<()> {
    match action {
        FilesAction::List => {
            let state = ctx.store.load()?;
            if state.files.is_empty() {
                println!("No file loaded.");
            }
            for file in &state.files {
                let marker = if state.selected_file_id.as_deref() == Some(file.id.as_str()) { "*" } else { " " };
                print!("{marker} ");
                print_file_summary(file);
            }
            Ok(())
        }
        FilesAction::Select { file } => {
            ctx.store.update(|state| {
                let id = state
                    .find_file(&file)
                    .map_or_else(|| file.clone(), |f| f.id.clone());
                state.select_file(&id)
            })?;
            Ok(())
        }
        FilesAction::Remove { file } => {
            let removed = ctx.store.update(|state| {
                let id = state.find_file(&file).map(|f| f.id.clone());
                Ok(id.and_then(|id| state.remove_file(&id)))
            })?;
            match removed {
                Some(f) => {
                    println!("Removed {}", f.name);
                    Ok(())
                }
                None => Err(AppError::NotFound(format!("No loaded file matches '{file}'"))),
            }
        }
        FilesAction::Clear => {
            ctx.store.update(|state| {
                state.clear_files();
                Ok(())
            })?;
            Ok(())
        }
    }
}

fn run_profile(path: &Path, max_points: usize) -> AppResult<()> {
    let file = LocalFile::open(path)?;
    let content = String::from_utf8_lossy(&file.read_all()?).into_owned();
    let points = parse_profile(&content)?;

    if let Some(summary) = summarize(&points) {
        println!(
            "{}: {}, elevation {} to {}",
            file.name(),
            format_distance(summary.total_distance_km),
            format_elevation(summary.min_elevation),
            format_elevation(summary.max_elevation),
        );
    }

    println!("distance_km,elevation_m");
    for point in downsample(&points, max_points) {
        println!("{:.3},{:.1}", point.distance_km, point.elevation);
    }
    Ok(())
}

async fn run_aid_stations(action: AidStationAction, ctx: &Context) -> AppResult<()> {
    match action {
        AidStationAction::List => {
            let state = ctx.store.load()?;
            for (index, station) in state.aid_stations.iter().enumerate() {
                println!("{index:>3}  {:<30} {}", station.name, format_distance(station.distance_km));
            }
            if let Some(table) = &state.aid_station_table {
                println!();
                print_table(table);
            }
            Ok(())
        }
        AidStationAction::Add { name, distance } => {
            let km = parse_distance_km(&distance)?;
            let station = aid_station::add_station(&ctx.store, &name, km)?;
            println!("Added {} at {}", station.name, format_distance(station.distance_km));
            Ok(())
        }
        AidStationAction::Remove { index } => {
            let removed = aid_station::remove_station(&ctx.store, index)?;
            println!("Removed {}", removed.name);
            Ok(())
        }
        AidStationAction::Clear => {
            ctx.store.update(|state| {
                state.clear_aid_stations();
                Ok(())
            })?;
            Ok(())
        }
        AidStationAction::Generate { pace } => {
            let use_naismith = pace.is_none();
            let table = aid_station::generate_table(
                &ctx.api()?,
                &ctx.store,
                use_naismith,
                pace.as_deref().unwrap_or_default(),
            )
            .await?;
            print_table(&table);
            Ok(())
        }
        AidStationAction::Export { output } => {
            let state = ctx.store.load()?;
            let table = state
                .aid_station_table
                .as_ref()
                .ok_or_else(|| AppError::precondition("No table generated yet. Run `gpxify aid-stations generate`."))?;
            let path = output.unwrap_or_else(|| PathBuf::from(aid_station::CSV_FILE_NAME));
            write_output(&path, aid_station::table_to_csv(table).as_bytes())
        }
        AidStationAction::Segments => {
            let state = ctx.store.load()?;
            let track = aid_station::require_table_inputs(&state)?;
            let table = state
                .aid_station_table
                .as_ref()
                .ok_or_else(|| AppError::precondition("No table generated yet."))?;
            for segment in aid_station::segment_tracks(track, table) {
                println!(
                    "{}: {} points, {}",
                    segment.display_name(),
                    segment.points.len(),
                    format_distance(segment.total_distance_km()),
                );
            }
            Ok(())
        }
    }
}

fn print_table(table: &crate::models::AidStationTableResponse) {
    for (index, segment) in table.segments.iter().enumerate() {
        println!(
            "{:<20} -> {:<20} {:>10}  D+ {:>6}  D- {:>6}  {:>6}  {:>6}  {:>6}",
            segment.from_station,
            segment.to_station,
            format_distance(segment.distance_km),
            format_elevation(segment.elevation_gain),
            format_elevation(segment.elevation_loss),
            format_gradient(segment.avg_gradient),
            format_minutes(segment.estimated_time_minutes),
            format_minutes(Some(table.cumulative_minutes(index))),
        );
    }
    println!(
        "Total: {}, D+ {}, D- {}, {}",
        format_distance(table.total_distance_km),
        format_elevation(table.total_elevation_gain),
        format_elevation(table.total_elevation_loss),
        format_minutes(table.total_time_minutes),
    );
}

async fn run_merge(args: MergeArgs, ctx: &Context) -> AppResult<()> {
    let mut queue = merge::MergeQueue::new();
    for path in &args.files {
        queue.push_local(path)?;
    }
    for (from, to) in args.moves {
        if !queue.move_file(from, to) {
            return Err(AppError::precondition(&format!("Cannot move file {from} to {to}")));
        }
    }

    let options = MergeOptions {
        gap_threshold_seconds: args.gap_threshold,
        interpolate_gaps: !args.no_interpolate,
        sort_by_time: args.sort_by_time,
    };

    let outcome = merge::merge(&ctx.api()?, &queue, options, &args.name).await?;
    for warning in &outcome.warnings {
        println!("Warning: {warning}");
    }

    let path = args.output_dir.unwrap_or_default().join(&outcome.filename);
    write_output(&path, outcome.gpx.as_bytes())
}

async fn run_share(action: ShareAction, ctx: &Context) -> AppResult<()> {
    let api = ctx.api()?;
    match action {
        ShareAction::Save => {
            let response = share::save(&api, &ctx.store).await?;
            println!("{}", share::share_link(&ctx.config.frontend_url, &response));
            println!("Expires at {}", response.expires_at);
        }
        ShareAction::Load { share_id } => {
            let state = share::load(&api, &ctx.store, &share_id).await?;
            println!("Loaded {} files and {} aid stations", state.files.len(), state.aid_stations.len());
        }
        ShareAction::Show { share_id } => {
            let (response, _) = share::fetch(&api, &share_id).await?;
            println!("{}", serde_json::to_string_pretty(&response.state_json)?);
        }
        ShareAction::Delete { share_id } => {
            share::delete(&api, &share_id).await?;
            println!("Deleted share {share_id}");
        }
    }
    Ok(())
}

async fn run_roadbook(action: RoadbookAction, ctx: &Context) -> AppResult<()> {
    let api = ctx.api()?;
    match action {
        RoadbookAction::Races => {
            for race in api.published_races().await? {
                println!(
                    "{:<30} {:<30} {}",
                    race.slug,
                    race.name,
                    race.total_distance_km.map(format_distance).unwrap_or_default()
                );
            }
            Ok(())
        }
        RoadbookAction::Show(args) => {
            let race = roadbook::find_race(&api, &args.slug).await?;

            let mut config = roadbook::RunnerConfig::new(args.departure);
            config.flask_capacity = args.flasks;
            config.pace_override = args.pace;
            config.flask_capacities = args.station_flasks.into_iter().collect();
            config.notes = args.notes.into_iter().collect();

            let passages = roadbook::passage_times(&race, &config)?;
            let sun = roadbook::sun_times_for(&api, &race, &config).await;
            let text = roadbook::render(&race, &config, &passages, sun.as_ref(), args.mode);

            match args.output {
                Some(path) => write_output(&path, text.as_bytes()),
                None => {
                    print!("{text}");
                    Ok(())
                }
            }
        }
    }
}

async fn run_admin(action: AdminAction, ctx: &Context) -> AppResult<()> {
    let mut session = admin::session(ctx.api()?, &ctx.tokens, ctx.config.admin_token.clone())?;

    match action {
        AdminAction::Login { password } => {
            admin::login(&mut session, &ctx.tokens, &password).await?;
            println!("Logged in.");
        }
        AdminAction::Logout => {
            admin::logout(&mut session, &ctx.tokens).await?;
            println!("Logged out.");
        }
        AdminAction::Races => {
            for race in session.list_races().await? {
                let status = if race.is_published { "published" } else { "draft" };
                println!("{:<38} {:<30} {:<30} {status}", race.id, race.slug, race.name);
            }
        }
        AdminAction::Race { id } => {
            let race = session.get_race(&id).await?;
            println!("{}", serde_json::to_string_pretty(&race)?);
        }
        AdminAction::Create {
            name,
            slug,
            gpx,
            description,
            ravitos,
            publish,
        } => {
            let aid_stations = match ravitos {
                Some(path) => {
                    let table = session.parse_ravito_table(&fs::read_to_string(path)?).await?;
                    for warning in &table.warnings {
                        println!("Warning: {warning}");
                    }
                    table.into_race_aid_stations()
                }
                None => Vec::new(),
            };

            let body = admin::build_race(admin::RaceDraft {
                name: &name,
                slug: &slug,
                description: description.as_deref(),
                gpx_path: &gpx,
                is_published: publish,
                aid_stations,
            })?;
            let race = session.create_race(&body).await?;
            println!("Created {} [{}]", race.name, race.id);
        }
        AdminAction::Update {
            id,
            name,
            slug,
            description,
            gpx,
            publish,
            unpublish,
        } => {
            if let Some(slug) = &slug {
                crate::validation::forms::validate_slug(slug)?;
            }
            let gpx_content = match gpx {
                Some(path) => Some(String::from_utf8_lossy(&LocalFile::open(&path)?.read_all()?).into_owned()),
                None => None,
            };
            let update = RaceUpdate {
                name,
                slug,
                description,
                gpx_content,
                is_published: (publish || unpublish).then_some(publish),
                aid_stations: None,
            };
            let race = session.update_race(&id, &update).await?;
            println!("Updated {} [{}]", race.name, race.id);
        }
        AdminAction::Delete { id } => {
            session.delete_race(&id).await?;
            println!("Deleted race {id}");
        }
        AdminAction::ParseTable { file } => {
            let table = session.parse_ravito_table(&fs::read_to_string(file)?).await?;
            for warning in &table.warnings {
                println!("Warning: {warning}");
            }
            for (index, station) in table.into_race_aid_stations().iter().enumerate() {
                println!(
                    "{:>3}  {:<30} {:>10}  {}",
                    index + 1,
                    station.name,
                    format_distance(station.distance_km),
                    station.station_type.display_name(),
                );
            }
        }
    }
    Ok(())
}
