use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use learn_core::model::CourseId;
use services::{
    AppServices, CatalogService, Clock, DEFAULT_COURSE_ID, ExportService, LearnerService,
    QuizService, SubmitConfig,
};
use storage::repository::ProgressRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCourseId { raw: String },
    MissingFirstName,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCourseId { raw } => write!(f, "invalid --course value: {raw:?}"),
            ArgsError::MissingFirstName => write!(f, "seed requires --first-name"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn learner(&self) -> Arc<LearnerService> {
        self.services.learner()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn export(&self) -> Arc<ExportService> {
        self.services.export()
    }

    fn progress_repository(&self) -> ProgressRepository {
        self.services.storage().progress.clone()
    }

    fn export_dir(&self) -> PathBuf {
        self.services.export_dir().to_path_buf()
    }
}

/// Identity written by `seed`.
#[derive(Debug, Default)]
struct SeedLearner {
    first_name: String,
    last_name: String,
    congregation: String,
    user_code: String,
}

struct Args {
    db_url: String,
    catalog: String,
    course: Option<CourseId>,
    export_dir: PathBuf,
    learner: SeedLearner,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--catalog <dir|url>] [--course <id>]");
    eprintln!("                           [--export-dir <dir>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>] [--catalog <dir|url>] [--course <id>]");
    eprintln!("                           --first-name <name> [--last-name <name>]");
    eprintln!("                           [--congregation <name>] [--user-code <code>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://dev.sqlite3");
    eprintln!("  --catalog .            (reads data/courses.json below it)");
    eprintln!("  --course {DEFAULT_COURSE_ID}   (when nothing is stored yet)");
    eprintln!("  --export-dir           the Downloads folder, else the current directory");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LEARN_DB_URL, LEARN_CATALOG, LEARN_COURSE_ID, LEARN_EXPORT_DIR");
    eprintln!("  LEARN_RESULTS_ENDPOINT   results sheet URL; unset keeps results local");
    eprintln!("  LEARN_FORM_SETTLE_MS     wait after the form fallback (default 3000)");
    eprintln!("  RUST_LOG                 log filter (default info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("LEARN_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://dev.sqlite3".into(), normalize_sqlite_url);
        let mut catalog = std::env::var("LEARN_CATALOG").unwrap_or_else(|_| ".".into());
        let mut course = match std::env::var("LEARN_COURSE_ID") {
            Ok(raw) => Some(parse_course_id(raw)?),
            Err(_) => None,
        };
        let mut export_dir = std::env::var("LEARN_EXPORT_DIR")
            .ok()
            .map_or_else(default_export_dir, PathBuf::from);
        let mut learner = SeedLearner::default();

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--db") => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                (_, "--catalog") => catalog = require_value(args, "--catalog")?,
                (_, "--course") => course = Some(parse_course_id(require_value(args, "--course")?)?),
                (_, "--export-dir") => export_dir = PathBuf::from(require_value(args, "--export-dir")?),
                (Command::Seed, "--first-name") => {
                    learner.first_name = require_value(args, "--first-name")?;
                }
                (Command::Seed, "--last-name") => {
                    learner.last_name = require_value(args, "--last-name")?;
                }
                (Command::Seed, "--congregation") => {
                    learner.congregation = require_value(args, "--congregation")?;
                }
                (Command::Seed, "--user-code") => {
                    learner.user_code = require_value(args, "--user-code")?;
                }
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Seed && learner.first_name.trim().is_empty() {
            return Err(ArgsError::MissingFirstName);
        }

        Ok(Self {
            db_url,
            catalog,
            course,
            export_dir,
            learner,
        })
    }
}

fn parse_course_id(raw: String) -> Result<CourseId, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidCourseId { raw });
    }
    Ok(CourseId::new(trimmed))
}

fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(log_fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the player.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let submit = SubmitConfig::from_env();
    if submit.is_none() {
        tracing::warn!("LEARN_RESULTS_ENDPOINT is not set; results stay on this device");
    }
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        Clock::system(),
        &parsed.catalog,
        parsed.export_dir.clone(),
        submit,
    )
    .await?;

    match cmd {
        Command::Ui => {
            if let Some(course) = parsed.course.as_ref() {
                services.learner().select_course(course).await?;
            }

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Course Player")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let course = match parsed.course {
                Some(course) => course,
                None => services.learner().current_course().await?,
            };
            // Fails early when the catalog cannot serve the course.
            let loaded = services.catalog().load_course(&course).await?;
            let learner = services
                .learner()
                .onboard(
                    &parsed.learner.first_name,
                    &parsed.learner.last_name,
                    &parsed.learner.congregation,
                    &parsed.learner.user_code,
                    &course,
                )
                .await?;
            println!(
                "seeded {} {} on \"{}\" ({course}) in {}",
                learner.first_name,
                learner.last_name,
                loaded.title(),
                parsed.db_url
            );
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // Printed once here; every layer below only returns errors.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
