use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::API_BASE_ENV;
use services::{AddressBar, BackendConfig, HttpQuizBackend, MemoryAddressBar, QuizBackend};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use ui::{App, UiApp, build_app_context};

const PAGE_URL_ENV: &str = "QUIZ_PAGE_URL";
const DEFAULT_PAGE_URL: &str = "http://localhost/";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLocation { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLocation { raw } => write!(f, "invalid --location value: {raw}"),
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
    backend: Arc<HttpQuizBackend>,
    address_bar: Arc<MemoryAddressBar>,
}

impl UiApp for DesktopApp {
    fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend) as Arc<dyn QuizBackend>
    }

    fn address_bar(&self) -> Arc<dyn AddressBar> {
        Arc::clone(&self.address_bar) as Arc<dyn AddressBar>
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    backend: BackendConfig,
    location: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-base <url>] [--location <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-base {}", services::config::DEFAULT_API_BASE);
    eprintln!("  --location {DEFAULT_PAGE_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {API_BASE_ENV}, {PAGE_URL_ENV}, RUST_LOG");
}

impl Args {
    fn from_env() -> Self {
        Self {
            backend: BackendConfig::from_env(),
            location: std::env::var(PAGE_URL_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAGE_URL.to_string()),
        }
    }

    /// Flags override the environment-derived `defaults`.
    fn parse(
        defaults: Self,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Parsed, ArgsError> {
        let mut parsed = defaults;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-base" => {
                    let value = require_value(args, "--api-base")?;
                    parsed.backend = BackendConfig::new(&value);
                }
                "--location" => {
                    let value = require_value(args, "--location")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidLocation { raw: value });
                    }
                    parsed.location = value;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Parsed::Run(parsed))
    }
}

fn init_tracing() {
    let default_level = "info";
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(Args::from_env(), &mut argv).inspect_err(|_| print_usage())? {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();
    tracing::info!(
        api_base = %args.backend.base_url,
        location = %args.location,
        "starting quiz client"
    );

    let app = DesktopApp {
        backend: Arc::new(HttpQuizBackend::new(args.backend)),
        address_bar: Arc::new(MemoryAddressBar::new(args.location)),
    };
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top; keep it a normal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
