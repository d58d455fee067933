//! Combobox demo - main entry point.
//!
//! Loads the config, resolves a film list through a JSON provider with
//! simulated latency and drives a scripted interaction, printing each
//! rendered frame.

use std::time::Duration;

use combobox_core::{config_path, Rect, SelectConfig, Viewport};
use combobox_ui::{JsonProvider, Keymap, OptionSource, Select, SelectAction};

const FILMS: &str = include_str!("../data/films.json");

/// Simulated network latency of the film endpoint.
const FILM_LATENCY: Duration = Duration::from_millis(300);

// =============================================================================
// Configuration
// =============================================================================

/// Load `config.toml`, falling back to defaults on any problem.
fn load_config() -> SelectConfig {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("{} - using default configuration", e);
            return SelectConfig::default();
        }
    };

    if !path.exists() {
        tracing::info!("No config at {} - using defaults", path.display());
        return SelectConfig::default();
    }

    match SelectConfig::load(&path) {
        Ok(config) => {
            tracing::info!("Config loaded from: {}", path.display());
            config
        }
        Err(e) => {
            tracing::error!("{} - using default configuration", e);
            SelectConfig::default()
        }
    }
}

// =============================================================================
// Demo Script
// =============================================================================

fn print_frame(title: &str, select: &Select) {
    println!("-- {} --", title);
    println!("{}", select.render().to_text());
    println!();
}

async fn type_text(select: &Select, text: &str) {
    let mut typed = String::new();
    for c in text.chars() {
        typed.push(c);
        select.dispatch(SelectAction::Input(typed.clone()));
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
}

async fn run_demo(config: SelectConfig) {
    let close_delay = config.close_delay();
    let resize_debounce = config.resize_debounce();
    let keymap = Keymap::with_defaults();

    let select = Select::new(config).on_change(|label| tracing::info!("Selected: {}", label));
    select.set_layout(
        Rect::new(16.0, 520.0, 320.0, 40.0),
        Viewport::new(1280.0, 720.0),
    );
    select.set_source(OptionSource::provider(JsonProvider::new(FILMS, FILM_LATENCY)));

    print_frame("mounted", &select);

    select.dispatch(SelectAction::Focus);
    print_frame("focused while loading", &select);

    tokio::time::sleep(FILM_LATENCY + Duration::from_millis(50)).await;
    type_text(&select, "god").await;
    print_frame("typed \"god\"", &select);

    for key in ["ArrowDown", "ArrowDown"] {
        select.handle_key(key, &keymap);
    }
    print_frame("arrow down twice", &select);

    select.handle_key("Enter", &keymap);
    print_frame("committed", &select);

    tokio::time::sleep(close_delay + Duration::from_millis(50)).await;
    print_frame("after close delay", &select);

    select.dispatch(SelectAction::Blur);
    tokio::time::sleep(close_delay + Duration::from_millis(50)).await;

    // A shorter window leaves no room below the input
    select.dispatch(SelectAction::Resize(Viewport::new(1280.0, 600.0)));
    tokio::time::sleep(resize_debounce + Duration::from_millis(50)).await;
    select.dispatch(SelectAction::Toggle);
    print_frame("reopened in a shorter window", &select);

    select.handle_key("Escape", &keymap);
    print_frame("dismissed", &select);

    select.unmount();
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Combobox demo starting...");

    let config = load_config();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(run_demo(config));
}
