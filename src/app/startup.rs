//! Application startup for marker-replay

use crate::app::cli::args::{resolve_color, Args};
use crate::app::config::load_config;
use crate::app::report::{render_json, render_summary, render_text};
use crate::app::scenario::{replay, Scenario};
use crate::core::error_handling::describe_error;
use crate::core::logging::init_logging;
use crate::maps::api::InMemoryMapsApi;
use crate::markers::api::MarkerManager;
use clap::Parser;
use std::sync::Arc;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let args = Args::parse();

    let mut config = match load_config(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", describe_error(&e, "Loading configuration"));
            return 2;
        }
    };
    if let Err(e) = args.apply_to(&mut config) {
        eprintln!("Error: {}", describe_error(&e, "Applying options"));
        return 2;
    }

    let use_color = resolve_color(config.color);
    colored::control::set_override(use_color);
    if let Err(e) = init_logging(&config.logging, use_color) {
        eprintln!("Error initialising logging: {}", e);
        return 2;
    }
    log::info!(
        "marker-replay {} starting (duplicate policy: {})",
        crate::long_version(),
        config.manager.duplicate_policy
    );

    let scenario = match Scenario::load(&args.scenario).await {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {}", describe_error(&e, "Loading scenario"));
            return 2;
        }
    };
    log::debug!("Loaded {} steps from {}", scenario.steps.len(), args.scenario.display());

    let api = Arc::new(InMemoryMapsApi::new("replay"));
    let manager = MarkerManager::with_config(api.clone(), config.manager.clone());
    let outcome = replay(&scenario, &manager).await;

    let calls = api.calls();
    if args.json {
        match render_json(&calls) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error rendering journal: {}", e);
                return 2;
            }
        }
    } else {
        if !calls.is_empty() {
            println!("{}", render_text(&calls));
        }
        println!("{}", render_summary(&outcome, calls.len()));
    }

    if outcome.is_success() {
        0
    } else {
        1
    }
}
