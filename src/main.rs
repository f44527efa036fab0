//! Application entry point loading and validating the dev-server config.
use std::env;

use config::Config;
use dotenvy::dotenv;

use devserve_config::dto::ResolvedConfigDto;
use devserve_config::models::config::ServerConfig;
use devserve_config::services::validate::ConfigValidator;

fn main() {
    // Load environment variables from `.env` in local development.
    dotenv().ok();
    // Initialize logger with default level INFO if not provided.
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    let root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            log::error!("Error resolving working directory: {}", err);
            std::process::exit(1);
        }
    };

    let validated = match ConfigValidator::new(root).validate(&server_config) {
        Ok(validated) => validated,
        Err(err) => {
            log::error!("Invalid server config: {}", err);
            std::process::exit(1);
        }
    };

    log::info!(
        "Serving {} on https://localhost:{}{}",
        validated.base_dir().as_path().display(),
        validated.port(),
        if validated.open() {
            " (opening browser)"
        } else {
            ""
        }
    );

    // Hand the resolved record to the external dev server on stdout.
    let handoff = ResolvedConfigDto::from(&validated);
    match serde_json::to_string_pretty(&handoff) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("Error serializing resolved config: {}", err);
            std::process::exit(1);
        }
    }
}
