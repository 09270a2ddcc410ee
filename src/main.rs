use std::env;
use std::sync::Arc;

use config::Config;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};

use pushkind_directory::console::{self, Command};
use pushkind_directory::models::config::DirectoryConfig;
use pushkind_directory::repository::HttpEmployeeRepository;
use pushkind_directory::services::coordinator::SearchCoordinator;

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let directory_config = match settings.try_deserialize::<DirectoryConfig>() {
        Ok(directory_config) => directory_config,
        Err(err) => {
            log::error!("Error loading directory config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = directory_config.validate() {
        log::error!("Invalid directory config: {err}");
        std::process::exit(1);
    }

    let repo = match HttpEmployeeRepository::new(&directory_config) {
        Ok(repo) => Arc::new(repo),
        Err(err) => {
            log::error!("Failed to create employee service client: {err}");
            std::process::exit(1);
        }
    };

    let coordinator = match SearchCoordinator::from_config(repo, &directory_config) {
        Ok(coordinator) => Arc::new(coordinator),
        Err(err) => {
            log::error!("Failed to start search coordinator: {err}");
            std::process::exit(1);
        }
    };

    log::info!("Using employee service at {}", directory_config.api_url);

    // Re-render whenever the listing or its error changes.
    let mut updates = coordinator.subscribe();
    let view_source = Arc::clone(&coordinator);
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            println!("{}", console::render_view(&view_source.view()));
        }
    });

    if let Err(err) = coordinator.load().await {
        log::warn!("Initial load failed: {err}");
    }
    println!("{}", console::help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                log::error!("Failed to read input: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match console::execute(coordinator.as_ref(), command).await {
            Ok(Some(answer)) => println!("{answer}"),
            Ok(None) => {}
            Err(err) if err.is_validation() => match err.field() {
                Some(field) => println!("{field}: {err}"),
                None => println!("{err}"),
            },
            Err(err) => println!("Error: {err}"),
        }
    }

    coordinator.shutdown();
    renderer.abort();
}
