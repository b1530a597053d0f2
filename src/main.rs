use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use serverpack::{run, Config, CurseClient, UpdaterError};

const PROJECT_ID: u32 = 715_572;
const GAME_VERSION: &str = "1.21";
const API_KEY_VAR: &str = "CURSEFORGE_API_KEY";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail before touching the network if the credential is missing
    let api_key = match env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            error!("{}", UpdaterError::MissingCredential(API_KEY_VAR.into()));
            return ExitCode::FAILURE;
        }
    };

    let config = Config::new(PROJECT_ID, GAME_VERSION);
    let client = CurseClient::new(api_key);

    match run(&client, &config) {
        Ok(()) => {
            info!("Server pack update complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Update failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
