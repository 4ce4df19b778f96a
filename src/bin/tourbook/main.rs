use std::process::exit;
use std::sync::Arc;
use clap::Parser;
use figment::Figment;
use log::{error, info};
use tourbook::api::ApiClient;
use tourbook::config::app_config::AppConfig;
use tourbook::config::figment::FigmentExt;
use tourbook::error_exit;
use tourbook::logging::init_tool_logging;
use tourbook::session_store::{ProductionSessionStore, SessionStore};
use crate::cli::{CliConfig, Command};

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    let cli_config = CliConfig::parse();

    init_tool_logging(cli_config.verbose);

    let app_config: AppConfig = Figment::new()
        .setup_app_config(&cli_config.config_file)
        .extract()
        .unwrap_or_else(|e| {
            for e in e {
                error!("{e}");
            }
            info!("finishing due to a configuration error");
            exit(1)
        });

    let api = ApiClient::new(&app_config.api_url, app_config.request_timeout())
        .unwrap_or_else(|e| error_exit!("{e}"));

    let session: Arc<dyn SessionStore> = Arc::new(
        ProductionSessionStore::production(
            api.clone(),
            &app_config.credential_file,
            app_config.session_policy(),
        )
    );
    let restoring = tokio::spawn({
        let session = session.clone();
        async move { session.restore().await }
    });
    if let Err(e) = restoring.await {
        error!("session restore failed: {e}");
    }
    session.wait_ready().await;

    match cli_config.command {
        Command::Login { username } => commands::login(&*session, &username).await,
        Command::Logout => commands::logout(&*session).await,
        Command::Whoami => commands::whoami(&*session).await,
        Command::Bookings { command } => commands::bookings(api, session, command).await,
        Command::Register { command } => commands::register(api, command).await,
    }
}
