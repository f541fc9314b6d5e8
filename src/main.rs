use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use nutrichat::config::{Cli, Commands};
use nutrichat::render::{render_event, render_history, render_settings};
use nutrichat::{ApiClient, App, Panel, SettingsProjector, UiContext, UiEvent};

// The main entry point of the application, using tokio's async runtime
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for NUTRICHAT_URL)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG (e.g. RUST_LOG=nutrichat=debug).
    // Logs go to stderr so stdout only carries the conversation.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("nutrichat starting with command: {:?}", cli.command);

    let api = cli
        .api_client()
        .context("Failed to configure the backend client")?;

    match cli.command {
        Commands::Chat => run_conversation(api, Panel::Chat).await,
        Commands::Settings => run_conversation(api, Panel::Settings).await,
        Commands::ShowSettings => {
            let ui = UiContext::new();
            let projector = SettingsProjector::new(api.clone(), ui.clone());
            if !projector.refresh().await {
                bail!("Failed to fetch settings from {}", api.base_url());
            }
            println!("{}", render_settings(&ui.settings().await));
            Ok(())
        }
        Commands::History => {
            let history = api
                .get_history()
                .await
                .context("Failed to fetch meal history")?;
            println!("{}", render_history(&history));
            Ok(())
        }
    }
}

/// Read lines from stdin and send each as a message on `panel`, printing log
/// updates as they arrive. Sends are not serialized: replies print in the
/// order the backend answers.
async fn run_conversation(api: ApiClient, panel: Panel) -> Result<()> {
    let ui = UiContext::new();
    let app = App::new(api, ui.clone());

    let mut events = ui.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(UiEvent::SettingsProjected(_)) if panel != Panel::Settings => {}
                Ok(event) => println!("{}", render_event(&event)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Renderer fell behind, {} updates skipped", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    app.start().await;
    println!("Type a message and press Enter. Ctrl-D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let app = app.clone();
        in_flight.spawn(async move { app.controller(panel).send_text(&line).await });
    }

    while let Some(result) = in_flight.join_next().await {
        if let Err(e) = result {
            error!("Send task failed: {:?}", e);
        }
    }

    // Dropping every handle closes the event channel and ends the renderer.
    drop(app);
    drop(ui);
    renderer.await.context("Renderer task failed")?;
    Ok(())
}
