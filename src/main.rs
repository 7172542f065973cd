//! Sprintboard sync client
//!
//! Restores the saved session, pulls every collection from the API and logs
//! a summary of the board.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sprintboard_sync::config::Config;
use sprintboard_sync::App;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Sprintboard sync client");
    tracing::info!("API base URL: {}", config.api_base_url);
    tracing::info!("Session database: {:?}", config.session_db_path);

    let app = App::init(config).await?;

    let Some(session) = app.session.current() else {
        tracing::warn!("No saved session. Sign in through the web app first.");
        return Ok(());
    };
    tracing::info!("Signed in as {} <{}>", session.user.name, session.user.email);

    if let Err(e) = app.refresh_all().await {
        tracing::error!("Initial sync incomplete: {}", e);
    }

    for column in app.board().columns() {
        tracing::info!(
            "{}: {} tasks, {} points",
            column.status,
            column.tasks.len(),
            column.points()
        );
    }

    for sprint in app.sprints.sorted() {
        tracing::info!(
            "#{} {} [{}] {}/{} points",
            sprint.order,
            sprint.name,
            sprint.status,
            sprint.completed_points,
            sprint.story_points
        );
    }

    tracing::info!(
        "{} projects, {} teams",
        app.projects.len(),
        app.teams.len()
    );

    Ok(())
}
