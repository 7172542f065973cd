//! Sprintboard sync layer
//!
//! Client-side entity stores for tasks, sprints, projects and teams with
//! optimistic mutations reconciled against the Sprintboard REST API, plus the
//! Kanban board and sprint list drag-and-drop engines built on top of them.

pub mod api;
pub mod board;
pub mod config;
pub mod db;
pub mod errors;
pub mod filter;
pub mod models;
pub mod reorder;
pub mod session;
pub mod store;

use std::sync::Arc;

use api::{Resource, RestClient};
use board::KanbanBoard;
use config::Config;
use db::KvRepository;
use errors::SyncError;
use reorder::SprintList;
use session::{SessionStore, TokenProvider};
use store::{EntityStore, ProjectStore, SprintStore, TaskStore, TeamStore};

/// Every store of one application instance.
///
/// Built once at startup and shared by `Arc`; nothing in the crate keeps
/// global state.
pub struct App {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub client: RestClient,
    pub tasks: Arc<TaskStore>,
    pub sprints: Arc<SprintStore>,
    pub projects: Arc<ProjectStore>,
    pub teams: Arc<TeamStore>,
}

impl App {
    /// Open the session database, restore the saved session and build the stores.
    pub async fn init(config: Config) -> Result<Self, SyncError> {
        let pool = db::init_database(&config.session_db_path).await?;
        let session = Arc::new(SessionStore::open(KvRepository::new(pool)).await?);
        Self::with_session(config, session)
    }

    /// Build the stores around an already opened session store.
    pub fn with_session(config: Config, session: Arc<SessionStore>) -> Result<Self, SyncError> {
        let tokens: Arc<dyn TokenProvider> = session.clone();
        let client = RestClient::new(&config, tokens)?;
        let limit = Some(config.page_limit);

        Ok(Self {
            tasks: Arc::new(EntityStore::new(Resource::tasks(client.clone()), limit)),
            sprints: Arc::new(EntityStore::new(Resource::sprints(client.clone()), limit)),
            projects: Arc::new(EntityStore::new(Resource::projects(client.clone()), limit)),
            teams: Arc::new(EntityStore::new(Resource::teams(client.clone()), limit)),
            client,
            session,
            config,
        })
    }

    pub fn board(&self) -> KanbanBoard {
        KanbanBoard::new(self.tasks.clone())
    }

    pub fn sprint_list(&self) -> SprintList {
        SprintList::new(self.sprints.clone())
    }

    /// Fetch every collection concurrently. Each store keeps its previous
    /// contents if its own fetch fails; the first error is returned.
    pub async fn refresh_all(&self) -> Result<(), SyncError> {
        let (tasks, sprints, projects, teams) = tokio::join!(
            self.tasks.refresh(),
            self.sprints.refresh(),
            self.projects.refresh(),
            self.teams.refresh(),
        );
        tasks.and(sprints).and(projects).and(teams)
    }
}
