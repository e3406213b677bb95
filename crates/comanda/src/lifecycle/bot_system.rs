use crate::catalog::Catalog;
use crate::clients::{DispatchClient, SessionClient};
use crate::config::BotConfig;
use crate::dispatch_actor;
use crate::session_actor::{self, SessionContext};
use std::sync::Arc;
use tracing::{error, info};

/// The running bot: both actors spawned and wired, plus the clients to
/// reach them.
///
/// Construction order matters only in one place: the dispatch client must
/// exist before the session hub starts, because every session holds a
/// clone of it in its context. The dependency graph is acyclic (sessions
/// call dispatch, never the other way), so dropping the clients is enough
/// to shut the whole system down.
pub struct BotSystem {
    /// Client for the conversation hub; webhook glue talks to this.
    pub sessions: SessionClient,
    /// Client for the dispatcher; courier tooling talks to this.
    pub dispatch: DispatchClient,
    /// Task handles for both actors, awaited on shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BotSystem {
    /// Builds the catalog, spawns the dispatcher, then spawns the session
    /// hub with the dispatch client injected into its context.
    pub fn new(config: BotConfig) -> Self {
        let catalog = Arc::new(Catalog::house_menu());

        let (dispatch_actor, dispatch) = dispatch_actor::new(config.restaurant, &config.dispatch);
        let dispatch_handle = tokio::spawn(dispatch_actor.run());

        let (hub, hub_client) = session_actor::new(config.session_buffer);
        let hub_handle = tokio::spawn(hub.run(SessionContext {
            catalog,
            dispatch: dispatch.clone(),
        }));

        info!("Bot system started");
        Self {
            sessions: SessionClient::new(hub_client),
            dispatch,
            handles: vec![hub_handle, dispatch_handle],
        }
    }

    /// Starts from environment-driven configuration.
    pub fn from_env() -> Self {
        Self::new(BotConfig::from_env())
    }

    /// Gracefully shuts down both actors.
    ///
    /// Dropping the clients closes the channels; each actor drains its
    /// inbox and exits its loop. The session hub goes first so any order
    /// still in flight reaches the dispatcher before its channel closes.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down bot system...");

        drop(self.sessions);
        drop(self.dispatch);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Bot system shutdown complete.");
        Ok(())
    }
}
