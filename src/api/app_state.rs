use crate::observability::AppMetrics;
use crate::services::chat::{ChatService, SessionRegistry};
use crate::services::profile::ProfileService;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Profile service for registration and record keeping
    pub profile_service: Arc<dyn ProfileService>,
    /// Chat service for per-turn orchestration
    pub chat_service: Arc<dyn ChatService>,
    /// In-memory login session registry
    pub sessions: Arc<SessionRegistry>,
    /// Shared application metrics
    pub metrics: AppMetrics,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("profile_service", &"Arc<dyn ProfileService>")
            .field("chat_service", &"Arc<dyn ChatService>")
            .field("sessions", &"Arc<SessionRegistry>")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    ///
    /// Profile service 以 Arc 传入，因为对话服务持有同一实例。
    pub fn new(
        profile_service: Arc<dyn ProfileService>,
        chat_service: Box<dyn ChatService>,
        sessions: SessionRegistry,
        metrics: AppMetrics,
    ) -> Self {
        Self {
            profile_service,
            chat_service: Arc::from(chat_service),
            sessions: Arc::new(sessions),
            metrics,
        }
    }
}
