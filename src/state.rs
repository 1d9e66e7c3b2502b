use std::sync::Arc;

use crate::config::Config;
use crate::delivery::Sink;
use crate::email::Mailer;

pub type SharedState = Arc<AppState>;

/// Read-only after startup; every request shares it.
pub struct AppState {
    pub config: Config,
    pub sink: Arc<dyn Sink>,
    pub mailer: Option<Arc<dyn Mailer>>,
}
