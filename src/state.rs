use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, upstream::Upstream};

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn Upstream> {
    fn from_ref(state: &AppState) -> Self {
        state.upstream.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
