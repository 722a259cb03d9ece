use std::sync::Arc;

use tracing::info;

use crate::config::get_config;
use crate::errors::Result;
use crate::services::Shortener;
use crate::storage::{KvStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn KvStore>,
    pub shortener: Arc<Shortener>,
}

/// 准备服务器启动的上下文
///
/// Connects (and pings) the key-value store; a failure here propagates up
/// and terminates the process before the server binds.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = get_config();

    let store = StorageFactory::create().await?;
    info!("Using storage backend: {}", store.backend_name());

    let base_url = config.server.resolved_base_url();
    info!("Short links served under {}", base_url);

    let shortener = Arc::new(Shortener::new(store.clone(), base_url));

    Ok(StartupContext { store, shortener })
}
