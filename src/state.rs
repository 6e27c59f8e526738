//! Shared application state for all routes.

use crate::settings::Settings;
use crate::store::Store;
use crate::upload::UploadDir;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Prefix of every `image_url` in responses.
    pub public_url: Arc<str>,
    pub uploads: UploadDir,
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, settings: &Settings) -> Self {
        AppState {
            store,
            public_url: Arc::from(settings.public_url.as_str()),
            uploads: UploadDir::new(settings.uploads_dir.clone()),
            assets_dir: settings.assets_dir.clone(),
        }
    }
}
