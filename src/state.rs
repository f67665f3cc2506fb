use std::sync::Arc;

use averager_core::{
    WindowRegistry,
    error::SourceError,
    source::{HttpNumberSource, HttpNumberSourceOptions, NumberSource},
};

use crate::config::Config;

pub struct ApiState {
    pub config: Config,
    pub windows: Arc<WindowRegistry>,
    pub source: Arc<dyn NumberSource>,
}

impl ApiState {
    pub fn new(config: Config) -> Result<ApiState, SourceError> {
        let source = HttpNumberSource::new(&source_options_from_config(&config))?;
        Ok(ApiState::with_source(config, Arc::new(source)))
    }

    /// State reading numbers from `source` instead of the configured upstream.
    pub fn with_source(config: Config, source: Arc<dyn NumberSource>) -> ApiState {
        ApiState {
            windows: Arc::new(WindowRegistry::new(config.window_size)),
            config,
            source,
        }
    }
}

pub fn source_options_from_config(opt: &Config) -> HttpNumberSourceOptions {
    HttpNumberSourceOptions {
        base_url: opt.upstream.base_url.clone(),
        endpoints: opt.upstream.endpoints.clone(),
        timeout: opt.upstream.timeout,
        bearer_token: opt.upstream.bearer_token.clone(),
    }
}
