use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, DEFAULT_LOG_FILTER};

/// Installs the global `tracing` subscriber. Later calls are no-ops.
pub fn init_tracing(cfg: &LogConfig) {
    let filter =
        EnvFilter::try_new(&cfg.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = if cfg.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    match installed {
        Ok(()) => tracing::debug!(filter = %cfg.filter, json = cfg.json, "tracing initialised"),
        Err(e) => tracing::debug!(error = %e, "tracing subscriber already set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_tolerates_bad_filters() {
        let cfg = LogConfig {
            filter: "laari_khojo=[[[".into(),
            json: true,
        };
        init_tracing(&cfg);
        init_tracing(&LogConfig {
            filter: "info".into(),
            json: false,
        });
        tracing::info!("still logging");
    }
}
