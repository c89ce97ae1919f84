use anyhow::Context;
use time::{macros::format_description, UtcOffset};

pub const DEFAULT_LOG_FILTER: &str = "laari_khojo=debug";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Offset of the vendors' wall clock; operating hours are local times.
    pub local_offset: UtcOffset,
    pub listing_default_limit: i64,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            local_offset: UtcOffset::UTC,
            listing_default_limit: 20,
            log: LogConfig {
                filter: DEFAULT_LOG_FILTER.into(),
                json: false,
            },
        }
    }
}

impl AppConfig {
    /// Reads the process environment, loading `.env` first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let local_offset = parse_utc_offset(
            &get("VENDOR_UTC_OFFSET").unwrap_or_else(|| "+05:30".into()),
        )?;
        let listing_default_limit = get("LISTING_DEFAULT_LIMIT")
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(20);
        let log = LogConfig {
            filter: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
            json: get("LOG_FORMAT").map(|v| v == "json").unwrap_or(false),
        };
        Ok(Self {
            local_offset,
            listing_default_limit,
            log,
        })
    }
}

/// Parses `+05:30` / `-04:00` style offsets.
pub fn parse_utc_offset(value: &str) -> anyhow::Result<UtcOffset> {
    UtcOffset::parse(
        value.trim(),
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .with_context(|| format!("invalid UTC offset {value:?}"))
}
