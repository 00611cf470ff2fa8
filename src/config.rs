//! Settings read from the environment.

use std::path::PathBuf;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000";

pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    /// Base URL of the booking API (`HALLCAL_API_URL`)
    pub(crate) api_url: String,
    /// File to write logs to (`HALLCAL_LOG_FILE`); nothing is logged if unset
    pub(crate) log_file: Option<PathBuf>,
    /// `tracing-subscriber` filter directives (`HALLCAL_LOG`)
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Config {
        let nonempty = |key: &str| lookup(key).filter(|s| !s.is_empty());
        Config {
            api_url: nonempty("HALLCAL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            log_file: nonempty("HALLCAL_LOG_FILE").map(PathBuf::from),
            log_filter: nonempty("HALLCAL_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}
