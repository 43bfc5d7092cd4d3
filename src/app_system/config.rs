use std::str::FromStr;

use tracing::warn;

pub const BUFFER_SIZE_ENV: &str = "USER_SERVICE_BUFFER_SIZE";
pub const MAX_PER_PAGE_ENV: &str = "USER_SERVICE_MAX_PER_PAGE";

/// Tunables for a [`UserSystem`](super::UserSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Capacity of the service's request channel.
    pub buffer_size: usize,
    /// Upper bound on `per_page` when listing. `None` leaves it unbounded.
    pub max_per_page: Option<u32>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            max_per_page: None,
        }
    }
}

impl ServiceConfig {
    /// Reads overrides from the environment, keeping defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(size) = parse_var::<usize>(&lookup, BUFFER_SIZE_ENV) {
            if size == 0 {
                warn!(var = BUFFER_SIZE_ENV, "Buffer size must be positive, keeping default");
            } else {
                config.buffer_size = size;
            }
        }
        if let Some(max) = parse_var::<u32>(&lookup, MAX_PER_PAGE_ENV) {
            config.max_per_page = (max > 0).then_some(max);
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = key, value = %raw, "Ignoring invalid config value");
            None
        }
    }
}
