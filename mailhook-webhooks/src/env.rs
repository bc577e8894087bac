// Environment variable loading

use crate::{Result, WebhookError};
use std::collections::HashMap;
use std::env;

/// Prefix for all variables read by this crate
pub const ENV_PREFIX: &str = "MAILHOOK_WEBHOOK";

/// Environment variable loader
pub struct EnvLoader {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvLoader {
    /// Snapshot the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::from_vars(prefix, env::vars())
    }

    /// Load from an explicit set of variables
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = prefix.into();
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(&prefix))
            .collect();
        Self { prefix, vars }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.to_uppercase())
    }

    /// Load a specific variable, `None` when unset or blank
    pub fn load_var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(&self.full_key(key))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Load and parse a variable
    pub fn load_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.load_var(key) else {
            return Ok(None);
        };
        raw.parse::<T>().map(Some).map_err(|e| {
            WebhookError::Config(format!("{}: {} ({})", self.full_key(key), e, raw))
        })
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(ENV_PREFIX)
    }
}
