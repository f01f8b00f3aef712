//! Environment variable source
//!
//! Dotted configuration keys map to conventional variable names:
//! `server.port` is read from `SERVER_PORT`, or `APP_SERVER_PORT` with the
//! prefix `APP`. Dashes become underscores as well.

use std::collections::HashMap;

use confbind_core::{ConfigSource, Error, Result};

/// Reads keys from a snapshot of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are left out.
    pub fn from_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { prefix: None, vars }
    }

    /// Use an explicit set of variables instead of the process environment
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: None,
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Only read variables starting with `prefix_`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Variable name a configuration key is read from
    pub fn var_name(&self, key: &str) -> String {
        let base: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_ascii_uppercase(), base),
            None => base,
        }
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Result<String> {
        let name = self.var_name(key);
        match self.vars.get(&name) {
            Some(value) => {
                tracing::trace!(key, var = %name, "read environment variable");
                Ok(value.clone())
            }
            None => Err(Error::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    fn has(&self, key: &str) -> bool {
        self.vars.contains_key(&self.var_name(key))
    }
}
