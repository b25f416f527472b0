//! # Kennel Configuration
//!
//! A minimal string key/value store, read through `app.set()` / `app.get()`.
//!
//! ```rust
//! use kennel_core::KennelApp;
//! let app = KennelApp::<(), ()>::new();
//!
//! app.set("http.port", "8000");
//! assert_eq!(app.get("http.port"), Some("8000".to_string()));
//! ```
//!
//! ## Environment overrides
//! Variables under a prefix are folded into the store, lowercased, with
//! `__` read as a key separator:
//!
//! ```bash
//! export KENNEL__HTTP__PORT=9000   # http.port = 9000
//! ```

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct KennelConfig {
    values: HashMap<String, String>,
}

impl KennelConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Fold `PREFIX__A__B=value` pairs into `a.b = value`.
    ///
    /// Returns how many keys were applied. Pass `std::env::vars()` in
    /// production; tests pass a fixed list.
    pub fn apply_env_overrides<I>(&mut self, prefix: &str, vars: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut applied = 0;
        for (key, value) in vars {
            let Some(stripped) = key.strip_prefix(prefix) else {
                continue;
            };

            let normalized = stripped
                .trim_start_matches('_')
                .to_lowercase()
                .replace("__", ".");

            if normalized.is_empty() {
                continue;
            }

            self.set(normalized, value);
            applied += 1;
        }
        applied
    }

    pub fn snapshot(&self) -> KennelConfigSnapshot {
        KennelConfigSnapshot::new(self.values.clone())
    }
}

/// Read-only copy of the config handed to hooks and transports.
#[derive(Debug, Clone, Default)]
pub struct KennelConfigSnapshot {
    map: HashMap<String, String>,
}

impl KennelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.trim().parse::<u16>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.trim().parse::<bool>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_replace_defaults() {
        let mut cfg = KennelConfig::new();
        cfg.set("http.port", "8000");

        let applied = cfg.apply_env_overrides(
            "KENNEL",
            vars(&[
                ("KENNEL__HTTP__PORT", "9000"),
                ("KENNEL__LOG__LEVEL", "debug"),
                ("PATH", "/usr/bin"),
            ]),
        );

        assert_eq!(applied, 2);
        assert_eq!(cfg.get("http.port"), Some("9000"));
        assert_eq!(cfg.get("log.level"), Some("debug"));
        assert!(!cfg.has("path"));
    }

    #[test]
    fn snapshot_typed_getters() {
        let mut cfg = KennelConfig::new();
        cfg.set("http.port", "8000");
        cfg.set("http.port.bad", "eighty");
        cfg.set("feature.on", "true");

        let snap = cfg.snapshot();
        assert_eq!(snap.get_u16("http.port"), Some(8000));
        assert_eq!(snap.get_u16("http.port.bad"), None);
        assert_eq!(snap.get_bool("feature.on"), Some(true));
        assert_eq!(snap.get_string("missing"), None);
    }
}
