use std::collections::HashMap;
use std::fmt::Debug;

use log::warn;

/// Env gives configuration loaders access to environment variables.
///
/// Loaders take `&dyn Env` instead of reading `std::env` directly so tests
/// can run against a fixed set of variables.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl StaticEnv {
    /// Create a StaticEnv from key value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            envs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// Parse a boolean flag the way shell users write them.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a port number from `key`.
///
/// Invalid values are logged and ignored.
pub fn var_port(env: &dyn Env, key: &str) -> Option<u16> {
    let v = env.var(key)?;
    match v.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("ignoring invalid {key}: {v:?}");
            None
        }
    }
}

/// Read a boolean flag from `key`, see [`parse_bool`].
///
/// Invalid values are logged and ignored.
pub fn var_bool(env: &dyn Env, key: &str) -> Option<bool> {
    let v = env.var(key)?;
    let parsed = parse_bool(&v);
    if parsed.is_none() {
        warn!("ignoring invalid {key}: {v:?}");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_env() {
        temp_env::with_var("URLGEN_TEST_ENV", Some("on"), || {
            assert_eq!(OsEnv.var("URLGEN_TEST_ENV").as_deref(), Some("on"));
            assert_eq!(
                OsEnv.vars().get("URLGEN_TEST_ENV").map(String::as_str),
                Some("on")
            );
        });
        temp_env::with_var_unset("URLGEN_TEST_ENV", || {
            assert_eq!(OsEnv.var("URLGEN_TEST_ENV"), None);
        });
    }

    #[test]
    fn test_static_env() {
        let env = StaticEnv::from_pairs([("A", "1")]);
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_var_port_and_bool() {
        let env = StaticEnv::from_pairs([
            ("PORT", " 9000 "),
            ("BAD_PORT", "70000"),
            ("SECURE", "no"),
            ("BAD_SECURE", "sometimes"),
        ]);

        assert_eq!(var_port(&env, "PORT"), Some(9000));
        assert_eq!(var_port(&env, "BAD_PORT"), None);
        assert_eq!(var_port(&env, "MISSING"), None);
        assert_eq!(var_bool(&env, "SECURE"), Some(false));
        assert_eq!(var_bool(&env, "BAD_SECURE"), None);
    }
}
