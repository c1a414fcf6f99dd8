use crate::error::SolverError;
use crate::types::hiring::Identity;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
    value::{Uncased, UncasedStr},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

pub static GENERATE_WEBHOOK_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://bfhldevapigw.healthrx.co.in/hiring/generateWebhook/JAVA")
        .expect("invalid generate-webhook URL")
});

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "WEBHOOK_SOLVER_";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    #[serde(default)]
    pub proxy: Option<Url>,
    #[serde(default)]
    pub http: HttpConfig,
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverConfig {
    #[serde(default = "default_generate_webhook_url")]
    pub generate_webhook_url: Url,
    pub request: Identity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `WEBHOOK_SOLVER_*` environment variables.
    ///
    /// Nested env keys use `__`, e.g. `WEBHOOK_SOLVER_SOLVER__REQUEST__REGNO`.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .lowercase(false)
                    .map(env_key),
            )
    }

    pub fn load() -> Result<Self, SolverError> {
        Ok(Self::figment().extract()?)
    }
}

/// Lowercase an env key, restoring the camelCase `regNo` segment used by the toml file.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    key.as_str()
        .split('.')
        .map(|segment| match segment.to_ascii_lowercase().as_str() {
            "regno" | "reg_no" => "regNo".to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
        .into()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_generate_webhook_url() -> Url {
    GENERATE_WEBHOOK_URL.clone()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("webhook-solver/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn loads_identity_from_toml_with_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [solver.request]
                name = "Jane Doe"
                regNo = "REG12347"
                email = "jane@example.com"
                "#,
            )?;

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.solver.request.name, "Jane Doe");
            assert_eq!(cfg.solver.request.reg_no, "REG12347");
            assert_eq!(cfg.solver.request.email, "jane@example.com");
            assert_eq!(cfg.solver.generate_webhook_url, *GENERATE_WEBHOOK_URL);
            assert_eq!(cfg.loglevel, "info");
            assert!(cfg.proxy.is_none());
            assert_eq!(cfg.http.timeout(), Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                loglevel = "debug"

                [solver.request]
                name = "Jane Doe"
                regNo = "REG12347"
                email = "jane@example.com"
                "#,
            )?;
            jail.set_env("WEBHOOK_SOLVER_SOLVER__REQUEST__REGNO", "REG12348");
            jail.set_env(
                "WEBHOOK_SOLVER_SOLVER__GENERATE_WEBHOOK_URL",
                "http://127.0.0.1:9000/generate",
            );
            jail.set_env("WEBHOOK_SOLVER_HTTP__TIMEOUT_SECS", "5");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.loglevel, "debug");
            assert_eq!(cfg.solver.request.reg_no, "REG12348");
            assert_eq!(
                cfg.solver.generate_webhook_url.as_str(),
                "http://127.0.0.1:9000/generate"
            );
            assert_eq!(cfg.http.timeout(), Duration::from_secs(5));
            Ok(())
        });
    }

    #[test]
    fn env_keys_keep_camel_case_reg_no() {
        assert_eq!(
            env_key(UncasedStr::new("SOLVER.REQUEST.REGNO")).as_str(),
            "solver.request.regNo"
        );
        assert_eq!(
            env_key(UncasedStr::new("SOLVER.REQUEST.REG_NO")).as_str(),
            "solver.request.regNo"
        );
        assert_eq!(env_key(UncasedStr::new("HTTP.TIMEOUT_SECS")).as_str(), "http.timeout_secs");
    }

    #[test]
    fn missing_identity_fails() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [solver.request]
                name = "Jane Doe"
                "#,
            )?;

            assert!(Config::figment().extract::<Config>().is_err());
            assert!(matches!(Config::load(), Err(SolverError::Config(_))));
            Ok(())
        });
    }
}
