//! Process configuration, read once at startup from the environment.

use std::env;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the server needs to boot. `JWT_SECRET` and `DATABASE_URL`
/// have no sane defaults and are required; the rest fall back.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub pool_size: usize,
    pub jwt_secret: String,
    pub s3: S3Config,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let pool_size = match get("PG_POOL_SIZE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PG_POOL_SIZE", value: raw })?,
            None => DEFAULT_POOL_SIZE,
        };
        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            pool_size,
            jwt_secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            s3: S3Config {
                bucket: get("S3_BUCKET_NAME").ok_or(ConfigError::Missing("S3_BUCKET_NAME"))?,
                region: get("AWS_REGION").ok_or(ConfigError::Missing("AWS_REGION"))?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'static str, &'a str)]) -> impl Fn(&'static str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn loads_with_defaults() {
        let cfg = AppConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://app@localhost/paceline"),
            ("JWT_SECRET", "shhh"),
            ("S3_BUCKET_NAME", "paceline-uploads"),
            ("AWS_REGION", "ap-southeast-1"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(cfg.s3.bucket, "paceline-uploads");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_vars(vars(&[("JWT_SECRET", "shhh")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn bad_pool_size_is_rejected() {
        let err = AppConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://app@localhost/paceline"),
            ("JWT_SECRET", "shhh"),
            ("S3_BUCKET_NAME", "b"),
            ("AWS_REGION", "r"),
            ("PG_POOL_SIZE", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PG_POOL_SIZE", .. }));
    }
}
