// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str = "https://omcti.in/apprise/api.php";

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// `api.php` endpoint of the remote system of record.
    pub upstream_base_url: Url,
    pub upstream_timeout_secs: u64,
    pub bind_addr: SocketAddr,
    pub default_page_size: usize,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys fall back to defaults;
    /// a malformed value aborts startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_base_url = lookup("UPSTREAM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_base_url =
            Url::parse(&upstream_base_url).expect("UPSTREAM_BASE_URL must be a valid URL");

        let upstream_timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>().expect("UPSTREAM_TIMEOUT_SECS must be a number"))
            .unwrap_or(15);

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be host:port");

        let default_page_size = lookup("DEFAULT_PAGE_SIZE")
            .map(|v| v.parse::<usize>().expect("DEFAULT_PAGE_SIZE must be a number"))
            .unwrap_or(10)
            .clamp(1, MAX_PAGE_SIZE);

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Self {
            upstream_base_url,
            upstream_timeout_secs,
            bind_addr,
            default_page_size,
            cors_origins,
            rust_log,
            log_dir,
        }
    }
}
