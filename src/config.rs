use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub cors_origin: String,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// External managed store. `provider` selects the backend: "rest" talks to
/// the managed PostgREST-style service at `base_url`, "memory" keeps tables
/// in-process (requires the `sim` feature).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub provider: String,
    pub base_url: String,
    pub api_key: String,
    pub http_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    pub bucket: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("ATLAS__").split("__"));
        Ok(figment.extract()?)
    }
}
