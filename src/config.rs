use std::env;

use crate::error::AppError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    /// Origin used to build shareable enrollment links.
    pub public_base_url: String,
    pub host: String,
    pub port: u16,
    pub cookie_name: String,
    /// Adds `Secure` to the auth cookie.
    pub production: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            cookie_name: "token".to_string(),
            production: false,
        }
    }
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let backend_url = env::var("BACKEND_URL").unwrap_or(defaults.backend_url);
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_BASE_URL"))
            .unwrap_or(defaults.public_base_url);
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => defaults.port,
        };
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            host,
            port,
            cookie_name: defaults.cookie_name,
            production,
        })
    }
}
