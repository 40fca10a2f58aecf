// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub topics_path: String,
    pub secrets_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let topics_path = env::var("TOPICS_PATH")
            .unwrap_or_else(|_| "data/topics.json".to_string());

        let secrets_path = env::var("SECRETS_PATH")
            .unwrap_or_else(|_| "data/secrets.json".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            topics_path,
            secrets_path,
            port,
            rust_log,
        }
    }
}
