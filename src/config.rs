// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The records URL and the encrypted access token are deploy-time constants;
//! the passphrase that unlocks the token is only ever supplied by the user.

use chrono::NaiveDate;
use std::env;

/// Expected length of the decrypted access token.
pub const DEFAULT_TOKEN_LENGTH: usize = 134;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the records export (without query string)
    pub records_url: String,
    /// Passphrase-encrypted access token (base64, OpenSSL "Salted__" format)
    pub encrypted_token: String,
    /// Length the decrypted token must have to be accepted
    pub token_length: usize,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Athletes in the club challenge subgroup (display names)
    pub challenge_group: Vec<String>,
    /// First day of the club challenge window
    pub challenge_start: NaiveDate,
    /// Last day of the club challenge window
    pub challenge_end: NaiveDate,
}

impl Config {
    /// Config for tests: points at a local endpoint and carries no real secret.
    pub fn test_default() -> Self {
        Self {
            records_url: "http://127.0.0.1:9/records.json".to_string(),
            encrypted_token: String::new(),
            token_length: DEFAULT_TOKEN_LENGTH,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            challenge_group: Vec::new(),
            challenge_start: default_challenge_start(),
            challenge_end: default_challenge_end(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let token_length = match env::var("RECORDS_TOKEN_LENGTH") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("RECORDS_TOKEN_LENGTH", raw))?,
            Err(_) => DEFAULT_TOKEN_LENGTH,
        };

        Ok(Self {
            records_url: env::var("RECORDS_URL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("RECORDS_URL"))?,
            encrypted_token: env::var("ENCRYPTED_RECORDS_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ENCRYPTED_RECORDS_TOKEN"))?,
            token_length,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            challenge_group: env::var("CHALLENGE_GROUP")
                .map(|v| parse_challenge_group(&v))
                .unwrap_or_default(),
            challenge_start: date_var("CHALLENGE_START")?.unwrap_or_else(default_challenge_start),
            challenge_end: date_var("CHALLENGE_END")?.unwrap_or_else(default_challenge_end),
        })
    }
}

/// Parse the challenge subgroup list.
///
/// Names are comma separated; underscores stand in for spaces so the value
/// survives shells and deploy tooling unquoted.
pub fn parse_challenge_group(raw: &str) -> Vec<String> {
    raw.replace('_', " ")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn date_var(name: &'static str) -> Result<Option<NaiveDate>, ConfigError> {
    match env::var(name) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(None),
    }
}

fn default_challenge_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 30).unwrap_or_default()
}

fn default_challenge_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 19).unwrap_or_default()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("RECORDS_URL", "https://storage.example.com/club/records.json");
        env::set_var("ENCRYPTED_RECORDS_TOKEN", "U2FsdGVkX1+test");
        env::set_var("CHALLENGE_GROUP", "Alice_Smith,Bob_Jones");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(
            config.records_url,
            "https://storage.example.com/club/records.json"
        );
        assert_eq!(config.token_length, DEFAULT_TOKEN_LENGTH);
        assert_eq!(config.port, 8080);
        assert_eq!(config.challenge_group, vec!["Alice Smith", "Bob Jones"]);
        assert_eq!(config.challenge_start, default_challenge_start());
    }

    #[test]
    fn test_parse_challenge_group_skips_blanks() {
        assert_eq!(
            parse_challenge_group("Ann_Lee, ,Joe_Bloggs,"),
            vec!["Ann Lee", "Joe Bloggs"]
        );
        assert!(parse_challenge_group("").is_empty());
    }
}
