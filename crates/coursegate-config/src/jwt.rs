//! Session token configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret. Falls back to
//!   [`DEVELOPMENT_SECRET`], which is public and must never be used in
//!   production.
//! - `TOKEN_EXPIRY`: Session lifetime. Plain seconds (`7200`) or a value with
//!   a unit suffix: `s`, `m`, `h`, `d` (`2h`, `30m`). Default `2h`.

use std::env;

/// Insecure fallback secret for local development.
pub const DEVELOPMENT_SECRET: &str = "development-secret-change-me";

/// Default session lifetime in seconds (2 hours).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => DEVELOPMENT_SECRET.to_string(),
        };

        let token_ttl_secs = env::var("TOKEN_EXPIRY")
            .ok()
            .and_then(|raw| parse_duration_secs(&raw))
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Self {
            secret,
            token_ttl_secs,
        }
    }

    /// True when tokens are signed with the public [`DEVELOPMENT_SECRET`].
    pub fn is_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Parses `"90"`, `"45s"`, `"30m"`, `"2h"` or `"7d"` into seconds.
///
/// Returns `None` for empty, zero, negative, or unparseable input.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 60 * 60),
        'd' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };

    let value: i64 = digits.trim().parse().ok()?;
    if value <= 0 {
        return None;
    }

    value.checked_mul(multiplier)
}
