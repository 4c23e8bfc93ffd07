//! Server configuration assembled from CLI flags and the environment.

use crate::auth::AdminCredentials;
use crate::error::AppError;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Cosmetic pause before a redemption result is reported.
pub const DEFAULT_VALIDATION_DELAY_MS: u64 = 800;

/// Upper bound for the validation delay flag.
pub const MAX_VALIDATION_DELAY_MS: u64 = 10_000;

/// Everything the HTTP server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub validation_delay: Duration,
    /// `None` disables the admin surface.
    pub admin: Option<AdminCredentials>,
}

impl ServerConfig {
    /// Build a config from flag values, reading admin credentials from the environment.
    pub fn from_args(host: &str, port: u16, validation_delay_ms: u64) -> Result<Self, AppError> {
        let bind = resolve_bind(host, port)?;

        if validation_delay_ms > MAX_VALIDATION_DELAY_MS {
            return Err(AppError::Config(format!(
                "validation delay {validation_delay_ms}ms exceeds {MAX_VALIDATION_DELAY_MS}ms"
            )));
        }

        let admin = AdminCredentials::from_env();
        if let Some(creds) = &admin {
            info!(email = creds.email(), "Admin credential loaded");
        }

        Ok(Self {
            bind,
            validation_delay: Duration::from_millis(validation_delay_ms),
            admin,
        })
    }

    /// Replace the admin credential.
    #[must_use]
    pub fn with_admin(mut self, admin: Option<AdminCredentials>) -> Self {
        self.admin = admin;
        self
    }
}

/// Turn a host literal or name into a bind address.
///
/// IP literals (including bare IPv6 such as `::1`) are used as-is. Names go
/// through the system resolver and the first address wins.
fn resolve_bind(host: &str, port: u16) -> Result<SocketAddr, AppError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    (host, port)
        .to_socket_addrs()
        .map_err(|e| AppError::Config(format!("invalid bind host {host}: {e}")))?
        .next()
        .ok_or_else(|| AppError::Config(format!("bind host {host} resolved to no address")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            validation_delay: Duration::from_millis(DEFAULT_VALIDATION_DELAY_MS),
            admin: None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_args_parses_bind_address() {
        let config = ServerConfig::from_args("0.0.0.0", 9000, 0).map(|c| c.bind.port());
        assert_eq!(config.ok(), Some(9000));
    }

    #[test]
    fn from_args_accepts_ipv6_loopback() {
        let bind = ServerConfig::from_args("::1", 9000, 0).map(|c| c.bind);
        assert_eq!(bind.ok(), Some(SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 1], 9000))));
    }

    #[test]
    fn from_args_accepts_localhost() {
        let bind = ServerConfig::from_args("localhost", 8081, 0).map(|c| c.bind);
        let bind = bind.ok();
        assert_eq!(bind.map(|b| b.port()), Some(8081));
        assert!(bind.is_some_and(|b| b.ip().is_loopback()));
    }

    #[test]
    fn from_args_rejects_bad_host() {
        assert!(ServerConfig::from_args("not a host", 80, 0).is_err());
    }

    #[test]
    fn from_args_rejects_excessive_delay() {
        assert!(ServerConfig::from_args(DEFAULT_HOST, DEFAULT_PORT, MAX_VALIDATION_DELAY_MS + 1).is_err());
    }

    #[test]
    fn default_uses_cosmetic_delay() {
        let config = ServerConfig::default();
        assert_eq!(config.validation_delay, Duration::from_millis(800));
        assert!(config.admin.is_none());
    }
}
