//! Service configuration, resolved once at startup from the environment.
//!
//! | Variable            | Default                  |
//! |---------------------|--------------------------|
//! | `GOLD_API_KEY`      | unset (mock-only mode)   |
//! | `GOLD_API_BASE_URL` | `https://www.goldapi.io` |
//! | `HOST`              | `0.0.0.0`                |
//! | `PORT`              | `5000`                   |

pub mod secrets;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

use crate::secrets::{env_lookup, resolve_secrets_with, resolve_var, ResolvedSecrets};

pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const GOLD_API_BASE_URL_VAR: &str = "GOLD_API_BASE_URL";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GOLD_API_BASE_URL: &str = "https://www.goldapi.io";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub gold_api_base_url: String,
    pub secrets: ResolvedSecrets,
}

impl ServiceConfig {
    /// `true` when no usable upstream credential is available.
    pub fn is_mock_only(&self) -> bool {
        self.secrets.gold_api_key.is_none()
    }
}

/// Resolve from the process environment.
pub fn resolve_service_config() -> Result<ServiceConfig> {
    resolve_service_config_with(&env_lookup)
}

/// Resolve through an arbitrary lookup (tests pass a map instead of mutating env).
///
/// # Errors
/// Fails when `HOST` or `PORT` is set but unparsable. The message names the
/// variable and the offending value; neither is a secret.
pub fn resolve_service_config_with<F>(lookup: &F) -> Result<ServiceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let host: IpAddr = match resolve_var(lookup, HOST_VAR) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("CONFIG_INVALID: {HOST_VAR}='{raw}' is not an IP address"))?,
        None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    };

    let port: u16 = match resolve_var(lookup, PORT_VAR) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("CONFIG_INVALID: {PORT_VAR}='{raw}' is not a valid port"))?,
        None => DEFAULT_PORT,
    };

    let gold_api_base_url = resolve_var(lookup, GOLD_API_BASE_URL_VAR)
        .unwrap_or_else(|| DEFAULT_GOLD_API_BASE_URL.to_string());

    Ok(ServiceConfig {
        bind_addr: SocketAddr::new(host, port),
        gold_api_base_url,
        secrets: resolve_secrets_with(lookup),
    })
}
