//! Runtime secret resolution.
//!
//! This module is the **single source of truth** for reading the upstream
//! credential.
//!
//! # Contract
//! - At startup, callers invoke [`resolve_secrets_with`] (or
//!   [`crate::resolve_service_config`]) once.
//! - The returned `ResolvedSecrets` is passed into constructors; never scatter
//!   `std::env::var` calls across the codebase.
//! - `Debug` impls on all secret-containing structs **redact** values.
//!
//! A missing credential is **not** an error: the service runs mock-only.
//! The sample-env placeholder counts as missing.

/// Env var holding the GoldAPI.io access token.
pub const GOLD_API_KEY_VAR: &str = "GOLD_API_KEY";

/// Placeholder shipped in sample env files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Filter out blank and placeholder credentials.
pub fn usable_api_key(raw: Option<&str>) -> Option<String> {
    let key = raw?.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        None
    } else {
        Some(key.to_string())
    }
}

/// All runtime-resolved secrets.
///
/// **Values are redacted in `Debug` output.**
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolvedSecrets {
    /// GoldAPI.io access token. `None` if the env var was absent, blank or
    /// the placeholder.
    pub gold_api_key: Option<String>,
}

impl std::fmt::Debug for ResolvedSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecrets")
            .field(
                "gold_api_key",
                &self.gold_api_key.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

/// Resolve a named variable through `lookup`.
/// Returns `None` if the variable is unset or its value is blank.
pub(crate) fn resolve_var<F>(lookup: &F, var_name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Process-environment lookup used by the binary.
pub fn env_lookup(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok()
}

/// Resolve all secrets through `lookup`.
pub fn resolve_secrets_with<F>(lookup: &F) -> ResolvedSecrets
where
    F: Fn(&str) -> Option<String>,
{
    ResolvedSecrets {
        gold_api_key: usable_api_key(resolve_var(lookup, GOLD_API_KEY_VAR).as_deref()),
    }
}
