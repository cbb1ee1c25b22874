//! HTTP Client Factory
//!
//! Builds the `reqwest::Client` used for Bot API calls.

pub use tracker_telegram_core::proxy::*;

use crate::services::notifier::NotifyError;

/// Build a `reqwest::Client` with the given proxy.
///
/// - `Some(proxy)` -> route all traffic through the proxy
/// - `None` -> explicitly disable proxies, ignoring env vars
pub fn build_http_client(proxy: Option<&ProxyConfig>) -> Result<reqwest::Client, NotifyError> {
    let mut builder = reqwest::Client::builder();
    match proxy {
        Some(cfg) => {
            let mut p = reqwest::Proxy::all(cfg.url()).map_err(|e| {
                NotifyError::InvalidConfig(format!("invalid proxy {}: {}", cfg.url(), e))
            })?;
            if let (Some(u), Some(pw)) = (&cfg.username, &cfg.password) {
                p = p.basic_auth(u, pw);
            }
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    Ok(builder.build()?)
}
