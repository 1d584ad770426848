//
//  argocd-rs
//  api/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Options
//!
//! [`Client::new`](super::Client::new) takes an ordered list of
//! [`ClientOption`] values. Each option mutates a [`ClientConfig`] and may
//! reject its input, which aborts construction with that error.
//!
//! ## Built-in Options
//!
//! | Option | Effect |
//! |--------|--------|
//! | [`user_agent`] | Replaces the default `User-Agent` (empty disables it) |
//! | [`strict_tls`] | Validates server certificates even over https |
//! | [`insecure_skip_verify`] | Sets the certificate policy explicitly |
//! | [`timeout`] | Default deadline for every request |
//! | [`lenient_status`] | Non-200 responses yield empty results instead of errors |
//! | [`status_policy`] | Sets the status policy explicitly |
//! | [`transport`] | Replaces the HTTP transport |
//! | [`authenticator`] | Replaces the login used by `init` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use argocd_rs::{options, Client};
//!
//! let client = Client::new(
//!     "https://argocd.example.com",
//!     "admin",
//!     "secret",
//!     "",
//!     [options::strict_tls(), options::timeout(Duration::from_secs(30))],
//! )?;
//! assert_eq!(client.insecure_skip_verify(), Some(false));
//! # Ok::<(), argocd_rs::ArgoError>(())
//! ```
//!
//! ## TLS Trust Policy
//!
//! When no option sets the policy, certificate validation is **disabled** for
//! `https` base URLs. Argo CD servers reached over cluster-internal addresses
//! usually present self-signed certificates. Use [`strict_tls`] whenever the
//! server has a certificate signed by a trusted authority.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::error::{ArgoError, Result};
use super::transport::Transport;
use crate::auth::Authenticator;

/// How responses with a status other than 200 are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Decode the error body and return [`ArgoError::Api`].
    #[default]
    Strict,
    /// Return the result type's default value without an error.
    ///
    /// Transport faults are still reported.
    Lenient,
}

/// Mutable configuration seen by [`ClientOption`]s during construction.
pub struct ClientConfig {
    base_url: Url,
    /// `User-Agent` header value; `None` sends no header
    pub user_agent: Option<String>,
    /// Certificate policy override; `None` derives it from the URL scheme
    pub insecure_skip_verify: Option<bool>,
    /// Default deadline applied to every request
    pub timeout: Option<Duration>,
    /// Handling of non-200 responses
    pub status_policy: StatusPolicy,
    /// Custom transport; `None` builds a [`ReqwestTransport`](super::ReqwestTransport)
    pub transport: Option<Arc<dyn Transport>>,
    /// Custom login; `None` uses the session endpoint
    pub authenticator: Option<Arc<dyn Authenticator>>,
}

impl ClientConfig {
    pub(crate) fn new(base_url: Url) -> Self {
        Self {
            base_url,
            user_agent: Some(crate::USER_AGENT.to_string()),
            insecure_skip_verify: None,
            timeout: None,
            status_policy: StatusPolicy::default(),
            transport: None,
            authenticator: None,
        }
    }

    /// The normalized base URL. Always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The effective certificate policy: the explicit override if any,
    /// otherwise `true` exactly when the scheme is `https`.
    pub fn resolved_insecure_skip_verify(&self) -> bool {
        self.insecure_skip_verify
            .unwrap_or_else(|| self.base_url.scheme() == "https")
    }

    pub(crate) fn into_base_url(self) -> Url {
        self.base_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("timeout", &self.timeout)
            .field("status_policy", &self.status_policy)
            .field("transport", &self.transport.is_some())
            .field("authenticator", &self.authenticator.is_some())
            .finish()
    }
}

/// A configuration mutator applied during client construction.
pub struct ClientOption(Box<dyn FnOnce(&mut ClientConfig) -> Result<()> + Send>);

impl ClientOption {
    /// Wraps a custom mutator.
    ///
    /// ```rust
    /// use argocd_rs::options::ClientOption;
    ///
    /// let from_env = ClientOption::new(|config| {
    ///     config.user_agent = Some("my-controller/1.0".into());
    ///     Ok(())
    /// });
    /// # let _ = from_env;
    /// ```
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut ClientConfig) -> Result<()> + Send + 'static,
    {
        Self(Box::new(apply))
    }

    pub(crate) fn apply(self, config: &mut ClientConfig) -> Result<()> {
        (self.0)(config)
    }
}

impl fmt::Debug for ClientOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientOption")
    }
}

/// Sets the `User-Agent` header. An empty string disables the header.
pub fn user_agent(agent: impl Into<String>) -> ClientOption {
    let agent = agent.into();
    ClientOption::new(move |config| {
        config.user_agent = if agent.is_empty() { None } else { Some(agent) };
        Ok(())
    })
}

/// Validates server certificates regardless of the URL scheme.
pub fn strict_tls() -> ClientOption {
    insecure_skip_verify(false)
}

/// Sets the certificate policy explicitly.
pub fn insecure_skip_verify(skip: bool) -> ClientOption {
    ClientOption::new(move |config| {
        config.insecure_skip_verify = Some(skip);
        Ok(())
    })
}

/// Sets the default deadline for every request. Zero is rejected.
pub fn timeout(timeout: Duration) -> ClientOption {
    ClientOption::new(move |config| {
        if timeout.is_zero() {
            return Err(ArgoError::InvalidOption(
                "timeout must be greater than zero".to_string(),
            ));
        }
        config.timeout = Some(timeout);
        Ok(())
    })
}

/// Returns empty results for non-200 responses instead of errors.
pub fn lenient_status() -> ClientOption {
    status_policy(StatusPolicy::Lenient)
}

/// Sets the status policy explicitly.
pub fn status_policy(policy: StatusPolicy) -> ClientOption {
    ClientOption::new(move |config| {
        config.status_policy = policy;
        Ok(())
    })
}

/// Replaces the HTTP transport.
///
/// A custom transport owns its own TLS settings, so
/// [`Client::insecure_skip_verify`](super::Client::insecure_skip_verify)
/// reports `None` for it.
pub fn transport(transport: Arc<dyn Transport>) -> ClientOption {
    ClientOption::new(move |config| {
        config.transport = Some(transport);
        Ok(())
    })
}

/// Replaces the login used by [`Client::init`](super::Client::init).
pub fn authenticator(authenticator: Arc<dyn Authenticator>) -> ClientOption {
    ClientOption::new(move |config| {
        config.authenticator = Some(authenticator);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> ClientConfig {
        ClientConfig::new(Url::parse(url).unwrap())
    }

    #[test]
    fn test_tls_policy_follows_scheme() {
        assert!(config("https://argocd.example.com/").resolved_insecure_skip_verify());
        assert!(!config("http://argocd.example.com/").resolved_insecure_skip_verify());
    }

    #[test]
    fn test_strict_tls_overrides_scheme() {
        let mut cfg = config("https://argocd.example.com/");
        strict_tls().apply(&mut cfg).unwrap();
        assert!(!cfg.resolved_insecure_skip_verify());
    }

    #[test]
    fn test_user_agent_empty_disables() {
        let mut cfg = config("http://localhost/");
        assert_eq!(cfg.user_agent.as_deref(), Some(crate::USER_AGENT));
        user_agent("").apply(&mut cfg).unwrap();
        assert!(cfg.user_agent.is_none());
        user_agent("ops-bot/2").apply(&mut cfg).unwrap();
        assert_eq!(cfg.user_agent.as_deref(), Some("ops-bot/2"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut cfg = config("http://localhost/");
        let err = timeout(Duration::ZERO).apply(&mut cfg).unwrap_err();
        assert!(matches!(err, ArgoError::InvalidOption(_)));
        timeout(Duration::from_secs(5)).apply(&mut cfg).unwrap();
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_lenient_status() {
        let mut cfg = config("http://localhost/");
        assert_eq!(cfg.status_policy, StatusPolicy::Strict);
        lenient_status().apply(&mut cfg).unwrap();
        assert_eq!(cfg.status_policy, StatusPolicy::Lenient);
    }
}
