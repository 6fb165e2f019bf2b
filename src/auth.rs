//! Authorization strategies and credential resolution.
//!
//! Credentials may be supplied as literals or as zero-argument providers.
//! Providers are re-resolved at the moment of use, never cached, so a value
//! rotated externally (for example a refreshed session token) is honored on
//! the next call without re-authorizing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::options::HeaderSource;
use crate::{Error, Result};

/// How credentials are attached to outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStrategy {
    /// No authorization; requests are never considered authorized.
    #[default]
    None,
    /// `Authorization: Basic <base64(username:password)>`.
    Basic,
    /// `Authorization: Bearer <token>`.
    Bearer,
    /// Arbitrary headers from a provider, gated by a validate predicate.
    Custom,
}

impl AuthStrategy {
    /// Canonical name, also used as the `Authorization` scheme word.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Basic => "Basic",
            Self::Bearer => "Bearer",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthStrategy {
    type Err = Error;

    /// Parse a strategy name, canonicalizing by upper-casing the first
    /// character and lower-casing the rest (`"bearer"`, `"BEARER"` and
    /// `"Bearer"` are all accepted).
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let canonical = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        };
        match canonical.as_str() {
            "None" => Ok(Self::None),
            "Basic" => Ok(Self::Basic),
            "Bearer" => Ok(Self::Bearer),
            "Custom" => Ok(Self::Custom),
            _ => Err(Error::Configuration {
                key: "authorization_strategy",
                message: format!("unrecognized strategy `{}`", s),
            }),
        }
    }
}

/// A credential value: either a literal string or a zero-argument provider
/// resolved freshly on every read.
#[derive(Clone)]
pub enum Secret {
    /// A fixed value.
    Literal(String),
    /// A provider consulted at the point of use.
    Provider(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Secret {
    /// Wrap a provider function.
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Provider(Arc::new(f))
    }

    /// Resolve the current value.
    pub fn resolve(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Provider(f) => f(),
        }
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(_) => f.write_str("Secret::Literal(..)"),
            Self::Provider(_) => f.write_str("Secret::Provider(..)"),
        }
    }
}

/// Predicate deciding whether a custom-auth session is currently valid.
pub type ValidateFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Arguments to [`RestClient::authorize`](crate::RestClient::authorize).
///
/// Exactly one of the documented combinations must be supplied: a token
/// (any strategy), username and password (`Basic`), or a headers provider
/// plus validate predicate (`Custom`).
#[derive(Default)]
pub struct AuthorizeArgs {
    /// Token, honored unconditionally regardless of strategy.
    pub token: Option<Secret>,
    /// Username for the `Basic` strategy.
    pub username: Option<Secret>,
    /// Password for the `Basic` strategy.
    pub password: Option<Secret>,
    /// Header provider for the `Custom` strategy.
    pub headers: Option<HeaderSource>,
    /// Validity predicate for the `Custom` strategy.
    pub validate: Option<ValidateFn>,
}

impl AuthorizeArgs {
    /// Authorize with a token.
    pub fn with_token(token: impl Into<Secret>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Authorize with username and password (for the `Basic` strategy).
    pub fn with_credentials(username: impl Into<Secret>, password: impl Into<Secret>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Authorize with custom headers and a validate predicate (for the
    /// `Custom` strategy).
    pub fn with_custom<F>(headers: HeaderSource, validate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            headers: Some(headers),
            validate: Some(Arc::new(validate)),
            ..Self::default()
        }
    }
}

/// Stored credential state, replaced whole by each `authorize` call.
#[derive(Clone)]
enum AuthState {
    Unset,
    Token(Secret),
    Custom {
        headers: HeaderSource,
        validate: ValidateFn,
    },
}

/// Per-client authorization state machine.
pub(crate) struct Authorizer {
    strategy: AuthStrategy,
    state: RwLock<AuthState>,
}

impl Authorizer {
    pub(crate) fn new(strategy: AuthStrategy) -> Self {
        Self {
            strategy,
            state: RwLock::new(AuthState::Unset),
        }
    }

    /// Register credentials. Token wins over everything else; Basic needs
    /// both username and password; Custom needs both headers and validate.
    pub(crate) fn authorize(&self, args: AuthorizeArgs) -> Result<()> {
        let next = if let Some(token) = args.token {
            AuthState::Token(token)
        } else if self.strategy == AuthStrategy::Basic {
            match (args.username, args.password) {
                (Some(username), Some(password)) => {
                    // Encode lazily on every read so rotated credentials
                    // are picked up without re-authorizing.
                    AuthState::Token(Secret::provider(move || {
                        BASE64.encode(format!("{}:{}", username.resolve(), password.resolve()))
                    }))
                }
                _ => {
                    return Err(Error::InvalidAuthorizationArgs(
                        "Basic strategy requires both username and password".to_string(),
                    ));
                }
            }
        } else if self.strategy == AuthStrategy::Custom {
            match (args.headers, args.validate) {
                (Some(headers), Some(validate)) => AuthState::Custom { headers, validate },
                _ => {
                    return Err(Error::InvalidAuthorizationArgs(
                        "Custom strategy requires both a headers provider and a validate predicate"
                            .to_string(),
                    ));
                }
            }
        } else {
            return Err(Error::InvalidAuthorizationArgs(format!(
                "no token supplied and strategy {} accepts nothing else",
                self.strategy
            )));
        };

        *self.state.write() = next;
        Ok(())
    }

    /// Decide whether the next request should carry credentials.
    ///
    /// Custom sessions are re-validated on every call; token state is
    /// re-resolved and checked for a non-blank value.
    pub(crate) fn is_authorized(&self) -> bool {
        let snapshot = self.state.read().clone();
        match snapshot {
            AuthState::Custom { validate, .. } if self.strategy == AuthStrategy::Custom => {
                validate()
            }
            AuthState::Token(token) if self.strategy != AuthStrategy::None => {
                !token.resolve().trim().is_empty()
            }
            _ => false,
        }
    }

    /// Inject authorization headers into `headers`. Call only when
    /// [`is_authorized`](Self::is_authorized) holds. Custom headers override
    /// whatever the call already carries.
    pub(crate) fn apply(&self, headers: &mut HashMap<String, String>) {
        let snapshot = self.state.read().clone();
        match snapshot {
            AuthState::Custom {
                headers: source, ..
            } => {
                for (name, value) in source.resolve() {
                    headers.insert(name, value);
                }
            }
            AuthState::Token(token) => {
                headers.insert(
                    "Authorization".to_string(),
                    format!("{} {}", self.strategy, token.resolve()),
                );
            }
            AuthState::Unset => {}
        }
    }
}
