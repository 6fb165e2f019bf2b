//! Client configuration.

use tracing::warn;

use crate::auth::AuthStrategy;
use crate::options::DefaultOptions;
use crate::{Error, Result};

/// Client configuration. Immutable once the client is constructed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `api.example.com` or `https://api.example.com`.
    /// Sanitized at construction to always carry a scheme and no trailing
    /// slash.
    pub root: String,
    /// Deployment stage segment, e.g. `dev`.
    pub stage: Option<String>,
    /// Path prefix segment, e.g. `api`.
    pub prefix: Option<String>,
    /// API version segment, e.g. `v1`.
    pub version: Option<String>,
    /// Emit per-call diagnostics of path and merged options.
    pub verbose: bool,
    /// Reject roots with an explicit non-HTTPS scheme.
    pub secure_only: bool,
    /// How credentials are attached to requests.
    pub strategy: AuthStrategy,
    /// Instance-wide request defaults.
    pub default_options: DefaultOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            stage: None,
            prefix: None,
            version: None,
            verbose: false,
            secure_only: true,
            strategy: AuthStrategy::None,
            default_options: DefaultOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given root and all other defaults.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Create a configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validate and normalize the configuration.
    ///
    /// The root must be non-empty. An explicit non-HTTPS scheme fails under
    /// `secure_only` and only warns otherwise; a schemeless root is promoted
    /// to `https://` unconditionally. Exactly one trailing slash is trimmed
    /// from the root, and all slashes are stripped from stage, prefix, and
    /// version.
    pub(crate) fn sanitize(mut self) -> Result<Self> {
        if self.root.trim().is_empty() {
            return Err(Error::Configuration {
                key: "root",
                message: "must be a non-empty string".to_string(),
            });
        }

        match self.root.split_once("://") {
            Some((scheme, _)) if scheme != "https" => {
                if self.secure_only {
                    return Err(Error::InsecureScheme(scheme.to_string()));
                }
                warn!(scheme, root = %self.root, "root uses a non-HTTPS scheme");
            }
            Some(_) => {}
            None => {
                self.root = format!("https://{}", self.root);
            }
        }

        if let Some(stripped) = self.root.strip_suffix('/') {
            self.root = stripped.to_string();
        }

        for segment in [&mut self.stage, &mut self.prefix, &mut self.version] {
            if let Some(value) = segment {
                *value = value.replace('/', "");
            }
        }

        Ok(self)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the backend root.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the deployment stage segment.
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.config.stage = Some(stage.into());
        self
    }

    /// Set the path prefix segment.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = Some(prefix.into());
        self
    }

    /// Set the API version segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = Some(version.into());
        self
    }

    /// Enable or disable per-call diagnostics.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Allow or reject explicit non-HTTPS roots.
    pub fn secure_only(mut self, secure_only: bool) -> Self {
        self.config.secure_only = secure_only;
        self
    }

    /// Set the authorization strategy.
    pub fn strategy(mut self, strategy: AuthStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the instance-wide request defaults.
    pub fn default_options(mut self, defaults: DefaultOptions) -> Self {
        self.config.default_options = defaults;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
