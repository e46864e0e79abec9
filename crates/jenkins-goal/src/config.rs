//! Server connection configuration
//!
//! Connection info can live on the per-goal registration or come from
//! process-wide defaults; registration fields win. The merged
//! [`ServerEndpoint`] is validated before any remote call happens: a
//! missing url is fatal, and the url must parse as a standard URL so that
//! credentials can be embedded when connecting.

use std::sync::Arc;

use async_trait::async_trait;

use jenkins_goal_domain::{JobServer, ServerError};

use crate::error::{GoalError, GoalResult};

/// Per-registration server connection info. Absent fields fall back to the
/// process-wide [`ServerDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ServerConfig {
    /// Config pointing at a specific server url.
    pub fn new(url: impl Into<String>) -> Self {
        ServerConfig {
            url: Some(url.into()),
            user: None,
            password: None,
        }
    }

    /// Set the user credential.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password credential.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Process-wide server defaults, usually sourced from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDefaults {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ServerDefaults {
    /// Read defaults from `JENKINS_URL`, `JENKINS_USER`, `JENKINS_PASSWORD`.
    pub fn from_env() -> Self {
        ServerDefaults {
            url: std::env::var("JENKINS_URL").ok(),
            user: std::env::var("JENKINS_USER").ok(),
            password: std::env::var("JENKINS_PASSWORD").ok(),
        }
    }
}

/// Process configuration visible to every goal invocation.
#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    /// Server defaults used when the registration leaves fields absent.
    pub jenkins: ServerDefaults,
}

impl ProcessConfig {
    /// Read the full process configuration from the environment.
    pub fn from_env() -> Self {
        ProcessConfig {
            jenkins: ServerDefaults::from_env(),
        }
    }
}

/// The resolved, validated server connection target for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ServerEndpoint {
    /// Merge registration config over process defaults and validate.
    ///
    /// Fails with [`GoalError::MissingServerUrl`] when neither side
    /// supplies a url, before any remote call is attempted.
    pub fn merged(config: Option<&ServerConfig>, defaults: &ServerDefaults) -> GoalResult<Self> {
        let url = config
            .and_then(|c| c.url.clone())
            .or_else(|| defaults.url.clone())
            .ok_or(GoalError::MissingServerUrl)?;
        let endpoint = ServerEndpoint {
            url,
            user: config
                .and_then(|c| c.user.clone())
                .or_else(|| defaults.user.clone()),
            password: config
                .and_then(|c| c.password.clone())
                .or_else(|| defaults.password.clone()),
        };
        endpoint.connect_url()?;
        Ok(endpoint)
    }

    /// The URL to connect with, credentials embedded.
    pub fn connect_url(&self) -> GoalResult<reqwest::Url> {
        let invalid = |reason: String| GoalError::InvalidServerUrl {
            url: self.url.clone(),
            reason,
        };
        let mut url = reqwest::Url::parse(&self.url).map_err(|e| invalid(e.to_string()))?;
        if let Some(user) = &self.user {
            url.set_username(user)
                .map_err(|_| invalid("cannot embed credentials".to_string()))?;
            if let Some(password) = &self.password {
                url.set_password(Some(password))
                    .map_err(|_| invalid("cannot embed credentials".to_string()))?;
            }
        }
        Ok(url)
    }
}

/// Builds a [`JobServer`] for one invocation from the merged endpoint.
///
/// The Jenkins wire protocol is not part of this pack; the host supplies
/// the implementation. Tests use `fakes::FakeConnector`.
#[async_trait]
pub trait ServerConnector: Send + Sync {
    async fn connect(
        &self,
        endpoint: &ServerEndpoint,
    ) -> std::result::Result<Arc<dyn JobServer>, ServerError>;
}
