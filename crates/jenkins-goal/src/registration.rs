//! Goal registration configuration
//!
//! A [`Registration`] is created once when the goal is registered with the
//! orchestrator and never mutated. Job name, parameters, and definition can
//! each be a fixed value or be derived from the invocation context at
//! execution time; [`Resolvable`] carries that choice as a tagged variant
//! resolved through a single accessor, so no runtime type inspection is
//! needed.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::config::ServerConfig;
use crate::context::GoalInvocation;

/// A registration field derived from the invocation context.
pub type ResolverFn<T> =
    Arc<dyn for<'a> Fn(&'a GoalInvocation) -> BoxFuture<'a, anyhow::Result<T>> + Send + Sync>;

/// A registration field that is either a fixed value or derived per
/// invocation.
#[derive(Clone)]
pub enum Resolvable<T> {
    /// Fixed value, used verbatim.
    Value(T),

    /// Derived from the invocation context, awaited once per execution.
    Derived(ResolverFn<T>),
}

impl<T: Clone> Resolvable<T> {
    /// Resolve the field for one invocation.
    pub async fn resolve(&self, invocation: &GoalInvocation) -> anyhow::Result<T> {
        match self {
            Resolvable::Value(value) => Ok(value.clone()),
            Resolvable::Derived(f) => f(invocation).await,
        }
    }
}

impl<T> Resolvable<T> {
    /// Wrap a derivation closure.
    pub fn derived<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a GoalInvocation) -> BoxFuture<'a, anyhow::Result<T>>
            + Send
            + Sync
            + 'static,
    {
        Resolvable::Derived(Arc::new(f))
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(value: T) -> Self {
        Resolvable::Value(value)
    }
}

impl From<&str> for Resolvable<String> {
    fn from(value: &str) -> Self {
        Resolvable::Value(value.to_string())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolvable::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Resolvable::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Immutable configuration of one Jenkins goal instance.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    /// Job name; absent means "use the triggering repository's name".
    pub job: Option<Resolvable<String>>,

    /// Only reconcile the job definition, never trigger a build.
    pub converge_only: bool,

    /// Build parameters; absent means an unparameterized trigger.
    pub parameters: Option<Resolvable<HashMap<String, String>>>,

    /// Job definition document; absent means "do not manage the job's
    /// definition".
    pub definition: Option<Resolvable<String>>,

    /// Server connection info, merged over the process-wide defaults.
    pub server: Option<ServerConfig>,
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the job name (fixed or derived).
    pub fn with_job(mut self, job: impl Into<Resolvable<String>>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Restrict the goal to definition reconciliation.
    pub fn converge_only(mut self) -> Self {
        self.converge_only = true;
        self
    }

    /// Set the build parameters (fixed or derived).
    pub fn with_parameters(
        mut self,
        parameters: impl Into<Resolvable<HashMap<String, String>>>,
    ) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    /// Set the job definition document (fixed or derived).
    pub fn with_definition(mut self, definition: impl Into<Resolvable<String>>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Set per-goal server connection info.
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = Some(server);
        self
    }
}
