//! Job name, parameter, and definition resolution

use std::collections::HashMap;

use tracing::debug;

use crate::context::GoalInvocation;
use crate::error::{GoalError, GoalResult};
use crate::registration::Registration;

/// Resolve the job name: registration value if present, otherwise the
/// triggering repository's name.
pub async fn job_name(
    registration: &Registration,
    invocation: &GoalInvocation,
) -> GoalResult<String> {
    let name = match &registration.job {
        Some(job) => job
            .resolve(invocation)
            .await
            .map_err(|source| GoalError::Resolve {
                field: "job name",
                source,
            })?,
        None => invocation.commit.repo.clone(),
    };
    debug!(job = %name, "resolved job name");
    Ok(name)
}

/// Resolve the build parameters; absent unless the registration supplies
/// them. A failing derivation is fatal for the execution.
pub async fn parameters(
    registration: &Registration,
    invocation: &GoalInvocation,
) -> GoalResult<Option<HashMap<String, String>>> {
    match &registration.parameters {
        Some(parameters) => {
            let resolved =
                parameters
                    .resolve(invocation)
                    .await
                    .map_err(|source| GoalError::Resolve {
                        field: "parameters",
                        source,
                    })?;
            debug!(count = resolved.len(), "resolved build parameters");
            Ok(Some(resolved))
        }
        None => Ok(None),
    }
}

/// Resolve the job definition document; absence is the common case meaning
/// "do not manage the job's definition".
pub async fn definition(
    registration: &Registration,
    invocation: &GoalInvocation,
) -> GoalResult<Option<String>> {
    match &registration.definition {
        Some(definition) => {
            let resolved =
                definition
                    .resolve(invocation)
                    .await
                    .map_err(|source| GoalError::Resolve {
                        field: "definition",
                        source,
                    })?;
            Ok(Some(resolved))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessConfig;
    use crate::registration::Resolvable;
    use futures::FutureExt;
    use jenkins_goal_domain::fakes::MemoryProgressSink;
    use jenkins_goal_domain::CommitIdentity;
    use std::sync::Arc;

    fn invocation() -> GoalInvocation {
        GoalInvocation::new(
            CommitIdentity {
                owner: "acme".to_string(),
                repo: "app".to_string(),
                sha: "deadbeef".to_string(),
                branch: "main".to_string(),
            },
            "W1",
            Arc::new(MemoryProgressSink::new()),
            ProcessConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_job_name_defaults_to_repository() {
        let name = job_name(&Registration::new(), &invocation())
            .await
            .expect("resolve");
        assert_eq!(name, "app");
    }

    #[tokio::test]
    async fn test_job_name_from_registration_wins() {
        let registration = Registration::new().with_job("ci-build");
        let name = job_name(&registration, &invocation()).await.expect("resolve");
        assert_eq!(name, "ci-build");
    }

    #[tokio::test]
    async fn test_parameters_absent_by_default() {
        let parameters = parameters(&Registration::new(), &invocation())
            .await
            .expect("resolve");
        assert!(parameters.is_none());
    }

    #[tokio::test]
    async fn test_failing_parameter_derivation_is_fatal() {
        let registration = Registration::new().with_parameters(Resolvable::derived(
            |_invocation: &GoalInvocation| {
                async move { anyhow::bail!("parameter lookup failed") }.boxed()
            },
        ));

        let err = parameters(&registration, &invocation()).await.unwrap_err();
        assert!(matches!(
            err,
            GoalError::Resolve {
                field: "parameters",
                ..
            }
        ));
    }
}
