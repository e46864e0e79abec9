//! In-memory fakes for execution-crate contracts (testing only)
//!
//! The collaborator fakes themselves live in `jenkins_goal_domain::fakes`;
//! this module only adds the connector, which hands a pre-built server to
//! every invocation and records the endpoints it was asked to connect to.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use jenkins_goal_domain::{JobServer, ServerError};

use crate::config::{ServerConnector, ServerEndpoint};

/// Connector that always yields the same server instance.
pub struct FakeConnector {
    server: Arc<dyn JobServer>,
    endpoints: Mutex<Vec<ServerEndpoint>>,
}

impl FakeConnector {
    pub fn new(server: Arc<dyn JobServer>) -> Self {
        FakeConnector {
            server,
            endpoints: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints passed to `connect`, in order.
    pub fn endpoints(&self) -> Vec<ServerEndpoint> {
        self.endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServerConnector for FakeConnector {
    async fn connect(
        &self,
        endpoint: &ServerEndpoint,
    ) -> std::result::Result<Arc<dyn JobServer>, ServerError> {
        self.endpoints.lock().unwrap().push(endpoint.clone());
        Ok(self.server.clone())
    }
}
