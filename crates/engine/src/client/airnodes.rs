//! Airnode operations.

use serde_json::Value;

use super::Api3Client;
use crate::{EngineError, Parameters, Resource};

impl Api3Client {
    pub async fn get_all_airnodes(
        &self,
        network: Option<&str>,
        provider: Option<&str>,
        status: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with_opt("network", network)
            .with_opt("provider", provider)
            .with_opt("status", status);
        self.call(Resource::Airnodes, "getAllAirnodes", &params).await
    }

    pub async fn get_airnode(&self, airnode_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("airnodeId", airnode_id);
        self.call(Resource::Airnodes, "getAirnode", &params).await
    }

    pub async fn create_request(
        &self,
        airnode_id: &str,
        endpoint_id: &str,
        parameters: Value,
        sponsor_wallet: &str,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("airnodeId", airnode_id)
            .with("endpointId", endpoint_id)
            .with("parameters", parameters)
            .with("sponsorWallet", sponsor_wallet);
        self.call(Resource::Airnodes, "createRequest", &params).await
    }

    pub async fn get_request(&self, airnode_id: &str, request_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("airnodeId", airnode_id)
            .with("requestId", request_id);
        self.call(Resource::Airnodes, "getRequest", &params).await
    }

    pub async fn get_endpoints(&self, airnode_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("airnodeId", airnode_id);
        self.call(Resource::Airnodes, "getEndpoints", &params).await
    }

    pub async fn deploy_airnode(
        &self,
        config: Value,
        secrets: Value,
        network: &str,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("config", config)
            .with("secrets", secrets)
            .with("networkDeploy", network);
        self.call(Resource::Airnodes, "deployAirnode", &params).await
    }

    pub async fn update_airnode(&self, airnode_id: &str, config: Value) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("airnodeId", airnode_id)
            .with("config", config);
        self.call(Resource::Airnodes, "updateAirnode", &params).await
    }

    pub async fn remove_airnode(&self, airnode_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("airnodeId", airnode_id);
        self.call(Resource::Airnodes, "removeAirnode", &params).await
    }
}
