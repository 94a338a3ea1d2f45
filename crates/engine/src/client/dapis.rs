//! dAPI (data feed) operations.

use serde_json::Value;

use super::Api3Client;
use crate::{EngineError, Parameters, Resource};

/// Aggregation interval for [`Api3Client::get_dapi_history`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryInterval {
    OneMinute,
    FiveMinutes,
    #[default]
    OneHour,
    OneDay,
}

impl HistoryInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryInterval::OneMinute => "1m",
            HistoryInterval::FiveMinutes => "5m",
            HistoryInterval::OneHour => "1h",
            HistoryInterval::OneDay => "1d",
        }
    }
}

impl Api3Client {
    pub async fn get_all_dapis(
        &self,
        network: Option<&str>,
        category: Option<&str>,
        status: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with_opt("network", network)
            .with_opt("category", category)
            .with_opt("status", status);
        self.call(Resource::DApis, "getAllDapis", &params).await
    }

    pub async fn get_dapi(&self, dapi_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("dapiId", dapi_id);
        self.call(Resource::DApis, "getDapi", &params).await
    }

    /// Subscribe to a dAPI. `update_parameters` is sent as the JSON object
    /// it is.
    pub async fn create_dapi(
        &self,
        dapi_id: &str,
        network: &str,
        sponsor_wallet: &str,
        update_parameters: Value,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("dapiId", dapi_id)
            .with("network", network)
            .with("sponsorWallet", sponsor_wallet)
            .with("updateParameters", update_parameters);
        self.call(Resource::DApis, "createDapi", &params).await
    }

    pub async fn update_dapi(
        &self,
        dapi_id: &str,
        update_parameters: Value,
        sponsor_wallet: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("dapiId", dapi_id)
            .with("updateParameters", update_parameters)
            .with_opt("sponsorWallet", sponsor_wallet);
        self.call(Resource::DApis, "updateDapi", &params).await
    }

    pub async fn delete_dapi(&self, dapi_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("dapiId", dapi_id);
        self.call(Resource::DApis, "deleteDapi", &params).await
    }

    /// Latest value, or the value at `timestamp` (unix seconds).
    pub async fn get_dapi_data(
        &self,
        dapi_id: &str,
        timestamp: Option<i64>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("dapiId", dapi_id)
            .with_opt("timestamp", timestamp);
        self.call(Resource::DApis, "getDapiData", &params).await
    }

    pub async fn get_dapi_history(
        &self,
        dapi_id: &str,
        interval: HistoryInterval,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("dapiId", dapi_id)
            .with("interval", interval.as_str())
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time);
        self.call(Resource::DApis, "getDapiHistory", &params).await
    }
}
