//! Staking operations.

use serde_json::Value;

use super::Api3Client;
use crate::{EngineError, Parameters, Resource};

/// What [`Api3Client::update_position`] does to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionAction {
    #[default]
    Increase,
    Decrease,
    Compound,
}

impl PositionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionAction::Increase => "increase",
            PositionAction::Decrease => "decrease",
            PositionAction::Compound => "compound",
        }
    }
}

impl Api3Client {
    pub async fn get_all_pools(
        &self,
        network: Option<&str>,
        status: Option<&str>,
        min_apr: Option<f64>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with_opt("network", network)
            .with_opt("status", status)
            .with_opt("minApr", min_apr);
        self.call(Resource::Staking, "getAllPools", &params).await
    }

    pub async fn get_pool(&self, pool_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("poolId", pool_id);
        self.call(Resource::Staking, "getPool", &params).await
    }

    pub async fn stake_tokens(&self, pool_id: &str, amount: &str, signature: &str) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("poolId", pool_id)
            .with("amount", amount)
            .with("signature", signature);
        self.call(Resource::Staking, "stakeTokens", &params).await
    }

    pub async fn unstake_tokens(&self, pool_id: &str, amount: &str, signature: &str) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("poolId", pool_id)
            .with("amount", amount)
            .with("signature", signature);
        self.call(Resource::Staking, "unstakeTokens", &params).await
    }

    pub async fn get_staking_positions(&self, address: &str, network: Option<&str>) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("address", address)
            .with_opt("network", network);
        self.call(Resource::Staking, "getStakingPositions", &params).await
    }

    pub async fn get_staking_rewards(
        &self,
        address: &str,
        network: Option<&str>,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("address", address)
            .with_opt("network", network)
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time);
        self.call(Resource::Staking, "getStakingRewards", &params).await
    }

    pub async fn claim_rewards(&self, pool_id: &str, signature: &str) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("poolId", pool_id)
            .with("signature", signature);
        self.call(Resource::Staking, "claimRewards", &params).await
    }

    pub async fn update_position(
        &self,
        position_id: &str,
        action: PositionAction,
        amount: &str,
        signature: &str,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("positionId", position_id)
            .with("action", action.as_str())
            .with("amount", amount)
            .with("signature", signature);
        self.call(Resource::Staking, "updatePosition", &params).await
    }

    pub async fn get_staking_history(
        &self,
        address: &str,
        network: Option<&str>,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("address", address)
            .with_opt("network", network)
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time);
        self.call(Resource::Staking, "getStakingHistory", &params).await
    }
}
