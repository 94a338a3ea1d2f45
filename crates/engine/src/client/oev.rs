//! OEV auction operations.

use serde_json::Value;

use super::Api3Client;
use crate::{EngineError, Parameters, Resource};

impl Api3Client {
    pub async fn get_all_auctions(
        &self,
        network: Option<&str>,
        status: Option<&str>,
        dapi_id: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with_opt("network", network)
            .with_opt("status", status)
            .with_opt("dapiId", dapi_id);
        self.call(Resource::OevAuctions, "getAllAuctions", &params).await
    }

    pub async fn get_auction(&self, auction_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("auctionId", auction_id);
        self.call(Resource::OevAuctions, "getAuction", &params).await
    }

    /// `duration` is in seconds and defaults to one hour.
    pub async fn create_auction(
        &self,
        dapi_id: &str,
        network: &str,
        reserve_price: &str,
        duration: Option<i64>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("dapiId", dapi_id)
            .with("network", network)
            .with("reservePrice", reserve_price)
            .with_opt("duration", duration);
        self.call(Resource::OevAuctions, "createAuction", &params).await
    }

    pub async fn place_bid(
        &self,
        auction_id: &str,
        bid_amount: &str,
        signature: &str,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("auctionId", auction_id)
            .with("bidAmount", bid_amount)
            .with("signature", signature);
        self.call(Resource::OevAuctions, "placeBid", &params).await
    }

    pub async fn get_auction_bids(&self, auction_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("auctionId", auction_id);
        self.call(Resource::OevAuctions, "getAuctionBids", &params).await
    }

    pub async fn update_auction(
        &self,
        auction_id: &str,
        new_reserve_price: Option<&str>,
        new_duration: Option<i64>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("auctionId", auction_id)
            .with_opt("newReservePrice", new_reserve_price)
            .with_opt("newDuration", new_duration);
        self.call(Resource::OevAuctions, "updateAuction", &params).await
    }

    pub async fn cancel_auction(&self, auction_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("auctionId", auction_id);
        self.call(Resource::OevAuctions, "cancelAuction", &params).await
    }

    pub async fn get_oev_rewards(
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
        self.call(Resource::OevAuctions, "getOevRewards", &params).await
    }
}
