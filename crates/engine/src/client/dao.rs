//! DAO governance operations.

use serde_json::Value;

use super::Api3Client;
use crate::{EngineError, Parameters, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoteSupport {
    #[default]
    For,
    Against,
    Abstain,
}

impl VoteSupport {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteSupport::For => "for",
            VoteSupport::Against => "against",
            VoteSupport::Abstain => "abstain",
        }
    }
}

impl Api3Client {
    pub async fn get_all_proposals(
        &self,
        status: Option<&str>,
        category: Option<&str>,
        voter: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with_opt("status", status)
            .with_opt("category", category)
            .with_opt("voter", voter);
        self.call(Resource::DaoGovernance, "getAllProposals", &params).await
    }

    pub async fn get_proposal(&self, proposal_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("proposalId", proposal_id);
        self.call(Resource::DaoGovernance, "getProposal", &params).await
    }

    pub async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        actions: Value,
        signature: &str,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("title", title)
            .with("description", description)
            .with("actions", actions)
            .with("signature", signature);
        self.call(Resource::DaoGovernance, "createProposal", &params).await
    }

    pub async fn cast_vote(
        &self,
        proposal_id: &str,
        support: VoteSupport,
        signature: &str,
        voting_power: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("proposalId", proposal_id)
            .with("support", support.as_str())
            .with("signature", signature)
            .with_opt("votingPower", voting_power);
        self.call(Resource::DaoGovernance, "castVote", &params).await
    }

    pub async fn get_proposal_votes(&self, proposal_id: &str) -> Result<Value, EngineError> {
        let params = Parameters::new().with("proposalId", proposal_id);
        self.call(Resource::DaoGovernance, "getProposalVotes", &params).await
    }

    pub async fn update_proposal(&self, proposal_id: &str, description: &str) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("proposalId", proposal_id)
            .with("description", description);
        self.call(Resource::DaoGovernance, "updateProposal", &params).await
    }

    pub async fn get_treasury(&self) -> Result<Value, EngineError> {
        self.call(Resource::DaoGovernance, "getTreasury", &Parameters::new()).await
    }

    pub async fn get_delegates(
        &self,
        order_by: Option<&str>,
        min_voting_power: Option<&str>,
    ) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with_opt("orderBy", order_by)
            .with_opt("minVotingPower", min_voting_power);
        self.call(Resource::DaoGovernance, "getDelegates", &params).await
    }

    pub async fn delegate_votes(&self, delegatee: &str, signature: &str) -> Result<Value, EngineError> {
        let params = Parameters::new()
            .with("delegatee", delegatee)
            .with("signature", signature);
        self.call(Resource::DaoGovernance, "delegateVotes", &params).await
    }
}
