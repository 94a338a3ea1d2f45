//! The dispatch table: `(resource, operation)` → request shape.
//!
//! Each [`OperationSpec`] declares the HTTP method, a path template whose
//! `{name}` segments are filled from path parameters, and the ordered list of
//! parameters with their placement. Query parameters are emitted in the order
//! they are declared here.

use transport::HttpMethod;
use transport::HttpMethod::{Delete, Get, Post, Put};

use crate::Resource::{Airnodes, DApis, DaoGovernance, OevAuctions, Staking};
use crate::{EngineError, Resource};

// ---------------------------------------------------------------------------
// Parameter declarations
// ---------------------------------------------------------------------------

/// How a raw parameter value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// Empty when missing; optional numbers are also empty when `<= 0`.
    Number,
    /// A JSON document, given as encoded text or as a structured value.
    Json,
}

/// Where a parameter ends up in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Path,
    Query,
    Body,
}

/// Value used when a parameter is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Text(&'static str),
    Number(i64),
    EmptyObject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Name the caller supplies the value under.
    pub name: &'static str,
    /// Name used on the wire (query key or body field).
    pub wire: &'static str,
    pub kind: ValueKind,
    pub placement: Placement,
    /// Empty values are an error unless a fallback exists.
    pub required: bool,
    pub fallback: Option<Fallback>,
}

impl ParamSpec {
    const fn new(name: &'static str, kind: ValueKind, placement: Placement, required: bool) -> Self {
        Self {
            name,
            wire: name,
            kind,
            placement,
            required,
            fallback: None,
        }
    }

    const fn wire(self, wire: &'static str) -> Self {
        Self { wire, ..self }
    }

    const fn or(self, fallback: Fallback) -> Self {
        Self {
            fallback: Some(fallback),
            ..self
        }
    }
}

const fn path(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Text, Placement::Path, true)
}

const fn query(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Text, Placement::Query, false)
}

const fn query_number(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Number, Placement::Query, false)
}

const fn body(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Text, Placement::Body, true)
}

const fn body_opt(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Text, Placement::Body, false)
}

const fn body_json(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Json, Placement::Body, true)
}

const fn body_number(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ValueKind::Number, Placement::Body, true)
}

// ---------------------------------------------------------------------------
// Operation declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationSpec {
    pub resource: Resource,
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub params: &'static [ParamSpec],
}

impl OperationSpec {
    /// True when the operation sends a JSON body (possibly `{}`).
    pub fn has_body(&self) -> bool {
        self.params.iter().any(|p| p.placement == Placement::Body)
    }

    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

const fn op(
    resource: Resource,
    name: &'static str,
    method: HttpMethod,
    path: &'static str,
    params: &'static [ParamSpec],
) -> OperationSpec {
    OperationSpec {
        resource,
        name,
        method,
        path,
        params,
    }
}

static DAPIS: &[OperationSpec] = &[
    op(DApis, "getAllDapis", Get, "/dapis", &[query("network"), query("category"), query("status")]),
    op(DApis, "getDapi", Get, "/dapis/{dapiId}", &[path("dapiId")]),
    op(
        DApis,
        "createDapi",
        Post,
        "/dapis",
        &[
            body("dapiId"),
            body("network"),
            body("sponsorWallet"),
            body_json("updateParameters").or(Fallback::EmptyObject),
        ],
    ),
    op(
        DApis,
        "updateDapi",
        Put,
        "/dapis/{dapiId}",
        &[
            path("dapiId"),
            body_json("updateParameters").or(Fallback::EmptyObject),
            body_opt("sponsorWallet"),
        ],
    ),
    op(DApis, "deleteDapi", Delete, "/dapis/{dapiId}", &[path("dapiId")]),
    op(DApis, "getDapiData", Get, "/dapis/{dapiId}/data", &[path("dapiId"), query_number("timestamp")]),
    op(
        DApis,
        "getDapiHistory",
        Get,
        "/dapis/{dapiId}/history",
        &[
            path("dapiId"),
            ParamSpec::new("interval", ValueKind::Text, Placement::Query, true).or(Fallback::Text("1h")),
            query_number("startTime"),
            query_number("endTime"),
        ],
    ),
];

static AIRNODES: &[OperationSpec] = &[
    op(Airnodes, "getAllAirnodes", Get, "/airnodes", &[query("network"), query("provider"), query("status")]),
    op(Airnodes, "getAirnode", Get, "/airnodes/{airnodeId}", &[path("airnodeId")]),
    op(
        Airnodes,
        "createRequest",
        Post,
        "/airnodes/{airnodeId}/requests",
        &[
            path("airnodeId"),
            body("endpointId"),
            body_json("parameters").or(Fallback::EmptyObject),
            body("sponsorWallet"),
        ],
    ),
    op(
        Airnodes,
        "getRequest",
        Get,
        "/airnodes/{airnodeId}/requests/{requestId}",
        &[path("airnodeId"), path("requestId")],
    ),
    op(Airnodes, "getEndpoints", Get, "/airnodes/{airnodeId}/endpoints", &[path("airnodeId")]),
    op(
        Airnodes,
        "deployAirnode",
        Post,
        "/airnodes",
        &[
            body_json("config").or(Fallback::EmptyObject),
            body_json("secrets").or(Fallback::EmptyObject),
            body("networkDeploy").wire("network"),
        ],
    ),
    op(
        Airnodes,
        "updateAirnode",
        Put,
        "/airnodes/{airnodeId}",
        &[path("airnodeId"), body_json("config").or(Fallback::EmptyObject)],
    ),
    op(Airnodes, "removeAirnode", Delete, "/airnodes/{airnodeId}", &[path("airnodeId")]),
];

static OEV_AUCTIONS: &[OperationSpec] = &[
    op(OevAuctions, "getAllAuctions", Get, "/oev/auctions", &[query("network"), query("status"), query("dapiId")]),
    op(OevAuctions, "getAuction", Get, "/oev/auctions/{auctionId}", &[path("auctionId")]),
    op(
        OevAuctions,
        "createAuction",
        Post,
        "/oev/auctions",
        &[
            body("dapiId"),
            body("network"),
            body("reservePrice"),
            body_number("duration").or(Fallback::Number(3600)),
        ],
    ),
    op(
        OevAuctions,
        "placeBid",
        Post,
        "/oev/auctions/{auctionId}/bids",
        &[path("auctionId"), body("bidAmount"), body("signature")],
    ),
    op(OevAuctions, "getAuctionBids", Get, "/oev/auctions/{auctionId}/bids", &[path("auctionId")]),
    op(
        OevAuctions,
        "updateAuction",
        Put,
        "/oev/auctions/{auctionId}",
        &[
            path("auctionId"),
            body_opt("newReservePrice").wire("reservePrice"),
            ParamSpec::new("newDuration", ValueKind::Number, Placement::Body, false).wire("duration"),
        ],
    ),
    op(OevAuctions, "cancelAuction", Delete, "/oev/auctions/{auctionId}", &[path("auctionId")]),
    op(
        OevAuctions,
        "getOevRewards",
        Get,
        "/oev/rewards",
        &[
            ParamSpec::new("address", ValueKind::Text, Placement::Query, true),
            query("network"),
            query("startTime"),
            query("endTime"),
        ],
    ),
];

static DAO_GOVERNANCE: &[OperationSpec] = &[
    op(DaoGovernance, "getAllProposals", Get, "/dao/proposals", &[query("status"), query("category"), query("voter")]),
    op(DaoGovernance, "getProposal", Get, "/dao/proposals/{proposalId}", &[path("proposalId")]),
    op(
        DaoGovernance,
        "createProposal",
        Post,
        "/dao/proposals",
        &[body("title"), body("description"), body_json("actions"), body("signature")],
    ),
    op(
        DaoGovernance,
        "castVote",
        Post,
        "/dao/proposals/{proposalId}/votes",
        &[
            path("proposalId"),
            body("support").or(Fallback::Text("for")),
            body("signature"),
            body_opt("votingPower"),
        ],
    ),
    op(DaoGovernance, "getProposalVotes", Get, "/dao/proposals/{proposalId}/votes", &[path("proposalId")]),
    op(
        DaoGovernance,
        "updateProposal",
        Put,
        "/dao/proposals/{proposalId}",
        &[path("proposalId"), body("description")],
    ),
    op(DaoGovernance, "getTreasury", Get, "/dao/treasury", &[]),
    op(DaoGovernance, "getDelegates", Get, "/dao/delegates", &[query("orderBy"), query("minVotingPower")]),
    op(DaoGovernance, "delegateVotes", Post, "/dao/delegate", &[body("delegatee"), body("signature")]),
];

static STAKING: &[OperationSpec] = &[
    op(Staking, "getAllPools", Get, "/staking/pools", &[query("network"), query("status"), query_number("minApr")]),
    op(Staking, "getPool", Get, "/staking/pools/{poolId}", &[path("poolId")]),
    op(
        Staking,
        "stakeTokens",
        Post,
        "/staking/pools/{poolId}/stake",
        &[path("poolId"), body("amount"), body("signature")],
    ),
    op(
        Staking,
        "unstakeTokens",
        Post,
        "/staking/pools/{poolId}/unstake",
        &[path("poolId"), body("amount"), body("signature")],
    ),
    op(Staking, "getStakingPositions", Get, "/staking/positions/{address}", &[path("address"), query("network")]),
    op(
        Staking,
        "getStakingRewards",
        Get,
        "/staking/rewards/{address}",
        &[path("address"), query("network"), query("startTime"), query("endTime")],
    ),
    op(Staking, "claimRewards", Post, "/staking/rewards/claim", &[body("poolId"), body("signature")]),
    op(
        Staking,
        "updatePosition",
        Put,
        "/staking/positions/{positionId}",
        &[
            path("positionId"),
            body("action").or(Fallback::Text("increase")),
            body("amount"),
            body("signature"),
        ],
    ),
    op(
        Staking,
        "getStakingHistory",
        Get,
        "/staking/history/{address}",
        &[path("address"), query("network"), query("startTime"), query("endTime")],
    ),
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Every operation a resource supports, in declaration order.
pub fn operations(resource: Resource) -> &'static [OperationSpec] {
    match resource {
        Resource::DApis => DAPIS,
        Resource::Airnodes => AIRNODES,
        Resource::OevAuctions => OEV_AUCTIONS,
        Resource::DaoGovernance => DAO_GOVERNANCE,
        Resource::Staking => STAKING,
    }
}

/// The whole table.
pub fn all() -> impl Iterator<Item = &'static OperationSpec> {
    Resource::ALL.into_iter().flat_map(operations)
}

/// Look up one operation.
///
/// # Errors
/// [`EngineError::UnknownOperation`] if `resource` has no such operation.
pub fn find(resource: Resource, operation: &str) -> Result<&'static OperationSpec, EngineError> {
    operations(resource)
        .iter()
        .find(|spec| spec.name == operation)
        .ok_or_else(|| EngineError::UnknownOperation {
            resource: resource.to_string(),
            operation: operation.to_string(),
        })
}

/// Resolve string selectors as the host passes them.
pub fn resolve(resource: &str, operation: &str) -> Result<&'static OperationSpec, EngineError> {
    find(resource.parse()?, operation)
}
