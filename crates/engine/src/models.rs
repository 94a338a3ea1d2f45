//! Core domain models for the dispatcher.
//!
//! These are the types the host hands in (resource selector, credentials,
//! per-item parameters, node context) and the result items handed back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use url::Url;

use crate::EngineError;

/// Base URL used when credentials do not name one.
pub const DEFAULT_BASE_URL: &str = "https://api3.org/api/v1";

/// Node name used for error attribution when the host supplies none.
pub const DEFAULT_NODE_NAME: &str = "API3 Oracle";

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// A category of oracle-network entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    #[serde(rename = "dApis")]
    DApis,
    #[serde(rename = "airnodes")]
    Airnodes,
    #[serde(rename = "oevAuctions")]
    OevAuctions,
    #[serde(rename = "daoGovernance")]
    DaoGovernance,
    #[serde(rename = "staking")]
    Staking,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::DApis,
        Resource::Airnodes,
        Resource::OevAuctions,
        Resource::DaoGovernance,
        Resource::Staking,
    ];

    /// Wire name, as the host selects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::DApis => "dApis",
            Resource::Airnodes => "airnodes",
            Resource::OevAuctions => "oevAuctions",
            Resource::DaoGovernance => "daoGovernance",
            Resource::Staking => "staking",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| EngineError::UnsupportedResource(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// API key and base URL. Read-only once constructed.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Credentials against the public endpoint.
    pub fn with_default_base_url(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_BASE_URL)
    }

    /// Parsed base URL, stripped of any query or fragment.
    ///
    /// # Errors
    /// [`EngineError::InvalidBaseUrl`] unless the URL is absolute http(s).
    pub fn parsed_base_url(&self) -> Result<Url, EngineError> {
        let invalid = |message: String| EngineError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message,
        };

        let mut url = Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".into()));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Parameter values for one input item, keyed by parameter name.
///
/// Values may be strings, numbers, or JSON blobs (either a JSON-encoded
/// string or an already structured value).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Builder-style insert that skips `None`.
    pub fn with_opt<V: Into<Value>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `self` layered over `defaults`: keys present here win.
    pub fn merged_over(&self, defaults: &Parameters) -> Parameters {
        let mut merged = defaults.0.clone();
        for (k, v) in &self.0 {
            merged.insert(k.clone(), v.clone());
        }
        Parameters(merged)
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// NodeContext
// ---------------------------------------------------------------------------

/// Host-side settings for one node invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    /// Used to attribute propagated errors.
    pub node_name: String,
    /// Capture per-item failures as error payloads instead of aborting.
    pub continue_on_fail: bool,
}

impl NodeContext {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            continue_on_fail: false,
        }
    }

    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

impl Default for NodeContext {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_NAME)
    }
}

// ---------------------------------------------------------------------------
// ResultItem
// ---------------------------------------------------------------------------

/// Index of the input item an output item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One output item: the response payload, or `{ "error": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub json: Value,
    pub paired_item: PairedItem,
}

impl ResultItem {
    pub fn success(index: usize, json: Value) -> Self {
        Self {
            json,
            paired_item: PairedItem { item: index },
        }
    }

    pub fn failure(index: usize, error: &EngineError) -> Self {
        Self {
            json: json!({ "error": error.to_string() }),
            paired_item: PairedItem { item: index },
        }
    }

    /// The captured error message, for items produced by [`ResultItem::failure`].
    pub fn error(&self) -> Option<&str> {
        self.json
            .as_object()
            .filter(|obj| obj.len() == 1)
            .and_then(|obj| obj.get("error"))
            .and_then(Value::as_str)
    }
}
