//! Turns an [`OperationSpec`] plus one item's parameters into a
//! [`CallDescriptor`].
//!
//! All parameters are resolved before the URL is assembled, so every
//! validation error surfaces before anything is sent.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};
use transport::CallDescriptor;

use crate::operations::{Fallback, OperationSpec, ParamSpec, Placement, ValueKind};
use crate::{Credentials, EngineError, Parameters};

/// Build the request for one item.
///
/// # Errors
/// - [`EngineError::InvalidJson`] if a JSON parameter does not parse.
/// - [`EngineError::MissingParameter`] if a required parameter is empty and
///   has no fallback.
/// - [`EngineError::InvalidParameter`] if a value has the wrong shape.
/// - [`EngineError::InvalidBaseUrl`] if the credentials' base URL is unusable.
pub fn build_call(
    spec: &OperationSpec,
    params: &Parameters,
    credentials: &Credentials,
) -> Result<CallDescriptor, EngineError> {
    let mut segments: HashMap<&str, String> = HashMap::new();
    let mut query: Vec<(String, String)> = Vec::new();
    let mut body: Map<String, Value> = Map::new();

    for param in spec.params {
        let Some(value) = resolve(param, params.get(param.name))? else {
            continue;
        };
        match param.placement {
            Placement::Path => {
                segments.insert(param.name, to_text(&value));
            }
            Placement::Query => query.push((param.wire.to_string(), to_text(&value))),
            Placement::Body => {
                body.insert(param.wire.to_string(), value);
            }
        }
    }

    let mut url = credentials.parsed_base_url()?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| EngineError::InvalidBaseUrl {
                url: credentials.base_url.clone(),
                message: "URL cannot carry a path".into(),
            })?;
        path.pop_if_empty();
        for segment in spec.path.split('/').filter(|s| !s.is_empty()) {
            match placeholder(segment) {
                Some(name) => {
                    let value = segments.get(name).ok_or_else(|| EngineError::MissingParameter {
                        parameter: name.to_string(),
                    })?;
                    path.push(value);
                }
                None => {
                    path.push(segment);
                }
            }
        }
    }

    Ok(CallDescriptor {
        method: spec.method,
        url,
        headers: vec![
            ("Authorization".to_string(), credentials.bearer()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ],
        query,
        body: spec.has_body().then_some(Value::Object(body)),
    })
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// `Ok(None)` means "leave it out of the request".
fn resolve(param: &ParamSpec, raw: Option<&Value>) -> Result<Option<Value>, EngineError> {
    let value = match param.kind {
        ValueKind::Text => text_value(param, raw)?,
        ValueKind::Number => number_value(param, raw)?,
        ValueKind::Json => json_value(param, raw)?,
    };

    match (value, param.fallback) {
        (Some(v), _) => Ok(Some(v)),
        (None, Some(fallback)) => Ok(Some(fallback_value(fallback))),
        (None, None) if param.required => Err(EngineError::MissingParameter {
            parameter: param.name.to_string(),
        }),
        (None, None) => Ok(None),
    }
}

fn text_value(param: &ParamSpec, raw: Option<&Value>) -> Result<Option<Value>, EngineError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(Value::String(s.clone()))),
        Some(Value::Number(n)) => Ok(Some(Value::String(n.to_string()))),
        Some(Value::Bool(b)) => Ok(Some(Value::String(b.to_string()))),
        Some(Value::Array(_) | Value::Object(_)) => Err(EngineError::InvalidParameter {
            parameter: param.name.to_string(),
            message: "expected a string".into(),
        }),
    }
}

fn number_value(param: &ParamSpec, raw: Option<&Value>) -> Result<Option<Value>, EngineError> {
    let invalid = |message: String| EngineError::InvalidParameter {
        parameter: param.name.to_string(),
        message,
    };

    let number = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.clone(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => parse_number(s.trim())
            .ok_or_else(|| invalid(format!("expected a number, got '{s}'")))?,
        Some(other) => return Err(invalid(format!("expected a number, got {other}"))),
    };

    // Only optional numbers treat `<= 0` as unset; an explicit value for a
    // required one is sent as given.
    if param.required || number.as_f64().is_some_and(|n| n > 0.0) {
        Ok(Some(Value::Number(number)))
    } else {
        Ok(None)
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn json_value(param: &ParamSpec, raw: Option<&Value>) -> Result<Option<Value>, EngineError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => serde_json::from_str(s)
            .map(Some)
            .map_err(|e| EngineError::InvalidJson {
                parameter: param.name.to_string(),
                message: e.to_string(),
            }),
        Some(structured) => Ok(Some(structured.clone())),
    }
}

fn fallback_value(fallback: Fallback) -> Value {
    match fallback {
        Fallback::Text(s) => Value::String(s.to_string()),
        Fallback::Number(n) => Value::Number(n.into()),
        Fallback::EmptyObject => Value::Object(Map::new()),
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::resolve as spec;
    use serde_json::json;
    use transport::HttpMethod;

    fn creds() -> Credentials {
        Credentials::new("test-api-key", "https://api3.org/api/v1")
    }

    fn build(resource: &str, operation: &str, params: Parameters) -> Result<CallDescriptor, EngineError> {
        build_call(spec(resource, operation).unwrap(), &params, &creds())
    }

    #[test]
    fn get_dapi_builds_bearer_get() {
        let call = build("dApis", "getDapi", Parameters::new().with("dapiId", "dapi1")).unwrap();
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.full_url().as_str(), "https://api3.org/api/v1/dapis/dapi1");
        assert_eq!(call.header("Authorization"), Some("Bearer test-api-key"));
        assert_eq!(call.header("Content-Type"), Some("application/json"));
        assert_eq!(call.body, None);
    }

    #[test]
    fn empty_filters_are_omitted_from_the_query() {
        let params = Parameters::new()
            .with("network", "ethereum")
            .with("category", "")
            .with("status", "active");
        let call = build("dApis", "getAllDapis", params).unwrap();
        assert_eq!(
            call.full_url().as_str(),
            "https://api3.org/api/v1/dapis?network=ethereum&status=active"
        );
        assert_eq!(call.query_value("category"), None);

        let call = build("dApis", "getAllDapis", Parameters::new()).unwrap();
        assert!(call.query.is_empty());
        assert_eq!(call.full_url().as_str(), "https://api3.org/api/v1/dapis");
    }

    #[test]
    fn non_positive_numbers_are_omitted() {
        let call = build(
            "dApis",
            "getDapiData",
            Parameters::new().with("dapiId", "d").with("timestamp", 0),
        )
        .unwrap();
        assert!(call.query.is_empty());

        let call = build(
            "dApis",
            "getDapiData",
            Parameters::new().with("dapiId", "d").with("timestamp", 1_700_000_000),
        )
        .unwrap();
        assert_eq!(call.query_value("timestamp"), Some("1700000000"));

        let call = build(
            "staking",
            "getAllPools",
            Parameters::new().with("minApr", -1).with("network", "ethereum"),
        )
        .unwrap();
        assert_eq!(call.query, vec![("network".to_string(), "ethereum".to_string())]);
    }

    #[test]
    fn history_always_sends_interval() {
        let call = build("dApis", "getDapiHistory", Parameters::new().with("dapiId", "d")).unwrap();
        assert_eq!(call.full_url().as_str(), "https://api3.org/api/v1/dapis/d/history?interval=1h");

        let params = Parameters::new()
            .with("dapiId", "d")
            .with("interval", "5m")
            .with("startTime", 100)
            .with("endTime", "200");
        let call = build("dApis", "getDapiHistory", params).unwrap();
        assert_eq!(
            call.full_url().query(),
            Some("interval=5m&startTime=100&endTime=200")
        );
    }

    #[test]
    fn json_parameters_accept_text_or_structured_values() {
        let params = Parameters::new()
            .with("dapiId", "ETH/USD")
            .with("network", "ethereum")
            .with("sponsorWallet", "0xabc")
            .with("updateParameters", r#"{"deviationThreshold":0.5}"#);
        let call = build("dApis", "createDapi", params).unwrap();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(
            call.body,
            Some(json!({
                "dapiId": "ETH/USD",
                "network": "ethereum",
                "sponsorWallet": "0xabc",
                "updateParameters": { "deviationThreshold": 0.5 }
            }))
        );

        let params = Parameters::new()
            .with("airnodeId", "a1")
            .with("config", json!({ "chains": [] }));
        let call = build("airnodes", "updateAirnode", params).unwrap();
        assert_eq!(call.body, Some(json!({ "config": { "chains": [] } })));
    }

    #[test]
    fn empty_json_parameters_fall_back_to_an_empty_object() {
        let params = Parameters::new().with("dapiId", "d").with("updateParameters", "");
        let call = build("dApis", "updateDapi", params).unwrap();
        assert_eq!(call.body, Some(json!({ "updateParameters": {} })));
    }

    #[test]
    fn invalid_json_names_the_parameter() {
        let params = Parameters::new()
            .with("dapiId", "d")
            .with("updateParameters", "{not json");
        let err = build("dApis", "updateDapi", params).unwrap_err();
        assert!(matches!(&err, EngineError::InvalidJson { parameter, .. } if parameter == "updateParameters"));

        let params = Parameters::new()
            .with("config", "{}")
            .with("secrets", "[1,")
            .with("networkDeploy", "ethereum");
        let err = build("airnodes", "deployAirnode", params).unwrap_err();
        assert_eq!(err.parameter(), Some("secrets"));

        let params = Parameters::new()
            .with("title", "t")
            .with("description", "d")
            .with("actions", "nope")
            .with("signature", "0xsig");
        let err = build("daoGovernance", "createProposal", params).unwrap_err();
        assert_eq!(err.parameter(), Some("actions"));
    }

    #[test]
    fn missing_required_parameters_are_rejected() {
        let err = build("dApis", "getDapi", Parameters::new()).unwrap_err();
        assert_eq!(err, EngineError::MissingParameter { parameter: "dapiId".into() });

        let err = build("oevAuctions", "getOevRewards", Parameters::new().with("address", "")).unwrap_err();
        assert_eq!(err.parameter(), Some("address"));
    }

    #[test]
    fn optional_body_fields_are_omitted_when_empty() {
        let call = build("oevAuctions", "updateAuction", Parameters::new().with("auctionId", "a1")).unwrap();
        assert_eq!(call.method, HttpMethod::Put);
        assert_eq!(call.body, Some(json!({})));

        let params = Parameters::new()
            .with("auctionId", "a1")
            .with("newReservePrice", "2.5")
            .with("newDuration", 7200);
        let call = build("oevAuctions", "updateAuction", params).unwrap();
        assert_eq!(call.body, Some(json!({ "reservePrice": "2.5", "duration": 7200 })));

        let params = Parameters::new()
            .with("proposalId", "p1")
            .with("signature", "0xsig")
            .with("votingPower", "");
        let call = build("daoGovernance", "castVote", params).unwrap();
        assert_eq!(call.body, Some(json!({ "support": "for", "signature": "0xsig" })));
    }

    #[test]
    fn fallbacks_fill_required_fields() {
        let params = Parameters::new()
            .with("dapiId", "d")
            .with("network", "ethereum")
            .with("reservePrice", "1");
        let call = build("oevAuctions", "createAuction", params.clone()).unwrap();
        assert_eq!(call.body.as_ref().unwrap()["duration"], json!(3600));

        let call = build("oevAuctions", "createAuction", params.clone().with("duration", Value::Null)).unwrap();
        assert_eq!(call.body.as_ref().unwrap()["duration"], json!(3600));

        let params = Parameters::new()
            .with("positionId", "pos-1")
            .with("amount", "10")
            .with("signature", "0xsig");
        let call = build("staking", "updatePosition", params).unwrap();
        assert_eq!(call.body.as_ref().unwrap()["action"], json!("increase"));
        assert_eq!(call.full_url().path(), "/api/v1/staking/positions/pos-1");
    }

    #[test]
    fn explicit_required_numbers_are_sent_as_given() {
        let params = Parameters::new()
            .with("dapiId", "d")
            .with("network", "ethereum")
            .with("reservePrice", "1");

        let call = build("oevAuctions", "createAuction", params.clone().with("duration", 0)).unwrap();
        assert_eq!(call.body.as_ref().unwrap()["duration"], json!(0));

        let call = build("oevAuctions", "createAuction", params.with("duration", "0")).unwrap();
        assert_eq!(call.body.as_ref().unwrap()["duration"], json!(0));

        // Optional numbers keep treating zero as unset.
        let params = Parameters::new().with("auctionId", "a1").with("newDuration", 0);
        let call = build("oevAuctions", "updateAuction", params).unwrap();
        assert_eq!(call.body, Some(json!({})));
    }

    #[test]
    fn large_integer_amounts_keep_every_digit() {
        let amount: Value = serde_json::from_str("1000000000000000000000").unwrap();
        let params = Parameters::new()
            .with("poolId", "pool-1")
            .with("amount", amount)
            .with("signature", "0xsig");
        let call = build("staking", "stakeTokens", params).unwrap();
        assert_eq!(call.body.unwrap()["amount"], json!("1000000000000000000000"));
    }

    /// A value that satisfies `param` without relying on its fallback.
    fn sample(param: &ParamSpec) -> Value {
        match param.kind {
            ValueKind::Text => json!("v"),
            ValueKind::Number => json!(7),
            ValueKind::Json => json!("{}"),
        }
    }

    fn required_only(spec: &OperationSpec) -> Parameters {
        spec.params
            .iter()
            .filter(|p| p.required)
            .fold(Parameters::new(), |acc, p| acc.with(p.name, sample(p)))
    }

    fn sent(call: &CallDescriptor, wire: &str) -> bool {
        call.query_value(wire).is_some()
            || call.body.as_ref().is_some_and(|body| body.get(wire).is_some())
    }

    #[test]
    fn every_optional_field_is_omitted_when_empty() {
        let mut checked = 0;
        for op in crate::operations::all() {
            for param in op.params.iter().filter(|p| !p.required && p.fallback.is_none()) {
                for empty in [json!(""), Value::Null] {
                    let params = required_only(op).with(param.name, empty.clone());
                    let call = build_call(op, &params, &creds()).unwrap();
                    assert!(
                        !sent(&call, param.wire),
                        "{}/{}: {} = {empty} was sent",
                        op.resource,
                        op.name,
                        param.name
                    );
                }

                let params = required_only(op).with(param.name, sample(param));
                let call = build_call(op, &params, &creds()).unwrap();
                assert!(sent(&call, param.wire), "{}/{}: {} was dropped", op.resource, op.name, param.name);
                checked += 1;
            }
        }
        assert!(checked >= 30, "only {checked} optional fields found");
    }

    #[test]
    fn body_only_identifiers_stay_out_of_the_path() {
        let params = Parameters::new().with("poolId", "pool-7").with("signature", "0xsig");
        let call = build("staking", "claimRewards", params).unwrap();
        assert_eq!(call.full_url().path(), "/api/v1/staking/rewards/claim");
        assert_eq!(call.body, Some(json!({ "poolId": "pool-7", "signature": "0xsig" })));
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let call = build("dApis", "getDapi", Parameters::new().with("dapiId", "ETH/USD")).unwrap();
        assert_eq!(call.full_url().as_str(), "https://api3.org/api/v1/dapis/ETH%2FUSD");
    }

    #[test]
    fn base_url_trailing_slash_is_tolerated() {
        let creds = Credentials::new("k", "https://api3.org/api/v1/");
        let call = build_call(
            spec("daoGovernance", "getTreasury").unwrap(),
            &Parameters::new(),
            &creds,
        )
        .unwrap();
        assert_eq!(call.full_url().as_str(), "https://api3.org/api/v1/dao/treasury");
    }

    #[test]
    fn wrong_shapes_are_invalid_parameters() {
        let err = build("dApis", "getDapiData", Parameters::new().with("dapiId", "d").with("timestamp", "soon"))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { ref parameter, .. } if parameter == "timestamp"));

        let err = build("dApis", "getDapi", Parameters::new().with("dapiId", json!({ "id": 1 }))).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn renamed_parameters_use_their_wire_name() {
        let params = Parameters::new().with("networkDeploy", "polygon");
        let call = build("airnodes", "deployAirnode", params).unwrap();
        assert_eq!(
            call.body,
            Some(json!({ "config": {}, "secrets": {}, "network": "polygon" }))
        );
    }
}
