//! Typed-or-raw response handling.
//!
//! [`map_response`] is the only place a decoded body turns into a record.
//! It never touches the network, so it can be exercised against fixtures.

use crate::config::OutputFormat;
use crate::{OpenDotaError, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// What an endpoint method hands back: a validated record in typed mode,
/// or the decoded body exactly as received in raw mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Payload<T> {
    pub fn is_typed(&self) -> bool {
        matches!(self, Payload::Typed(_))
    }

    pub fn typed(self) -> Option<T> {
        match self {
            Payload::Typed(t) => Some(t),
            Payload::Raw(_) => None,
        }
    }

    pub fn raw(self) -> Option<Value> {
        match self {
            Payload::Raw(v) => Some(v),
            Payload::Typed(_) => None,
        }
    }

    pub fn as_typed(&self) -> Option<&T> {
        match self {
            Payload::Typed(t) => Some(t),
            Payload::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Payload::Raw(v) => Some(v),
            Payload::Typed(_) => None,
        }
    }
}

impl<T: Serialize> Payload<T> {
    /// JSON view of either variant. Typed records serialize back with the
    /// API's field names; unknown upstream fields are gone at that point.
    pub fn into_value(self) -> Result<Value> {
        match self {
            Payload::Raw(v) => Ok(v),
            Payload::Typed(t) => serde_json::to_value(t).map_err(|source| OpenDotaError::Shape {
                record: short_type_name::<T>(),
                source,
            }),
        }
    }
}

impl<T: DeserializeOwned> Payload<T> {
    /// Validate a raw payload into a record. Typed payloads pass through.
    pub fn into_typed(self) -> Result<T> {
        match self {
            Payload::Typed(t) => Ok(t),
            Payload::Raw(v) => parse_record(v),
        }
    }
}

/// Turn a decoded body into the configured representation.
pub fn map_response<T: DeserializeOwned>(body: Value, format: OutputFormat) -> Result<Payload<T>> {
    match format {
        OutputFormat::Raw => Ok(Payload::Raw(body)),
        OutputFormat::Typed => parse_record(body).map(Payload::Typed),
    }
}

/// Schema check for one record type; failures are shape errors.
pub fn parse_record<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|source| OpenDotaError::Shape {
        record: short_type_name::<T>(),
        source,
    })
}

/// `alloc::vec::Vec<opendota::opendota::types::Hero>` -> `Hero`
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let inner = full
        .strip_prefix("alloc::vec::Vec<")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(full);
    inner.rsplit("::").next().unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendota::types::{Hero, Match};
    use serde_json::json;

    #[test]
    fn test_raw_mode_returns_body_unchanged() {
        let body = json!({
            "match_id": 8461956309u64,
            "duration": 1800,
            "radiant_win": true,
            "extra": [1, 2]
        });

        let payload: Payload<Match> = map_response(body.clone(), OutputFormat::Raw).unwrap();

        assert!(!payload.is_typed());
        assert_eq!(payload.as_raw(), Some(&body));
        assert_eq!(payload.raw(), Some(body));
    }

    #[test]
    fn test_raw_mode_skips_validation() {
        let body = json!({"nothing": "useful"});
        let payload: Payload<Match> = map_response(body.clone(), OutputFormat::Raw).unwrap();
        assert_eq!(payload.raw(), Some(body));
    }

    #[test]
    fn test_typed_mode_parses_record() {
        let body = json!({"match_id": 8461956309u64, "duration": 1800, "radiant_win": true});

        let payload: Payload<Match> = map_response(body, OutputFormat::Typed).unwrap();

        let m = payload.typed().unwrap();
        assert_eq!(m.duration, 1800);
        assert!(m.radiant_win);
    }

    #[test]
    fn test_typed_mode_shape_error() {
        let body = json!({"match_id": "not a number"});

        let err = map_response::<Match>(body, OutputFormat::Typed).unwrap_err();

        match err {
            OpenDotaError::Shape { record, .. } => assert_eq!(record, "Match"),
            other => panic!("Expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_list_shape_error_names_element_type() {
        let body = json!([{"id": 1}]);

        let err = map_response::<Vec<Hero>>(body, OutputFormat::Typed).unwrap_err();

        match err {
            OpenDotaError::Shape { record, .. } => assert_eq!(record, "Hero"),
            other => panic!("Expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_object_where_list_expected_is_shape_error() {
        let err =
            map_response::<Vec<Hero>>(json!({"error": "x"}), OutputFormat::Typed).unwrap_err();
        assert!(matches!(err, OpenDotaError::Shape { .. }));
    }

    #[test]
    fn test_into_typed_from_raw() {
        let payload: Payload<Match> =
            Payload::Raw(json!({"match_id": 1, "duration": 10, "radiant_win": false}));
        let m = payload.into_typed().unwrap();
        assert!(!m.radiant_win);
    }

    #[test]
    fn test_into_value_from_typed() {
        let body = json!({"match_id": 1, "duration": 10, "radiant_win": false});
        let payload: Payload<Match> = map_response(body, OutputFormat::Typed).unwrap();

        let value = payload.into_value().unwrap();
        assert_eq!(value["match_id"], 1);
        assert_eq!(value["duration"], 10);
        assert_eq!(value["players"], json!([]));
    }
}
