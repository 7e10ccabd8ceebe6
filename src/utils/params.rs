use crate::error::AppError;
use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::Error};

/// Accepts `2`, `"2"`, `""` or `null`.
///
/// Form selects post ids as strings, and an empty selection means "no team".
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(id)) => Ok(Some(id)),
        Some(Raw::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid id: {s:?}"))),
    }
}

/// Query-string flag: `true`/`1` or `false`/`0`; empty means "not set".
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(flag)) => Ok(Some(flag)),
        Some(Raw::Str(s)) => match s.trim() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid flag: {other:?}"))),
        },
    }
}

/// JSON body that may be left out entirely.
///
/// Toggle endpoints are often hit with a bare `POST`; an empty body reads as
/// `T::default()`, anything else must be valid JSON.
pub fn json_or_default<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| AppError::Validation(format!("Json deserialize error: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "optional_id")]
        team_id: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "optional_id")]
        team_id: Option<i64>,
        #[serde(default, deserialize_with = "optional_flag")]
        active: Option<bool>,
    }

    fn team_id(value: serde_json::Value) -> Option<i64> {
        serde_json::from_value::<Body>(value).unwrap().team_id
    }

    #[test]
    fn ids_from_json() {
        assert_eq!(team_id(json!({ "team_id": 3 })), Some(3));
        assert_eq!(team_id(json!({ "team_id": "3" })), Some(3));
        assert_eq!(team_id(json!({ "team_id": "" })), None);
        assert_eq!(team_id(json!({ "team_id": null })), None);
        assert_eq!(team_id(json!({})), None);
        assert!(serde_json::from_value::<Body>(json!({ "team_id": "sales" })).is_err());
    }

    #[test]
    fn query_strings() {
        let q: Query = web::Query::<Query>::from_query("team_id=2&active=true").unwrap().into_inner();
        assert_eq!(q.team_id, Some(2));
        assert_eq!(q.active, Some(true));

        let q: Query = web::Query::<Query>::from_query("team_id=&active=0").unwrap().into_inner();
        assert_eq!(q.team_id, None);
        assert_eq!(q.active, Some(false));

        let q: Query = web::Query::<Query>::from_query("").unwrap().into_inner();
        assert_eq!(q.team_id, None);
        assert_eq!(q.active, None);

        assert!(web::Query::<Query>::from_query("active=maybe").is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Toggle {
        #[serde(default = "yes")]
        on: bool,
    }

    impl Default for Toggle {
        fn default() -> Self {
            Self { on: yes() }
        }
    }

    fn yes() -> bool {
        true
    }

    #[test]
    fn missing_body_takes_default() {
        assert!(json_or_default::<Toggle>(b"").unwrap().on);
        assert!(json_or_default::<Toggle>(b"  \n").unwrap().on);
        assert!(json_or_default::<Toggle>(b"{}").unwrap().on);
        assert!(!json_or_default::<Toggle>(br#"{"on":false}"#).unwrap().on);

        let err = json_or_default::<Toggle>(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
