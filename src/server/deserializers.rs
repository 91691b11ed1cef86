use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Quiz clients send the category id either as a number or as a numeric
// string ("3"). Anything else becomes None so the route can answer 404
// instead of failing the whole body.
pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// `null` reads as the type's default.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_lenient_id")]
        id: Option<i64>,
    }

    fn parse(json: &str) -> Option<i64> {
        serde_json::from_str::<Holder>(json).unwrap().id
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"id": 3}"#), Some(3));
        assert_eq!(parse(r#"{"id": "3"}"#), Some(3));
        assert_eq!(parse(r#"{"id": 0}"#), Some(0));
    }

    #[test]
    fn null_list_reads_as_empty() {
        #[derive(Deserialize)]
        struct Ids {
            #[serde(default, deserialize_with = "deserialize_nullable")]
            ids: Vec<i64>,
        }
        assert!(serde_json::from_str::<Ids>(r#"{"ids": null}"#).unwrap().ids.is_empty());
        assert!(serde_json::from_str::<Ids>("{}").unwrap().ids.is_empty());
        assert_eq!(serde_json::from_str::<Ids>(r#"{"ids": [4]}"#).unwrap().ids, vec![4]);
    }

    #[test]
    fn anything_else_is_none() {
        assert_eq!(parse(r#"{"id": "x"}"#), None);
        assert_eq!(parse(r#"{"id": 1.5}"#), None);
        assert_eq!(parse(r#"{"id": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }
}
