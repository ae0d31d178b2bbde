//! Presence-aware field values for partial updates

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a partial update.
///
/// JSON bodies have three states per key: the key is missing, the key is
/// `null`, or the key has a value. `Option<T>` collapses the first two, so a
/// missing key could not be told apart from an explicit null. Fields of this
/// type must be marked `#[serde(default)]` so a missing key becomes `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was not sent
    #[default]
    Absent,

    /// The key was sent as `null`
    Null,

    /// The key was sent with a value
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// Borrows the value if one was sent
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Set(value)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Set(value),
            None => Patch::Null,
        })
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Absent | Patch::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Probe {
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        rank: Patch<String>,
    }

    #[test]
    fn test_missing_key_is_absent() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.rank, Patch::Absent);
    }

    #[test]
    fn test_null_is_distinct_from_absent() {
        let probe: Probe = serde_json::from_value(json!({ "rank": null })).unwrap();
        assert_eq!(probe.rank, Patch::Null);
        assert!(!probe.rank.is_absent());
    }

    #[test]
    fn test_value_is_set() {
        let probe: Probe = serde_json::from_value(json!({ "rank": "Sgt" })).unwrap();
        assert_eq!(probe.rank.as_set().map(String::as_str), Some("Sgt"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_value::<Probe>(json!({ "rank": 12 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_is_skipped_when_serializing() {
        let probe = Probe {
            rank: Patch::Absent,
        };
        assert_eq!(serde_json::to_value(&probe).unwrap(), json!({}));

        let probe = Probe {
            rank: Patch::Null,
        };
        assert_eq!(serde_json::to_value(&probe).unwrap(), json!({ "rank": null }));
    }
}
