//! Soldier domain model

use serde::{Deserialize, Serialize};

use crate::dto::soldier::CreateSoldier;

/// A soldier record as stored and as returned by the API
///
/// `store_id` is the identifier the document store generated. It is exposed
/// as `id` and also read from `_id`, so a raw store document (with its id
/// already rendered as a string) deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Soldier {
    #[serde(rename = "id", alias = "_id")]
    pub store_id: String,

    /// Application-assigned business key
    #[serde(rename = "ID")]
    pub soldier_id: i64,

    pub first_name: String,
    pub last_name: String,
    pub phone_number: i64,
    pub rank: String,
}

impl Soldier {
    /// Builds the record a create request produces once the store assigned an id
    pub fn from_create(store_id: impl Into<String>, req: &CreateSoldier) -> Self {
        Soldier {
            store_id: store_id.into(),
            soldier_id: req.soldier_id,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            phone_number: req.phone_number,
            rank: req.rank.clone(),
        }
    }
}
