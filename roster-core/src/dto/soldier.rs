//! Soldier DTOs
//!
//! Request bodies for the soldier CRUD endpoints.

use serde::{Deserialize, Serialize};

use super::ValidationError;
use super::patch::Patch;

/// Request to create a new soldier
///
/// Every field is required. Missing or wrongly typed fields fail at
/// deserialization; `validate` covers the rules serde cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSoldier {
    /// Application-assigned business key, unique across all soldiers
    #[serde(rename = "ID")]
    pub soldier_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: i64,
    pub rank: String,
}

impl CreateSoldier {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        Ok(())
    }
}

/// Request to partially update a soldier
///
/// Only the fields present in the body are changed. `ID` is not part of this
/// shape, so the business key can never be rewritten by an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSoldier {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub first_name: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub last_name: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub phone_number: Patch<i64>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub rank: Patch<String>,
}

/// One field change carried by an `UpdateSoldier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoldierField {
    FirstName(String),
    LastName(String),
    PhoneNumber(i64),
    Rank(String),
}

impl SoldierField {
    /// Field name as stored and as exposed in JSON
    pub fn name(&self) -> &'static str {
        match self {
            SoldierField::FirstName(_) => "firstName",
            SoldierField::LastName(_) => "lastName",
            SoldierField::PhoneNumber(_) => "phoneNumber",
            SoldierField::Rank(_) => "rank",
        }
    }
}

impl UpdateSoldier {
    /// Rejects explicit nulls and blank names
    ///
    /// None of the soldier fields is nullable, so `null` is refused rather
    /// than written to the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.is_null() {
            return Err(ValidationError::Null("firstName"));
        }
        if self.last_name.is_null() {
            return Err(ValidationError::Null("lastName"));
        }
        if self.phone_number.is_null() {
            return Err(ValidationError::Null("phoneNumber"));
        }
        if self.rank.is_null() {
            return Err(ValidationError::Null("rank"));
        }

        if let Some(first_name) = self.first_name.as_set() {
            require_text("firstName", first_name)?;
        }
        if let Some(last_name) = self.last_name.as_set() {
            require_text("lastName", last_name)?;
        }

        Ok(())
    }

    /// The fields that were sent with a value, in declaration order
    pub fn changes(&self) -> Vec<SoldierField> {
        let mut changes = Vec::new();

        if let Some(first_name) = self.first_name.as_set() {
            changes.push(SoldierField::FirstName(first_name.clone()));
        }
        if let Some(last_name) = self.last_name.as_set() {
            changes.push(SoldierField::LastName(last_name.clone()));
        }
        if let Some(phone_number) = self.phone_number.as_set() {
            changes.push(SoldierField::PhoneNumber(*phone_number));
        }
        if let Some(rank) = self.rank.as_set() {
            changes.push(SoldierField::Rank(rank.clone()));
        }

        changes
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}
