//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a point-of-sale location.
///
/// `0` is reserved for the central warehouse; retail stores are numbered
/// `1..=5`. Any other value is rejected at construction, so a `StoreId` in
/// hand is always one of the known locations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StoreId(u8);

impl StoreId {
    /// The central warehouse (not a retail store).
    pub const CENTRAL_WAREHOUSE: StoreId = StoreId(0);

    /// Lowest retail store number.
    pub const FIRST_RETAIL: u8 = 1;

    /// Highest retail store number.
    pub const LAST_RETAIL: u8 = 5;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value <= Self::LAST_RETAIL {
            Ok(Self(value))
        } else {
            Err(DomainError::invalid_id(format!(
                "StoreId: {value} is not a known location (expected 0..={})",
                Self::LAST_RETAIL
            )))
        }
    }

    /// Build a retail store id, rejecting the central warehouse.
    pub fn retail(value: u8) -> Result<Self, DomainError> {
        if (Self::FIRST_RETAIL..=Self::LAST_RETAIL).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::invalid_id(format!(
                "StoreId: {value} is not a retail store (expected {}..={})",
                Self::FIRST_RETAIL,
                Self::LAST_RETAIL
            )))
        }
    }

    /// All retail store ids, in order.
    pub fn retail_stores() -> impl Iterator<Item = StoreId> {
        (Self::FIRST_RETAIL..=Self::LAST_RETAIL).map(StoreId)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_central_warehouse(&self) -> bool {
        self.0 == 0
    }

    pub fn is_retail(&self) -> bool {
        !self.is_central_warehouse()
    }
}

impl core::fmt::Display for StoreId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u8> for StoreId {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StoreId> for u8 {
    fn from(value: StoreId) -> Self {
        value.0
    }
}

impl FromStr for StoreId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|e| DomainError::invalid_id(format!("StoreId: {e}")))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_locations_are_accepted() {
        for value in 0..=5u8 {
            assert_eq!(StoreId::new(value).unwrap().value(), value);
        }
        assert!(StoreId::new(6).is_err());
    }

    #[test]
    fn retail_excludes_central_warehouse() {
        assert!(StoreId::retail(0).is_err());
        assert!(StoreId::retail(6).is_err());
        assert!(StoreId::retail(3).unwrap().is_retail());
        assert_eq!(StoreId::retail_stores().count(), 5);
    }

    #[test]
    fn parses_from_stored_string() {
        assert_eq!("2".parse::<StoreId>().unwrap(), StoreId::retail(2).unwrap());
        assert_eq!("0".parse::<StoreId>().unwrap(), StoreId::CENTRAL_WAREHOUSE);

        let err = "abc".parse::<StoreId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!("42".parse::<StoreId>().is_err());
    }

    #[test]
    fn deserialization_validates_range() {
        let id: StoreId = serde_json::from_str("4").unwrap();
        assert_eq!(id.value(), 4);
        assert!(serde_json::from_str::<StoreId>("9").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "4");
    }
}
