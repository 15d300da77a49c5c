use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::City;
use crate::domain::product::Product;
use crate::domain::reception::Reception;

/// A pickup point
///
/// Immutable once registered; the store assigns `registration_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pvz {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city: City,
}

/// Reception together with the products registered against it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedReception {
    pub reception: Reception,
    pub products: Vec<Product>,
}

/// Read-only listing view: a PVZ with its receptions and their products
///
/// Rebuilt on every listing call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedPvz {
    pub pvz: Pvz,
    pub receptions: Vec<ExtendedReception>,
}

impl ExtendedPvz {
    /// A PVZ with no receptions yet
    pub fn empty(pvz: Pvz) -> Self {
        Self {
            pvz,
            receptions: Vec::new(),
        }
    }
}
