use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::ProductType;

/// A single item registered against an open reception
///
/// `date_time` is assigned by the store and totally orders the products of
/// one reception; the greatest one is the only deletable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub reception_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_is_named_type() {
        let product = Product {
            id: Uuid::new_v4(),
            date_time: Utc::now(),
            product_type: ProductType::Shoes,
            reception_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["type"], "обувь");
        assert_eq!(json["receptionId"], product.reception_id.to_string());
        assert!(json.get("productType").is_none());
    }
}
