use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Category of a received item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_type")]
pub enum ProductType {
    #[serde(rename = "электроника")]
    #[sqlx(rename = "электроника")]
    Electronics,
    #[serde(rename = "одежда")]
    #[sqlx(rename = "одежда")]
    Clothes,
    #[serde(rename = "обувь")]
    #[sqlx(rename = "обувь")]
    Shoes,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Electronics => "электроника",
            ProductType::Clothes => "одежда",
            ProductType::Shoes => "обувь",
        }
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "электроника" => Ok(ProductType::Electronics),
            "одежда" => Ok(ProductType::Clothes),
            "обувь" => Ok(ProductType::Shoes),
            _ => Err(DomainError::IncorrectProductType),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
