use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// City a pickup point may be registered in
///
/// Only a fixed set of cities is served; anything else is rejected before it
/// reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pvz_city")]
pub enum City {
    #[serde(rename = "Москва")]
    #[sqlx(rename = "Москва")]
    Moscow,
    #[serde(rename = "Санкт-Петербург")]
    #[sqlx(rename = "Санкт-Петербург")]
    SaintPetersburg,
    #[serde(rename = "Казань")]
    #[sqlx(rename = "Казань")]
    Kazan,
}

impl City {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::SaintPetersburg => "Санкт-Петербург",
            City::Kazan => "Казань",
        }
    }
}

impl FromStr for City {
    type Err = DomainError;

    /// # Example
    /// ```
    /// use pvz_api::domain::pvz::City;
    ///
    /// assert_eq!("Казань".parse::<City>().unwrap(), City::Kazan);
    /// assert!("Новосибирск".parse::<City>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Москва" => Ok(City::Moscow),
            "Санкт-Петербург" => Ok(City::SaintPetersburg),
            "Казань" => Ok(City::Kazan),
            _ => Err(DomainError::IncorrectCity),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_city() {
        for city in [City::Moscow, City::SaintPetersburg, City::Kazan] {
            assert_eq!(city.as_str().parse::<City>().unwrap(), city);
        }
    }

    #[test]
    fn rejects_unknown_city() {
        assert!(matches!(
            "Moscow".parse::<City>(),
            Err(DomainError::IncorrectCity)
        ));
        assert!(matches!("".parse::<City>(), Err(DomainError::IncorrectCity)));
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&City::SaintPetersburg).unwrap();
        assert_eq!(json, "\"Санкт-Петербург\"");
    }
}
