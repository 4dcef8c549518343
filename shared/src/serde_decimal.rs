//! Decimal wire-format helpers
//!
//! Prices and ratings cross the API as plain JSON numbers: a whole
//! decimal serializes as an integer (`250`), anything else as a float
//! (`250.5`). Deserialization accepts any JSON number.
//!
//! Use with `#[serde(with = "...")]`:
//!
//! ```ignore
//! #[serde(with = "shared::serde_decimal::decimal")]
//! pub price_per_night: Decimal,
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserializer, Serializer, ser::Error as _};

fn serialize_number<S>(value: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract().is_zero()
        && let Some(whole) = value.to_i64()
    {
        return s.serialize_i64(whole);
    }
    let float = value
        .to_f64()
        .ok_or_else(|| S::Error::custom("decimal out of f64 range"))?;
    s.serialize_f64(float)
}

/// `Decimal` as a JSON number (integer when whole)
pub mod decimal {
    use super::*;

    pub fn serialize<S>(value: &Decimal, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_number(value, s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float::deserialize(d)
    }
}

/// `Option<Decimal>` as a JSON number or null
pub mod decimal_option {
    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serialize_number(v, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float_option::deserialize(d)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Price {
        #[serde(with = "super::decimal")]
        amount: Decimal,
        #[serde(default, with = "super::decimal_option")]
        rating: Option<Decimal>,
    }

    #[test]
    fn whole_decimal_serializes_as_integer() {
        let p = Price {
            amount: Decimal::new(25000, 2), // 250.00
            rating: None,
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"amount\":250,"), "got {json}");
    }

    #[test]
    fn fractional_decimal_serializes_as_float() {
        let p = Price {
            amount: Decimal::new(2505, 1), // 250.5
            rating: Some(Decimal::new(45, 1)), // 4.5
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"amount\":250.5"), "got {json}");
        assert!(json.contains("\"rating\":4.5"), "got {json}");
    }

    #[test]
    fn whole_option_serializes_as_integer() {
        let p = Price {
            amount: Decimal::new(1, 0),
            rating: Some(Decimal::new(5, 0)),
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"rating\":5}"), "got {json}");
    }

    #[test]
    fn deserializes_from_json_numbers() {
        let p: Price = serde_json::from_str(r#"{"amount": 99.5, "rating": 4}"#).unwrap();
        assert_eq!(p.amount, Decimal::new(995, 1));
        assert_eq!(p.rating, Some(Decimal::new(4, 0)));
    }
}
