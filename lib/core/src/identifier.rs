//! Identifier coercion
//!
//! Converts a metadata id (usually a document `_id`) into the scalar type of
//! the target's identifier attribute.

use crate::error::{Error, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde_json::{Number, Value};
use std::str::FromStr;
use uuid::Uuid;

/// A scalar type that can receive a metadata id
pub trait MetadataId: Sized {
    /// Type name reported in [`Error::TypeMismatch`]
    const KIND: &'static str;

    /// Convert a non-null JSON value, `None` if it does not fit
    fn from_metadata(value: &Value) -> Option<Self>;
}

/// The single identifier-bearing attribute of a target type
pub trait IdSlot {
    fn is_unset(&self) -> bool;

    /// Fill the slot from a metadata id. JSON null leaves it untouched.
    fn assign(&mut self, id: &Value) -> Result<()>;

    fn kind(&self) -> &'static str;
}

impl<T: MetadataId> IdSlot for Option<T> {
    #[inline]
    fn is_unset(&self) -> bool {
        self.is_none()
    }

    fn assign(&mut self, id: &Value) -> Result<()> {
        if id.is_null() {
            return Ok(());
        }
        match T::from_metadata(id) {
            Some(value) => {
                *self = Some(value);
                Ok(())
            }
            None => Err(Error::TypeMismatch {
                value: id.to_string(),
                kind: T::KIND,
            }),
        }
    }

    #[inline]
    fn kind(&self) -> &'static str {
        T::KIND
    }
}

/// Textual form of a scalar id; objects and arrays have none
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i as i128)
            } else if let Some(u) = n.as_u64() {
                Some(u as i128)
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i128::MAX as f64)
                    .map(|f| f as i128)
            }
        }
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

impl MetadataId for String {
    const KIND: &'static str = "string";

    fn from_metadata(value: &Value) -> Option<Self> {
        scalar_text(value)
    }
}

impl MetadataId for Number {
    const KIND: &'static str = "number";

    fn from_metadata(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(n.clone()),
            Value::String(s) => serde_json::from_str::<Number>(s.trim()).ok(),
            _ => None,
        }
    }
}

impl MetadataId for BigDecimal {
    const KIND: &'static str = "decimal";

    fn from_metadata(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
            Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }
}

impl MetadataId for BigInt {
    const KIND: &'static str = "big integer";

    fn from_metadata(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Some(BigInt::from(i)),
                (None, Some(u)) => Some(BigInt::from(u)),
                _ => BigInt::from_str(&n.to_string()).ok(),
            },
            Value::String(s) => BigInt::from_str(s.trim()).ok(),
            _ => None,
        }
    }
}

impl MetadataId for f64 {
    const KIND: &'static str = "double";

    fn from_metadata(value: &Value) -> Option<Self> {
        as_float(value)
    }
}

impl MetadataId for f32 {
    const KIND: &'static str = "float";

    fn from_metadata(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.trim().parse::<f32>().ok(),
            other => as_float(other).map(|f| f as f32),
        }
    }
}

macro_rules! integer_metadata_id {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl MetadataId for $ty {
                const KIND: &'static str = $kind;

                fn from_metadata(value: &Value) -> Option<Self> {
                    as_integer(value).and_then(|i| <$ty>::try_from(i).ok())
                }
            }
        )*
    };
}

integer_metadata_id! {
    i64 => "long",
    i32 => "integer",
    i16 => "short",
    i8 => "byte",
    u64 => "unsigned long",
    u32 => "unsigned integer",
    u16 => "unsigned short",
    u8 => "unsigned byte",
}

impl MetadataId for char {
    const KIND: &'static str = "character";

    fn from_metadata(value: &Value) -> Option<Self> {
        let s = value.as_str()?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl MetadataId for bool {
    const KIND: &'static str = "boolean";

    fn from_metadata(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl MetadataId for Uuid {
    const KIND: &'static str = "uuid";

    fn from_metadata(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce<T: MetadataId>(value: Value) -> Result<Option<T>> {
        let mut slot: Option<T> = None;
        slot.assign(&value)?;
        Ok(slot)
    }

    #[test]
    fn test_string_from_scalars() {
        assert_eq!(coerce::<String>(json!("abc")).unwrap(), Some("abc".to_string()));
        assert_eq!(coerce::<String>(json!(42)).unwrap(), Some("42".to_string()));
        assert_eq!(coerce::<String>(json!(true)).unwrap(), Some("true".to_string()));
        assert!(coerce::<String>(json!({"a": 1})).is_err());
    }

    #[test]
    fn test_integers_from_numeric_strings() {
        assert_eq!(coerce::<i64>(json!("42")).unwrap(), Some(42));
        assert_eq!(coerce::<i32>(json!(42)).unwrap(), Some(42));
        assert_eq!(coerce::<i16>(json!(" 7 ")).unwrap(), Some(7));
        assert_eq!(coerce::<u64>(json!(u64::MAX)).unwrap(), Some(u64::MAX));
        assert_eq!(coerce::<i64>(json!(3.0)).unwrap(), Some(3));
    }

    #[test]
    fn test_integer_rejections() {
        let err = coerce::<i32>(json!("abc")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref value, kind: "integer" } if value == "\"abc\""));
        assert!(coerce::<i8>(json!(300)).is_err());
        assert!(coerce::<u16>(json!(-1)).is_err());
        assert!(coerce::<i64>(json!(1.5)).is_err());
        assert!(coerce::<i64>(json!([1])).is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce::<f64>(json!("1.5")).unwrap(), Some(1.5));
        assert_eq!(coerce::<f64>(json!(2)).unwrap(), Some(2.0));
        assert_eq!(coerce::<f32>(json!(0.25)).unwrap(), Some(0.25));
        assert!(coerce::<f64>(json!(false)).is_err());
    }

    #[test]
    fn test_arbitrary_precision() {
        let big = coerce::<BigInt>(json!("123456789012345678901234567890")).unwrap().unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");

        let decimal = coerce::<BigDecimal>(json!("10.25")).unwrap().unwrap();
        assert_eq!(decimal, BigDecimal::from_str("10.25").unwrap());

        let number = coerce::<Number>(json!("12")).unwrap().unwrap();
        assert_eq!(number.as_i64(), Some(12));
    }

    #[test]
    fn test_char_bool_uuid() {
        assert_eq!(coerce::<char>(json!("x")).unwrap(), Some('x'));
        assert!(coerce::<char>(json!("xy")).is_err());
        assert!(coerce::<char>(json!("")).is_err());

        assert_eq!(coerce::<bool>(json!("TRUE")).unwrap(), Some(true));
        assert_eq!(coerce::<bool>(json!(false)).unwrap(), Some(false));
        assert!(coerce::<bool>(json!("yes")).is_err());

        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(coerce::<Uuid>(json!(id)).unwrap(), Some(Uuid::parse_str(id).unwrap()));
    }

    #[test]
    fn test_null_leaves_slot_unset() {
        assert_eq!(coerce::<i64>(Value::Null).unwrap(), None);
        assert_eq!(coerce::<String>(Value::Null).unwrap(), None);
    }
}
