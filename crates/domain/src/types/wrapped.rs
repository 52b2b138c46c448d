//! Indirection wrappers for scalar results.
//!
//! Generic results (a generated request id, for instance) may cross the
//! wire either bare (`42`) or boxed (`{"value": 42}`). [`Wrapped`] models
//! both shapes; deserialization tries the boxed shape first.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wrapped<T> {
    Indirect { value: T },
    Direct(T),
}

impl<T> Wrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Indirect { value } | Self::Direct(value) => value,
        }
    }

    pub fn is_indirect(&self) -> bool {
        matches!(self, Self::Indirect { .. })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn boxed_value_is_indirect() {
        let wrapped: Wrapped<Value> = serde_json::from_value(json!({ "value": 42 })).unwrap();
        assert!(wrapped.is_indirect());
        assert_eq!(wrapped.into_inner(), json!(42));
    }

    #[test]
    fn bare_value_is_direct() {
        let wrapped: Wrapped<i64> = serde_json::from_str("42").unwrap();
        assert!(!wrapped.is_indirect());
        assert_eq!(wrapped.into_inner(), 42);
    }

    #[test]
    fn objects_without_value_key_stay_direct() {
        let wrapped: Wrapped<Value> = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(wrapped, Wrapped::Direct(json!({ "id": 1 })));
    }
}
