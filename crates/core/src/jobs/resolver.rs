//! Turns a [`RawResult`] into a typed value.
//!
//! Three outcomes stay distinct: a FAILURE response is an error, an empty
//! response is `None`, anything else is deserialized. The FAILURE check
//! always runs before any decoding is attempted.

use jobwire_domain::{JobWireError, Result, ServiceResponse, Wrapped};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::ports::{Marshaller, RawResult};

/// Resolve into `T`, unwrapping an indirection wrapper when present.
///
/// # Errors
/// - `RemoteOperation` for a FAILURE outcome
/// - `Serialization` when the payload cannot be decoded into `T`
pub fn resolve<T>(raw: RawResult, marshaller: &dyn Marshaller) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(value) = resolve_value(raw, marshaller)? else {
        return Ok(None);
    };

    let wrapped: Wrapped<T> = serde_json::from_value(value).map_err(|e| {
        JobWireError::Serialization(format!("Failed to decode result: {e}"))
    })?;
    Ok(Some(wrapped.into_inner()))
}

/// Resolve a numeric identifier.
///
/// # Errors
/// As [`resolve`], plus `Coercion` when the unwrapped value is not a number.
/// A wrapper holding null is absent, like an empty response.
pub fn resolve_id(raw: RawResult, marshaller: &dyn Marshaller) -> Result<Option<i64>> {
    resolve::<Value>(raw, marshaller)?.filter(|v| !v.is_null()).map(coerce_i64).transpose()
}

/// Check the outcome and discard any payload.
///
/// # Errors
/// Returns `RemoteOperation` for a FAILURE outcome.
pub fn resolve_unit(raw: RawResult) -> Result<()> {
    if let RawResult::Service(response) = &raw {
        fail_on_failure(response)?;
    }
    Ok(())
}

/// Failure check, empty-result detection and string unmarshalling.
fn resolve_value(raw: RawResult, marshaller: &dyn Marshaller) -> Result<Option<Value>> {
    match raw {
        RawResult::Body(body) => Ok(body.filter(|v| !v.is_null())),
        RawResult::Service(response) => {
            fail_on_failure(&response)?;
            if response.is_empty() {
                return Ok(None);
            }
            match response.result {
                Some(Value::String(raw)) if raw.is_empty() => Ok(None),
                Some(Value::String(raw)) => {
                    let value = marshaller.unmarshall(&raw)?;
                    Ok(Some(value).filter(|v| !v.is_null()))
                }
                other => Ok(other),
            }
        }
    }
}

fn fail_on_failure(response: &ServiceResponse) -> Result<()> {
    if response.is_failure() {
        warn!(message = %response.msg, "remote job service reported failure");
        return Err(JobWireError::RemoteOperation(response.msg.clone()));
    }
    Ok(())
}

/// Interpret a bare value as an `i64`, truncating fractional numbers.
///
/// # Errors
/// Returns `Coercion` for anything that is not a JSON number, and for
/// integers or floats outside the `i64` range.
pub fn coerce_i64(value: Value) -> Result<i64> {
    const RANGE: std::ops::Range<f64> = (i64::MIN as f64)..(i64::MAX as f64);

    match &value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                let float = number.as_f64().filter(|_| number.is_f64())?;
                RANGE.contains(&float.trunc()).then(|| float as i64)
            })
            .ok_or_else(|| JobWireError::Coercion(format!("number {number} does not fit in i64"))),
        other => Err(JobWireError::Coercion(format!("expected a numeric result, got {other}"))),
    }
}
