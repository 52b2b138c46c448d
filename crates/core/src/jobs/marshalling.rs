//! JSON marshaller and typed helpers over the [`Marshaller`] port.

use jobwire_domain::{JobWireError, MarshallingFormat, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ports::Marshaller;

/// Marshaller for the JSON wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn format(&self) -> MarshallingFormat {
        MarshallingFormat::Json
    }

    fn marshall(&self, value: &Value) -> Result<String> {
        serde_json::to_string(value)
            .map_err(|e| JobWireError::Serialization(format!("Failed to marshal payload: {e}")))
    }

    fn unmarshall(&self, raw: &str) -> Result<Value> {
        serde_json::from_str(raw)
            .map_err(|e| JobWireError::Serialization(format!("Failed to unmarshal result: {e}")))
    }
}

/// Serialize `value` into the marshaller's wire format.
pub fn serialize_with<T>(marshaller: &dyn Marshaller, value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value)?;
    marshaller.marshall(&value)
}

/// Parse a wire string and deserialize it into `T`.
pub fn deserialize_with<T>(marshaller: &dyn Marshaller, raw: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = marshaller.unmarshall(raw)?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use jobwire_domain::JobRequestInstance;
    use serde_json::json;

    use super::*;

    #[test]
    fn round_trips_job_request() {
        let marshaller = JsonMarshaller;
        let job = JobRequestInstance::new("org.example.Cmd").with_data("retries", 3);

        let raw = serialize_with(&marshaller, &job).unwrap();
        let back: JobRequestInstance = deserialize_with(&marshaller, &raw).unwrap();

        assert_eq!(back, job);
        assert_eq!(marshaller.format(), MarshallingFormat::Json);
    }

    #[test]
    fn unmarshall_reports_serialization_error() {
        let err = JsonMarshaller.unmarshall("{not json").unwrap_err();
        assert!(matches!(err, JobWireError::Serialization(_)));
    }

    #[test]
    fn scalars_marshal_bare() {
        assert_eq!(JsonMarshaller.marshall(&json!(42)).unwrap(), "42");
        assert_eq!(JsonMarshaller.unmarshall("42").unwrap(), json!(42));
    }
}
