use crate::domain::device::Device;
use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer};

// Entries of `GET /devices`. Only the fields the snapshot run uses are read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGet {
    #[serde(deserialize_with = "scalar_id")]
    pub id: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
}

/// Ids are opaque; the API sends them as strings, but numeric ids are accepted as well.
fn scalar_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        serde_json::Value::String(_) => Err(Error::invalid_value(Unexpected::Str(""), &"a non-empty device id")),
        other => Err(Error::invalid_type(unexpected(&other), &"a string or numeric device id")),
    }
}

fn unexpected(value: &serde_json::Value) -> Unexpected<'_> {
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
        serde_json::Value::Number(_) | serde_json::Value::String(_) => Unexpected::Other("scalar"),
    }
}

impl From<DeviceGet> for Device {
    fn from(device_get: DeviceGet) -> Self {
        let name = match device_get.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("Device {}", device_get.id),
        };

        Device {
            id: device_get.id,
            name,
            model: device_get.model,
            firmware_version: device_get.firmware_version,
        }
    }
}
