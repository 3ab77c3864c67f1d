pub mod credentials;
pub mod device;
mod field_value;
mod number;
mod snapshot;
pub mod thermostat_api;

pub use field_value::FieldValue;
pub use number::Number;
pub use snapshot::Snapshot;
