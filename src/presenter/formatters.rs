use crate::domain::FieldValue;

pub const NOT_AVAILABLE: &str = "N/A";

pub type Formatter = fn(&FieldValue) -> String;

pub fn temperature(value: &FieldValue) -> String {
    format!("{}°C", value)
}

pub fn humidity(value: &FieldValue) -> String {
    format!("{}%", value)
}

/// Demand values are reported on a 0-200 scale.
pub fn demand_percent(value: &FieldValue) -> String {
    match value.as_f64() {
        Some(raw) => format!("{:.1}%", raw / 2.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn equipment_status(value: &FieldValue) -> String {
    let label = match value.as_code() {
        Some(1) => "Cool",
        Some(2) => "Dehumidify",
        Some(3) => "Heat",
        Some(4) => "Fan",
        Some(5) => "Idle",
        _ => return value.to_string(),
    };
    label.to_string()
}

pub fn fan_mode(value: &FieldValue) -> String {
    let label = match value.as_code() {
        Some(0) => "Off",
        Some(1) => "Always On",
        Some(2) => "Schedule",
        _ => return value.to_string(),
    };
    label.to_string()
}
