/// A thermostat registered on the account, in the order the API listed it.
#[derive(Clone, PartialEq, Debug)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
}
