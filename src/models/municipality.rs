use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MunicipalityRecord {
    #[serde(rename = "id")]
    pub registry_id: u32,
    #[serde(rename = "nome")]
    pub name: String,
}

impl MunicipalityRecord {
    pub fn new(registry_id: u32, name: &str) -> Self {
        MunicipalityRecord {
            registry_id,
            name: name.to_string(),
        }
    }

    /// Health-facility region code derived by dropping the last digit of the
    /// registry id. This is a placeholder approximation of the real
    /// civic-to-health registry mapping, not a check digit removal.
    pub fn facility_region_code(&self) -> String {
        (self.registry_id / 10).to_string()
    }
}
