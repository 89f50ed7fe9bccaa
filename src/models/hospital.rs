use std::fmt::{self, Display, Formatter};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};

lazy_static! {
    static ref REGION_CODE_PATTERN: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

/// Registry columns sometimes arrive as JSON numbers, sometimes as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(u64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(raw
        .map(TextOrNumber::into_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Six digit municipality code of a health facility. Kept as text so that
/// leading zeros are never lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn parse(code: &str) -> Result<Self, String> {
        let code = code.trim();
        if REGION_CODE_PATTERN.is_match(code) {
            Ok(RegionCode(code.to_string()))
        } else {
            Err(format!("invalid region code: {:?}", code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RegionCode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = TextOrNumber::deserialize(deserializer)?.into_text();
        RegionCode::parse(&s).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HospitalRecord {
    #[serde(rename = "NO_FANTASIA")]
    pub display_name: String,
    #[serde(rename = "NO_LOGRADOURO", default, deserialize_with = "optional_text")]
    pub street: Option<String>,
    #[serde(rename = "NU_ENDERECO", default, deserialize_with = "optional_text")]
    pub street_number: Option<String>,
    #[serde(rename = "NO_BAIRRO", default, deserialize_with = "optional_text")]
    pub neighborhood: Option<String>,
    #[serde(rename = "CO_IBGE")]
    pub region_code: RegionCode,
}

impl HospitalRecord {
    pub fn new(display_name: &str, region_code: RegionCode) -> Self {
        HospitalRecord {
            display_name: display_name.to_string(),
            street: None,
            street_number: None,
            neighborhood: None,
            region_code,
        }
    }

    pub fn with_address(mut self, street: &str, street_number: &str, neighborhood: &str) -> Self {
        self.street = Some(street.to_string());
        self.street_number = Some(street_number.to_string());
        self.neighborhood = Some(neighborhood.to_string());
        self
    }

    /// `"{street}, {street_number} - {neighborhood}"`, missing parts left blank.
    pub fn formatted_address(&self) -> String {
        format!(
            "{}, {} - {}",
            self.street.as_deref().unwrap_or_default(),
            self.street_number.as_deref().unwrap_or_default(),
            self.neighborhood.as_deref().unwrap_or_default(),
        )
    }
}
