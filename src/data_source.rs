use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::models::hospital::HospitalRecord;
use crate::models::municipality::MunicipalityRecord;
use crate::opt::*;

pub const HOSPITALS_FILE_NAME: &str = "hospitals.json";
pub const MUNICIPALITIES_FILE_NAME: &str = "municipalities.json";

const SAMPLE_HOSPITALS: &str = include_str!("../resource/hospitals.json");
const SAMPLE_MUNICIPALITIES: &str = include_str!("../resource/municipalities.json");

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Data);
}

/// Read-only snapshots of the reference data for one search.
pub trait HospitalDataSource {
    fn hospitals(&self) -> Res<Vec<HospitalRecord>>;
    fn municipalities(&self) -> Res<Vec<MunicipalityRecord>>;
}

/// The fixed sample bundled with the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleDataSource;

impl HospitalDataSource for SampleDataSource {
    fn hospitals(&self) -> Res<Vec<HospitalRecord>> {
        parse_hospitals(SAMPLE_HOSPITALS)
    }

    fn municipalities(&self) -> Res<Vec<MunicipalityRecord>> {
        parse_municipalities(SAMPLE_MUNICIPALITIES)
    }
}

/// Reads `hospitals.json` and `municipalities.json` from a directory on every
/// call, so an exported registry can be dropped in without a rebuild.
#[derive(Debug, Clone)]
pub struct JsonDataSource {
    data_dir: PathBuf,
}

impl JsonDataSource {
    pub fn new(data_dir: &Path) -> Self {
        JsonDataSource {
            data_dir: data_dir.to_path_buf(),
        }
    }

    fn read(&self, file_name: &str) -> Res<String> {
        let path = self.data_dir.join(file_name);
        std::fs::read_to_string(&path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err))
    }
}

impl HospitalDataSource for JsonDataSource {
    fn hospitals(&self) -> Res<Vec<HospitalRecord>> {
        parse_hospitals(&self.read(HOSPITALS_FILE_NAME)?)
    }

    fn municipalities(&self) -> Res<Vec<MunicipalityRecord>> {
        parse_municipalities(&self.read(MUNICIPALITIES_FILE_NAME)?)
    }
}

fn parse_json<T: DeserializeOwned>(content: &str, what: &str) -> Res<Vec<T>> {
    serde_json::from_str::<Vec<T>>(content).map_err(|err| format!("failed to parse {}: {}", what, err))
}

pub fn parse_hospitals(content: &str) -> Res<Vec<HospitalRecord>> {
    let mut hospitals = parse_json::<HospitalRecord>(content, "hospital data")?;

    let total = hospitals.len();
    hospitals.retain(|h| !h.display_name.trim().is_empty());
    if hospitals.len() < total {
        log(format!("Skipped {} hospital(s) without a name", total - hospitals.len()));
    }

    Ok(hospitals)
}

pub fn parse_municipalities(content: &str) -> Res<Vec<MunicipalityRecord>> {
    let mut municipalities = parse_json::<MunicipalityRecord>(content, "municipality data")?;

    let total = municipalities.len();
    municipalities.retain(|m| !m.name.trim().is_empty());
    if municipalities.len() < total {
        log(format!(
            "Skipped {} municipality(ies) without a name",
            total - municipalities.len()
        ));
    }

    Ok(municipalities)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sample_data() {
        let hospitals = SampleDataSource.hospitals().unwrap();
        assert_eq!(hospitals.len(), 3);
        assert_eq!(hospitals[2].display_name, "Hospital Esperança");
        assert_eq!(hospitals[1].region_code.as_str(), "330455");

        let municipalities = SampleDataSource.municipalities().unwrap();
        assert_eq!(
            municipalities,
            vec![
                MunicipalityRecord::new(3550308, "São Paulo"),
                MunicipalityRecord::new(3304557, "Rio de Janeiro"),
            ]
        );
    }

    #[test]
    fn test_json_data_source() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(HOSPITALS_FILE_NAME),
            r#"[
                { "NO_FANTASIA": "Hospital Municipal", "CO_IBGE": "410690" },
                { "NO_FANTASIA": "  ", "CO_IBGE": "410690" }
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(MUNICIPALITIES_FILE_NAME),
            r#"[{ "id": 4106902, "nome": "Curitiba" }]"#,
        )
        .unwrap();

        let source = JsonDataSource::new(dir.path());
        let hospitals = source.hospitals().unwrap();
        assert_eq!(hospitals.len(), 1);
        assert_eq!(hospitals[0].display_name, "Hospital Municipal");
        assert_eq!(
            source.municipalities().unwrap()[0].facility_region_code(),
            "410690"
        );
    }

    #[test]
    fn test_json_data_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = JsonDataSource::new(dir.path()).hospitals().unwrap_err();
        assert!(err.starts_with("failed to read"));
    }

    #[test]
    fn test_parse_invalid_region_code() {
        let err = parse_hospitals(r#"[{ "NO_FANTASIA": "H", "CO_IBGE": "3550308" }]"#).unwrap_err();
        assert!(err.contains("invalid region code"));
    }
}
