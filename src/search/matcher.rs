use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::models::display_record::DisplayRecord;
use crate::models::hospital::HospitalRecord;
use crate::models::municipality::MunicipalityRecord;
use crate::opt::*;
use crate::search::normalize::normalize;
use crate::search::occupancy::OccupancySource;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Search);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
pub enum SearchOutcome {
    #[strum(serialize = "OK")]
    #[serde(rename = "OK")]
    Ok,
    #[strum(serialize = "MUNICIPALITY_NOT_FOUND")]
    #[serde(rename = "MUNICIPALITY_NOT_FOUND")]
    MunicipalityNotFound,
    #[strum(serialize = "NO_MATCHES")]
    #[serde(rename = "NO_MATCHES")]
    NoMatches,
}

impl SearchOutcome {
    /// User-facing message shown under the search form. Empty when results exist.
    pub fn message(&self) -> &'static str {
        match self {
            SearchOutcome::Ok => "",
            SearchOutcome::MunicipalityNotFound => "Município não encontrado",
            SearchOutcome::NoMatches => "Nenhum hospital encontrado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub items: Vec<DisplayRecord>,
}

impl SearchResult {
    fn empty(outcome: SearchOutcome) -> Self {
        SearchResult {
            outcome,
            items: Vec::new(),
        }
    }
}

/// Returns the municipality whose normalized name equals the normalized
/// location text exactly.
pub fn find_municipality<'a>(
    location: &str,
    municipalities: &'a [MunicipalityRecord],
) -> Option<&'a MunicipalityRecord> {
    let location = normalize(location);
    municipalities.iter().find(|m| normalize(&m.name) == location)
}

fn filter_by_name<'a>(name: &str, hospitals: Vec<&'a HospitalRecord>) -> Vec<&'a HospitalRecord> {
    let name = normalize(name);
    hospitals
        .into_iter()
        .filter(|h| normalize(&h.display_name).contains(&name))
        .collect()
}

fn filter_by_region<'a>(
    region_code: &str,
    hospitals: Vec<&'a HospitalRecord>,
) -> Vec<&'a HospitalRecord> {
    hospitals
        .into_iter()
        .filter(|h| h.region_code.as_str() == region_code)
        .collect()
}

/// Narrows `hospitals` by the optional name and location filters and projects
/// the survivors, in input order, into carousel records.
pub fn search(
    name_filter: &str,
    location_filter: &str,
    hospitals: &[HospitalRecord],
    municipalities: &[MunicipalityRecord],
    occupancy: &mut dyn OccupancySource,
) -> SearchResult {
    let name_filter = name_filter.trim();
    let location_filter = location_filter.trim();

    let mut candidates = hospitals.iter().collect::<Vec<&HospitalRecord>>();

    if !name_filter.is_empty() {
        candidates = filter_by_name(name_filter, candidates);
        log(format!(
            "{} hospital(s) left after name filter [{}]",
            candidates.len(),
            name_filter
        ));
    }

    if !location_filter.is_empty() {
        let municipality = match find_municipality(location_filter, municipalities) {
            Some(municipality) => municipality,
            None => {
                log(format!("No municipality named [{}]", location_filter));
                return SearchResult::empty(SearchOutcome::MunicipalityNotFound);
            }
        };

        let region_code = municipality.facility_region_code();
        candidates = filter_by_region(&region_code, candidates);
        log(format!(
            "{} hospital(s) left in {} ({})",
            candidates.len(),
            municipality.name,
            region_code
        ));
    }

    if candidates.is_empty() {
        return SearchResult::empty(SearchOutcome::NoMatches);
    }

    let items = candidates
        .into_iter()
        .map(|h| DisplayRecord::from_hospital(h, occupancy.next_occupancy()))
        .collect::<Vec<DisplayRecord>>();

    SearchResult {
        outcome: SearchOutcome::Ok,
        items,
    }
}
