use crate::models::municipality::MunicipalityRecord;
use crate::search::normalize::normalize;

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Closest municipality name to a location that matched nothing, used only
/// for a "did you mean" hint.
pub fn suggest_municipality<'a>(
    location: &str,
    municipalities: &'a [MunicipalityRecord],
) -> Option<&'a MunicipalityRecord> {
    let location = normalize(location);
    if location.is_empty() {
        return None;
    }

    municipalities
        .iter()
        .map(|m| (m, strsim::jaro_winkler(&location, &normalize(&m.name))))
        .filter(|(_, similarity)| *similarity > SUGGESTION_THRESHOLD)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(m, _)| m)
}
