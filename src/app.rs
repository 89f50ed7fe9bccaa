use std::env;
use std::path::PathBuf;

use crate::carousel::Carousel;
use crate::context::Context;
use crate::data_source::{HospitalDataSource, JsonDataSource, SampleDataSource};
use crate::opt::*;
use crate::search::occupancy::{OccupancySource, RandomOccupancy};
use crate::search::suggest::suggest_municipality;
use crate::search::{search, SearchOutcome, SearchResult};

mod reply;
mod slide;

pub use reply::SearchReply;
pub use slide::render_slide;

pub const DATA_DIR_ENV: &str = "QHOSP_DATA_DIR";
pub const OCCUPANCY_SEED_ENV: &str = "QHOSP_OCCUPANCY_SEED";

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Search);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub occupancy_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Res<Self> {
        Self::from_values(
            env::var(DATA_DIR_ENV).ok().as_deref(),
            env::var(OCCUPANCY_SEED_ENV).ok().as_deref(),
        )
    }

    fn from_values(data_dir: Option<&str>, occupancy_seed: Option<&str>) -> Res<Self> {
        let data_dir = data_dir
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let occupancy_seed = match occupancy_seed.map(str::trim).filter(|s| !s.is_empty()) {
            Some(seed) => Some(
                seed.parse::<u64>()
                    .map_err(|_| format!("{} must be an unsigned integer, got {:?}", OCCUPANCY_SEED_ENV, seed))?,
            ),
            None => None,
        };

        Ok(AppConfig {
            data_dir,
            occupancy_seed,
        })
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, occupancy_seed: Option<u64>) -> Self {
        if data_dir.is_some() {
            self.data_dir = data_dir;
        }
        if occupancy_seed.is_some() {
            self.occupancy_seed = occupancy_seed;
        }
        self
    }

    pub fn data_source(&self) -> Box<dyn HospitalDataSource> {
        match &self.data_dir {
            Some(dir) => {
                log(format!("Using hospital data from {}", dir.display()));
                Box::new(JsonDataSource::new(dir))
            }
            None => Box::new(SampleDataSource),
        }
    }

    pub fn occupancy_source(&self) -> Box<dyn OccupancySource> {
        match self.occupancy_seed {
            Some(seed) => Box::new(RandomOccupancy::seeded(seed)),
            None => Box::new(RandomOccupancy::from_entropy()),
        }
    }
}

/// One user's search screen: the data it searches, the carousel it fills and
/// optionally the runtime context that remembers the last filters.
pub struct Session {
    data_source: Box<dyn HospitalDataSource>,
    occupancy: Box<dyn OccupancySource>,
    carousel: Carousel,
    context: Option<Context>,
}

impl Session {
    pub fn new(
        data_source: Box<dyn HospitalDataSource>,
        occupancy: Box<dyn OccupancySource>,
    ) -> Self {
        Session {
            data_source,
            occupancy,
            carousel: Carousel::default(),
            context: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Session::new(config.data_source(), config.occupancy_source())
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Runs one search and refills the carousel with its results.
    pub fn search(&mut self, name_filter: &str, location_filter: &str) -> Res<SearchResult> {
        let hospitals = self.data_source.hospitals()?;
        let municipalities = self.data_source.municipalities()?;

        let result = search(
            name_filter,
            location_filter,
            &hospitals,
            &municipalities,
            self.occupancy.as_mut(),
        );
        log(format!(
            "Search name=[{}] location=[{}] -> {} ({} item(s))",
            name_filter,
            location_filter,
            result.outcome,
            result.items.len()
        ));

        self.carousel.reinitialize(result.items.clone());

        if let Some(context) = &self.context {
            if let Err(err) = context.remember_filters(name_filter, location_filter) {
                log(format!("Unable to remember filters: {}", err));
            }
        }

        Ok(result)
    }

    /// Repeats the last remembered search, if any.
    pub fn search_again(&mut self) -> Res<SearchResult> {
        let (name_filter, location_filter) = self
            .context
            .as_ref()
            .and_then(|context| context.last_filters())
            .ok_or("No previous search to repeat")?;
        self.search(&name_filter, &location_filter)
    }

    /// Search plus the text shown to the user.
    pub fn search_reply(&mut self, name_filter: &str, location_filter: &str) -> Res<String> {
        let result = self.search(name_filter, location_filter)?;
        self.reply_for(&result, location_filter)
    }

    /// Search result as pretty JSON, for the one-shot `--json` output.
    pub fn search_json(&mut self, name_filter: &str, location_filter: &str) -> Res<String> {
        let result = self.search(name_filter, location_filter)?;
        serde_json::to_string_pretty(&result).err_to_str()
    }

    pub fn search_again_reply(&mut self) -> Res<String> {
        let result = self.search_again()?;
        let location_filter = self
            .context
            .as_ref()
            .and_then(|context| context.last_filters())
            .map(|(_, location)| location)
            .unwrap_or_default();
        self.reply_for(&result, &location_filter)
    }

    fn reply_for(&self, result: &SearchResult, location_filter: &str) -> Res<String> {
        let mut reply = SearchReply::new();

        match result.outcome {
            SearchOutcome::Ok => {
                reply.add(format!("{} hospital(s) found", result.items.len()));
                reply.add_boxed(self.current_slide());
            }
            SearchOutcome::MunicipalityNotFound => {
                reply.add(result.outcome.message().to_string());
                let municipalities = self.data_source.municipalities()?;
                if let Some(suggestion) = suggest_municipality(location_filter, &municipalities) {
                    reply.add(format!("Did you mean [{}]?", suggestion.name));
                }
            }
            SearchOutcome::NoMatches => {
                reply.add(result.outcome.message().to_string());
            }
        }

        Ok(reply.to_string())
    }

    pub fn current_slide(&self) -> String {
        match (self.carousel.current_index(), self.carousel.current_item()) {
            (Some(index), Some(item)) => render_slide(
                item,
                index,
                self.carousel.count(),
                self.carousel.navigation_enabled(),
            ),
            _ => "No results to show".to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::load_data_from_file;
    use crate::search::occupancy::FixedOccupancy;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session::new(
            Box::new(SampleDataSource),
            Box::new(FixedOccupancy::new(&[20, 55, 80])),
        )
    }

    #[test]
    fn test_config_from_values() {
        let config = AppConfig::from_values(Some("/tmp/data"), Some(" 42 ")).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(config.occupancy_seed, Some(42));

        assert_eq!(AppConfig::from_values(Some(""), None).unwrap(), AppConfig::default());
        assert!(AppConfig::from_values(None, Some("abc")).is_err());
    }

    #[test]
    fn test_config_overrides() {
        let config = AppConfig::from_values(Some("/env"), Some("1"))
            .unwrap()
            .with_overrides(Some(PathBuf::from("/cli")), None);
        assert_eq!(config.data_dir, Some(PathBuf::from("/cli")));
        assert_eq!(config.occupancy_seed, Some(1));
    }

    #[test]
    fn test_search_fills_carousel() {
        let mut session = sample_session();
        let result = session.search("", "São Paulo").unwrap();
        assert_eq!(result.outcome, SearchOutcome::Ok);
        assert_eq!(session.carousel().count(), 2);
        assert_eq!(session.carousel().current_index(), Some(0));

        session.carousel_mut().next();
        assert_eq!(
            session.carousel().current_item().map(|i| i.name.as_str()),
            Some("Hospital Esperança")
        );

        session.search("vida", "").unwrap();
        assert_eq!(session.carousel().count(), 1);
        assert_eq!(session.carousel().current_index(), Some(0));
    }

    #[test]
    fn test_search_not_found_empties_carousel() {
        let mut session = sample_session();
        session.search("", "").unwrap();
        let result = session.search("", "Curitiba").unwrap();
        assert_eq!(result.outcome, SearchOutcome::MunicipalityNotFound);
        assert!(session.carousel().is_empty());
        assert_eq!(session.current_slide(), "No results to show");
    }

    #[test]
    fn test_reply_suggests_municipality() {
        let mut session = sample_session();
        let reply = session.search_reply("", "sao pau").unwrap();
        assert!(reply.contains("Município não encontrado"));
        assert!(reply.contains("Did you mean [São Paulo]?"));
    }

    #[test]
    fn test_reply_lists_first_slide() {
        let mut session = sample_session();
        let reply = session.search_reply("santa luzia", "").unwrap();
        assert!(reply.starts_with("1 hospital(s) found"));
        assert!(reply.contains("Hospital Santa Luzia"));
        assert!(reply.contains("Rua das Flores, 123 - Centro"));
    }

    #[test]
    fn test_search_json_parses() {
        let mut session = sample_session();
        let json = session.search_json("", "sao paulo").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "OK");
        assert_eq!(value["items"].as_array().map(|items| items.len()), Some(2));
        assert_eq!(value["items"][0]["name"], "Hospital Santa Luzia");
        assert_eq!(value["items"][0]["occupancy"], 20);

        let json = session.search_json("", "sao pau").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "MUNICIPALITY_NOT_FOUND");
    }

    #[test]
    fn test_search_again_uses_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("runtime_data.json");
        let context = load_data_from_file(path.to_str().unwrap()).unwrap();
        let mut session = sample_session().with_context(context);

        assert!(session.search_again().is_err());

        session.search("", "rio de janeiro").unwrap();
        session.search("", "").unwrap();
        assert_eq!(session.carousel().count(), 3);

        let reopened = load_data_from_file(path.to_str().unwrap()).unwrap();
        let mut session = sample_session().with_context(reopened);
        let result = session.search_again().unwrap();
        assert_eq!(result.items.len(), 3);
    }
}
