pub mod matcher;
pub mod normalize;
pub mod occupancy;
pub mod suggest;

pub use matcher::{search, SearchOutcome, SearchResult};
pub use normalize::normalize;
pub use occupancy::{FixedOccupancy, OccupancySource, RandomOccupancy};
