use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::models::hospital::HospitalRecord;

pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1576091160399-112ba8d25d1f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::EnumIter)]
pub enum OccupancyLevel {
    Low,
    Moderate,
    High,
}

impl OccupancyLevel {
    /// Exclusive upper bound of the occupancy band, in declaration order.
    pub fn upper_bound(&self) -> u16 {
        match self {
            OccupancyLevel::Low => 40,
            OccupancyLevel::Moderate => 70,
            OccupancyLevel::High => u16::MAX,
        }
    }

    pub fn from_occupancy(occupancy: u8) -> Self {
        OccupancyLevel::iter()
            .find(|level| u16::from(occupancy) < level.upper_bound())
            .unwrap_or(OccupancyLevel::High)
    }

    pub fn color(&self) -> &'static str {
        match self {
            OccupancyLevel::Low => "#4CAF50",
            OccupancyLevel::Moderate => "#FFA500",
            OccupancyLevel::High => "#FF3B30",
        }
    }
}

impl Display for OccupancyLevel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            OccupancyLevel::Low => write!(f, "{:^10}", "Low"),
            OccupancyLevel::Moderate => write!(f, "{:^10}", "Moderate"),
            OccupancyLevel::High => write!(f, "{:^10}", "High"),
        }
    }
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub image: String,
    pub name: String,
    pub address: String,
    pub occupancy: u8,
}

impl DisplayRecord {
    pub fn from_hospital(hospital: &HospitalRecord, occupancy: u8) -> Self {
        DisplayRecord {
            image: PLACEHOLDER_IMAGE.to_string(),
            name: hospital.display_name.clone(),
            address: hospital.formatted_address(),
            occupancy,
        }
    }

    pub fn occupancy_level(&self) -> OccupancyLevel {
        OccupancyLevel::from_occupancy(self.occupancy)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::hospital::RegionCode;

    #[test]
    fn test_occupancy_level_bounds() {
        assert_eq!(OccupancyLevel::from_occupancy(0), OccupancyLevel::Low);
        assert_eq!(OccupancyLevel::from_occupancy(39), OccupancyLevel::Low);
        assert_eq!(OccupancyLevel::from_occupancy(40), OccupancyLevel::Moderate);
        assert_eq!(OccupancyLevel::from_occupancy(69), OccupancyLevel::Moderate);
        assert_eq!(OccupancyLevel::from_occupancy(70), OccupancyLevel::High);
        assert_eq!(OccupancyLevel::from_occupancy(99), OccupancyLevel::High);
        assert_eq!(OccupancyLevel::from_occupancy(255), OccupancyLevel::High);
    }

    #[test]
    fn test_occupancy_bands_ascending() {
        let bounds = OccupancyLevel::iter().map(|l| l.upper_bound()).collect::<Vec<_>>();
        assert!(bounds.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_occupancy_level_colors_distinct() {
        let colors = OccupancyLevel::iter().map(|l| l.color()).collect::<Vec<_>>();
        assert_eq!(colors, vec!["#4CAF50", "#FFA500", "#FF3B30"]);
    }

    #[test]
    fn test_from_hospital() {
        let hospital = HospitalRecord::new("Hospital Vida Nova", RegionCode::parse("330455").unwrap())
            .with_address("Av. Brasil", "456", "Jardim Paulista");
        let record = DisplayRecord::from_hospital(&hospital, 42);
        assert_eq!(record.name, "Hospital Vida Nova");
        assert_eq!(record.address, "Av. Brasil, 456 - Jardim Paulista");
        assert_eq!(record.image, PLACEHOLDER_IMAGE);
        assert_eq!(record.occupancy_level(), OccupancyLevel::Moderate);
    }
}
