use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TripError};

/// Inclusive nightly price bracket, e.g. `$100 - $200`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(TripError::InvalidPriceRange(format!("${min} - ${max}")));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, budget: u32) -> bool {
        self.min <= budget && budget <= self.max
    }
}

impl FromStr for PriceRange {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TripError::InvalidPriceRange(s.to_string());

        let compact: String = s
            .chars()
            .filter(|c| *c != '$' && !c.is_whitespace())
            .collect();
        let (min, max) = compact.split_once('-').ok_or_else(invalid)?;
        let min = min.parse::<u32>().map_err(|_| invalid())?;
        let max = max.parse::<u32>().map_err(|_| invalid())?;

        Self::new(min, max).map_err(|_| invalid())
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} - ${}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    /// Price bracket as advertised, parsed on demand with [`PriceRange`]
    pub price_range: String,
}

impl Hotel {
    pub fn new(name: impl Into<String>, price_range: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            price_range: price_range.into(),
        }
    }

    pub fn price_bounds(&self) -> Result<PriceRange> {
        self.price_range.parse()
    }
}

/// What the planner asks a hotel source for
#[derive(Debug, Clone, Copy)]
pub struct HotelQuery<'a> {
    pub city: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: u32,
}

/// A source of hotel suggestions
pub trait HotelDirectory: Send + Sync + fmt::Debug {
    /// Hotels whose price range brackets `query.budget`, in directory order
    fn hotels_within(&self, query: &HotelQuery<'_>) -> Result<Vec<Hotel>>;
}

/// Fixed list of five Bali hotels; ignores city and dates
#[derive(Debug, Clone)]
pub struct StaticHotels {
    hotels: Vec<Hotel>,
}

impl Default for StaticHotels {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticHotels {
    pub fn new() -> Self {
        Self {
            hotels: vec![
                Hotel::new("Hotel NEANO ESCAPE", "$100 - $200"),
                Hotel::new("Hotel Amnaya Resort Nusa Dua", "$200 - $500"),
                Hotel::new("Hotel Weda Cita Resort and Spa by Mahaputra", "$500 - $1100"),
                Hotel::new("Kastara Resort", "$1100 - $1500"),
                Hotel::new("Hotel Potato Head Suites & Studios", "$1500 - $2600"),
            ],
        }
    }

    pub fn with_hotels(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }
}

impl HotelDirectory for StaticHotels {
    fn hotels_within(&self, query: &HotelQuery<'_>) -> Result<Vec<Hotel>> {
        debug!(
            target: "travel::hotels",
            city = query.city,
            start = %query.start_date,
            end = %query.end_date,
            budget = query.budget,
            "filtering static hotel list"
        );

        let matches = filter_by_budget(&self.hotels, query.budget)?;
        if matches.is_empty() {
            warn!(budget = query.budget, "no hotel price range brackets the budget");
        }
        Ok(matches)
    }
}

/// Keep the hotels whose range brackets `budget` (inclusive on both ends).
pub fn filter_by_budget(hotels: &[Hotel], budget: u32) -> Result<Vec<Hotel>> {
    let mut matches = Vec::new();
    for hotel in hotels {
        if hotel.price_bounds()?.contains(budget) {
            matches.push(hotel.clone());
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(hotels: &[Hotel]) -> Vec<&str> {
        hotels.iter().map(|h| h.name.as_str()).collect()
    }

    fn query(budget: u32) -> HotelQuery<'static> {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        HotelQuery {
            city: "Bali",
            start_date: day,
            end_date: day,
            budget,
        }
    }

    #[test]
    fn test_price_range_parsing() {
        assert_eq!(
            "$100 - $200".parse::<PriceRange>().unwrap(),
            PriceRange { min: 100, max: 200 }
        );
        assert_eq!(
            "$1100-$1500".parse::<PriceRange>().unwrap(),
            PriceRange {
                min: 1100,
                max: 1500
            }
        );
    }

    #[test]
    fn test_price_range_rejects_malformed() {
        for bad in ["$100", "$100 - ", "- $200", "cheap - pricey", "$500 - $100", "$1-$2-$3"] {
            let err = bad.parse::<PriceRange>().unwrap_err();
            assert!(
                matches!(err, TripError::InvalidPriceRange(ref raw) if raw == bad),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_price_range_display() {
        assert_eq!(PriceRange::new(100, 200).unwrap().to_string(), "$100 - $200");
    }

    #[test]
    fn test_budget_150_matches_first_hotel() {
        let hotels = StaticHotels::new().hotels_within(&query(150)).unwrap();
        assert_eq!(names(&hotels), vec!["Hotel NEANO ESCAPE"]);
        assert_eq!(hotels[0].price_range, "$100 - $200");
    }

    #[test]
    fn test_budget_below_all_ranges_is_empty() {
        let hotels = StaticHotels::new().hotels_within(&query(50)).unwrap();
        assert!(hotels.is_empty());
    }

    #[test]
    fn test_budget_1200_matches_kastara() {
        let hotels = StaticHotels::new().hotels_within(&query(1200)).unwrap();
        assert_eq!(names(&hotels), vec!["Kastara Resort"]);
    }

    #[test]
    fn test_shared_boundary_matches_both_in_order() {
        let hotels = StaticHotels::new().hotels_within(&query(1500)).unwrap();
        assert_eq!(
            names(&hotels),
            vec!["Kastara Resort", "Hotel Potato Head Suites & Studios"]
        );
    }

    #[test]
    fn test_malformed_entry_is_error() {
        let directory = StaticHotels::with_hotels(vec![Hotel::new("Broken", "ask at desk")]);
        assert!(directory.hotels_within(&query(100)).is_err());
    }
}
