use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::place::{Coordinate, PlaceResult, Stay};

const DEFAULT_DAYS: i64 = 3;
const DEFAULT_MOOD: &str = "relaxed";
pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mood {
    Relaxed,
    Cultural,
    Adventurous,
    Spiritual,
    Other(String),
}

impl Mood {
    /// Trims and lowercases before matching; unknown moods are kept verbatim.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "relaxed" => Mood::Relaxed,
            "cultural" => Mood::Cultural,
            "adventurous" => Mood::Adventurous,
            "spiritual" => Mood::Spiritual,
            _ => Mood::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mood::Relaxed => "relaxed",
            Mood::Cultural => "cultural",
            Mood::Adventurous => "adventurous",
            Mood::Spiritual => "spiritual",
            Mood::Other(other) => other,
        }
    }

    /// Nightly price band in INR, inclusive on both ends.
    pub fn price_range(&self) -> RangeInclusive<i64> {
        match self {
            Mood::Relaxed | Mood::Cultural => 5000..=25000,
            _ => 800..=7000,
        }
    }

    pub fn stay_categories(&self) -> &'static [&'static str] {
        match self {
            Mood::Relaxed => &["accommodation.resort", "accommodation.hotel"],
            Mood::Cultural => &[
                "accommodation.home_stay",
                "accommodation.guest_house",
                "accommodation.apartment",
            ],
            Mood::Adventurous => &["accommodation.hostel", "camping"],
            Mood::Spiritual => &["accommodation.lodge", "accommodation.guest_house"],
            Mood::Other(_) => &["accommodation.hotel"],
        }
    }

    pub fn attraction_categories(&self) -> &'static [&'static str] {
        match self {
            Mood::Spiritual => &["religion.place_of_worship"],
            _ => &["tourism.attraction", "leisure.park"],
        }
    }

    /// "deep sea" -> "Deep Sea"
    pub fn title(&self) -> String {
        let mut title = String::with_capacity(self.as_str().len());
        let mut at_word_start = true;
        for c in self.as_str().chars() {
            if c.is_alphabetic() {
                if at_word_start {
                    title.extend(c.to_uppercase());
                } else {
                    title.extend(c.to_lowercase());
                }
                at_word_start = false;
            } else {
                title.push(c);
                at_word_start = true;
            }
        }
        title
    }
}

/// Raw body of `POST /plan_trip`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TripRequest {
    pub region: Option<String>,
    pub days: Option<i64>,
    pub mood: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Region is required")]
    MissingRegion,

    #[error("Days must be between 1 and 30")]
    DaysOutOfRange(i64),
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripParams {
    pub region: String,
    pub days: i64,
    pub mood: Mood,
}

impl TripRequest {
    pub fn validate(self) -> Result<TripParams, ValidationError> {
        let region = self
            .region
            .map(|region| region.trim().to_string())
            .filter(|region| !region.is_empty())
            .ok_or(ValidationError::MissingRegion)?;

        let days = self.days.unwrap_or(DEFAULT_DAYS);
        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err(ValidationError::DaysOutOfRange(days));
        }

        let mood = Mood::parse(self.mood.as_deref().unwrap_or(DEFAULT_MOOD));

        Ok(TripParams { region, days, mood })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub stay_per_day: i64,
    pub food_per_day: i64,
    pub travel_per_day: i64,
    pub total_inr: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub region: String,
    pub coordinates: Coordinate,
    pub mood: String,
    pub days: i64,
    pub stays: Vec<Stay>,
    pub attractions: Vec<PlaceResult>,
    pub restaurants: Vec<PlaceResult>,
    pub estimated_cost: CostEstimate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_parse_normalizes() {
        assert_eq!(Mood::parse("  Relaxed "), Mood::Relaxed);
        assert_eq!(Mood::parse("SPIRITUAL"), Mood::Spiritual);
        assert_eq!(Mood::parse("Foodie"), Mood::Other("foodie".to_string()));
        assert_eq!(Mood::parse("Foodie").as_str(), "foodie");
    }

    #[test]
    fn test_mood_price_bands() {
        assert_eq!(Mood::Relaxed.price_range(), 5000..=25000);
        assert_eq!(Mood::Cultural.price_range(), 5000..=25000);
        assert_eq!(Mood::Adventurous.price_range(), 800..=7000);
        assert_eq!(Mood::Spiritual.price_range(), 800..=7000);
        assert_eq!(Mood::parse("romantic").price_range(), 800..=7000);
    }

    #[test]
    fn test_spiritual_attractions_are_places_of_worship_only() {
        assert_eq!(
            Mood::Spiritual.attraction_categories(),
            &["religion.place_of_worship"]
        );
        for mood in [Mood::Relaxed, Mood::Cultural, Mood::Adventurous] {
            assert!(mood.attraction_categories().contains(&"tourism.attraction"));
        }
    }

    #[test]
    fn test_unknown_mood_uses_generic_hotel() {
        assert_eq!(
            Mood::parse("whatever").stay_categories(),
            &["accommodation.hotel"]
        );
    }

    #[test]
    fn test_mood_title() {
        assert_eq!(Mood::Relaxed.title(), "Relaxed");
        assert_eq!(Mood::parse("deep SEA").title(), "Deep Sea");
        assert_eq!(Mood::parse("").title(), "");
    }

    #[test]
    fn test_validate_applies_defaults() {
        let params = TripRequest {
            region: Some("  Goa ".to_string()),
            days: None,
            mood: None,
        }
        .validate()
        .unwrap();

        assert_eq!(params.region, "Goa");
        assert_eq!(params.days, 3);
        assert_eq!(params.mood, Mood::Relaxed);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert_eq!(
            TripRequest::default().validate(),
            Err(ValidationError::MissingRegion)
        );
        assert_eq!(
            TripRequest {
                region: Some("   ".to_string()),
                ..Default::default()
            }
            .validate(),
            Err(ValidationError::MissingRegion)
        );

        for days in [0, -2, 31] {
            let err = TripRequest {
                region: Some("Goa".to_string()),
                days: Some(days),
                mood: None,
            }
            .validate()
            .unwrap_err();
            assert_eq!(err, ValidationError::DaysOutOfRange(days));
            assert_eq!(err.to_string(), "Days must be between 1 and 30");
        }
    }
}
