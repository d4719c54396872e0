use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;
const BUDGET_CEILING_INR: i64 = 2500;
const MID_RANGE_CEILING_INR: i64 = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.lat, self.lon
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub address: String,
    pub map_url: String,
    // Resolved position of the place; only kept for logging.
    #[serde(skip)]
    pub location: Option<Coordinate>,
}

impl PlaceResult {
    pub fn at(name: String, address: String, location: Coordinate) -> Self {
        Self {
            name,
            address,
            map_url: location.map_url(),
            location: Some(location),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Budget,
    #[serde(rename = "Mid-range")]
    MidRange,
    Luxury,
}

impl Tier {
    /// Bucket a nightly price. Thresholds are the same for every mood.
    pub fn from_price(price_inr: i64) -> Self {
        if price_inr < BUDGET_CEILING_INR {
            Tier::Budget
        } else if price_inr < MID_RANGE_CEILING_INR {
            Tier::MidRange
        } else {
            Tier::Luxury
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stay {
    #[serde(flatten)]
    pub place: PlaceResult,
    pub price_inr: i64,
    pub tier: Tier,
}

impl Stay {
    pub fn priced(place: PlaceResult, price_inr: i64) -> Self {
        Self {
            place,
            price_inr,
            tier: Tier::from_price(price_inr),
        }
    }
}
