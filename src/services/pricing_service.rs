use rand::Rng;
use std::ops::RangeInclusive;

use crate::models::place::Stay;
use crate::models::trip::CostEstimate;

const FOOD_SHARE_OF_STAY: f64 = 0.3;
const TRAVEL_PER_DAY_INR: RangeInclusive<i64> = 500..=2000;
const DEFAULT_AVERAGE_STAY_INR: i64 = 4000;

pub struct PricingService;

impl PricingService {
    /// Food budget per day: 30% of the nightly stay, rounded half to even.
    pub fn food_per_day(stay_per_day: i64) -> i64 {
        (stay_per_day as f64 * FOOD_SHARE_OF_STAY).round_ties_even() as i64
    }

    /// Truncating mean of the stay prices. A lone placeholder stay averages
    /// to its own price, so it needs no separate branch.
    pub fn average_stay_price(stays: &[Stay]) -> i64 {
        if stays.is_empty() {
            return DEFAULT_AVERAGE_STAY_INR;
        }
        let total: i64 = stays.iter().map(|stay| stay.price_inr).sum();
        total / stays.len() as i64
    }

    /// Daily and total cost for a trip. `days` is trusted as given.
    pub fn estimate_cost<R: Rng>(days: i64, avg_price: i64, rng: &mut R) -> CostEstimate {
        let travel_per_day = rng.gen_range(TRAVEL_PER_DAY_INR);
        Self::cost_with_travel(days, avg_price, travel_per_day)
    }

    fn cost_with_travel(days: i64, stay_per_day: i64, travel_per_day: i64) -> CostEstimate {
        let food_per_day = Self::food_per_day(stay_per_day);
        CostEstimate {
            stay_per_day,
            food_per_day,
            travel_per_day,
            total_inr: (stay_per_day + food_per_day + travel_per_day) * days,
        }
    }
}
