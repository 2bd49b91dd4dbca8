pub mod planner;
pub mod trip;

pub use planner::{Planner, TripPlan};
pub use trip::{Interest, TripRequest, MAX_TRIP_DAYS};
