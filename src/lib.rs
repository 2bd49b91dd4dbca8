//! travel-itinerary-rs: LLM-generated day-by-day travel itineraries
//!
//! A trip request (destination, dates, interests) is priced against a CSV
//! dataset of past trips, turned into a prompt for an OpenAI-compatible chat
//! endpoint, and the JSON reply is validated and rendered as a report of
//! headers and lines. Hotels whose price range brackets the expected
//! accommodation cost can be appended.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use travel_itinerary_rs::{Interest, Planner, PlannerConfig, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::from_env();
//!     let planner = Planner::from_config(&config);
//!
//!     let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//!     let trip = TripRequest::starting("Bali", start)?
//!         .with_interest(Interest::Outdoor)
//!         .with_hotels(true);
//!
//!     let plan = planner.plan(&trip).await?;
//!     println!("{}", plan.report);
//!     Ok(())
//! }
//! ```

extern crate self as travel_itinerary_rs;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod sources;
pub mod types;

pub use config::PlannerConfig;
pub use crate::core::{Interest, Planner, TripPlan, TripRequest, MAX_TRIP_DAYS};
pub use error::{Result, TripError};
pub use itinerary_macros::reply_schema;
pub use schemas::{ReplySchema, SchemaHandle};
pub use services::{build_itinerary_prompt, ChatBackend, OpenAIClient};
pub use sources::{Hotel, HotelDirectory, HotelQuery, PriceRange, StaticHotels, TravelDataset};
pub use types::{
    parse_reply, Activity, Block, DayPlan, Itinerary, ReplyError, Report, Scalar,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
