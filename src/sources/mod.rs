//! Static data the planner draws on: the destination dataset and the hotel directory

pub mod dataset;
pub mod hotels;

pub use dataset::{parse_cost, TravelDataset};
pub use hotels::{Hotel, HotelDirectory, HotelQuery, PriceRange, StaticHotels};
