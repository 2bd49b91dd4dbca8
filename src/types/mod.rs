pub mod itinerary;
pub mod report;
pub mod response;

pub use itinerary::{Activity, DayPlan, Itinerary, Scalar};
pub use report::{Block, Report};
pub use response::{parse_reply, ReplyError};
