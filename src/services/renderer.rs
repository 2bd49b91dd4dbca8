use crate::{
    sources::Hotel,
    types::{Itinerary, ReplyError, Report},
};

pub const NO_HOTELS_WARNING: &str =
    "No hotels found within the specified accommodation cost range.";

/// One header per day, one subheader block per activity, both in reply order.
pub fn render_itinerary(report: &mut Report, itinerary: &Itinerary) {
    for day in &itinerary.days {
        report.header(format!("Day {}", day.day));
        for activity in &day.activities {
            report.subheader(activity.title.to_string());
            report.text(format!("Description: {}", activity.description));
            report.text(format!("Location: {}", activity.location_or_placeholder()));
            report.text(format!(
                "Time: {} - {}",
                activity.start_time, activity.end_time
            ));
            report.text(format!("Link: {}", activity.link));
            report.text("");
        }
    }
}

/// Show why the reply was rejected, followed by the raw text.
pub fn render_failure(report: &mut Report, raw: &str, error: &ReplyError) {
    match error {
        ReplyError::Decode(err) => report.error(format!(
            "Failed to decode JSON response from OpenAI. Error: {}",
            err
        )),
        ReplyError::Shape(details) => report.error(format!(
            "Itinerary response does not match the expected schema: {}",
            details
        )),
    }
    report.text("Raw JSON response:");
    report.text(raw.trim());
}

pub fn render_hotels(report: &mut Report, accommodation_cost: u32, hotels: &[Hotel]) {
    report.header("Hotels");
    report.header(format!("Expected Accommodation Cost: {}", accommodation_cost));
    report.subheader("Hotels Suggestions within the expected budget");

    if hotels.is_empty() {
        report.warning(NO_HOTELS_WARNING);
        return;
    }

    for hotel in hotels {
        report.subheader(&hotel.name);
        report.text(format!("Price Range: {}", hotel.price_range));
        report.text("");
    }
}
