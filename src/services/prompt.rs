use crate::core::trip::{Interest, TripRequest};

/// System message sent with every itinerary request
pub const SYSTEM_PROMPT: &str = "You are a travel expert.";

/// Soft cap on the JSON reply, stated in the prompt but never enforced
pub const MAX_REPLY_CHARS: usize = 1200;

const SCHEMA_EXAMPLE: &str = r#"

        {
            "days": [
                {
                    "day": 1,
                    "activities": [
                        {
                            "title": "Activity 1",
                            "description": "Description of Activity 1",
                            "link": "https://example.com/activity1",
                            "start_time": "10:00 AM",
                            "end_time": "12:00 PM",
                            "location": "https://maps.google.com/?q=location1"
                        },
                        {
                            "title": "Activity 2",
                            "description": "Description of Activity 2",
                            "link": "https://example.com/activity2",
                            "start_time": "02:00 PM",
                            "end_time": "04:00 PM",
                            "location": "https://maps.google.com/?q=location2"
                        },
                        ...
                    ]
                },
                ...
            ]
        }
        Ensure that each day has a 'day' field and a list of 'activities' with 'title', 'description', 'start_time', 'end_time', and 'location' fields. Keep descriptions concise.
        "#;

/// Build the user message asking for a JSON itinerary.
pub fn build_itinerary_prompt(trip: &TripRequest) -> String {
    let mut prompt = format!(
        "You are a travel expert. Give me an itinerary for {}, for {} days, assuming each day starts at 10am and ends at 8pm with a 30-minute buffer between each activity. I like to",
        trip.destination(),
        trip.trip_days()
    );

    for interest in Interest::ALL {
        if trip.has_interest(interest) {
            prompt.push_str(interest.clause());
        }
    }

    prompt.push_str(&format!(
        " Limit the length of the output JSON string to {} characters. Generate a structured JSON representation for the travel itinerary.",
        MAX_REPLY_CHARS
    ));
    prompt.push_str(SCHEMA_EXAMPLE);
    prompt
}
