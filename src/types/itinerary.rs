use std::fmt;

use crate::reply_schema;
use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject},
    JsonSchema,
};
use serde::{Deserialize, Serialize};

/// Day-by-day travel itinerary returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[reply_schema]
pub struct Itinerary {
    /// Days of the trip in the order they should be presented
    pub days: Vec<DayPlan>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// Day counter as written by the model, e.g. 1 or "1"
    pub day: Scalar,
    /// Activities in chronological order
    pub activities: Vec<Activity>,
}

/// A single timed activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    pub title: Scalar,
    pub description: Scalar,
    /// Website for the activity
    pub link: Scalar,
    /// Start time as written by the model, e.g. "10:00 AM"
    pub start_time: Scalar,
    pub end_time: Scalar,
    /// Usually a maps URL; models often leave it out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Scalar>,
}

/// A JSON scalar kept exactly as the model wrote it.
///
/// `"day": "1"` displays as `1` and `"day": 1.0` as `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Null,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(text) => f.write_str(text),
            Scalar::Number(number) => write!(f, "{}", number),
            Scalar::Flag(flag) => write!(f, "{}", flag),
            Scalar::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::Text(text)
    }
}

impl From<u32> for Scalar {
    fn from(number: u32) -> Self {
        Scalar::Number(number.into())
    }
}

impl JsonSchema for Scalar {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        "Scalar".to_string()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(
                vec![
                    InstanceType::String,
                    InstanceType::Number,
                    InstanceType::Boolean,
                    InstanceType::Null,
                ]
                .into(),
            ),
            ..Default::default()
        }
        .into()
    }
}

impl Itinerary {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }
}

impl Activity {
    pub fn location_or_placeholder(&self) -> String {
        self.location
            .as_ref()
            .map(Scalar::to_string)
            .unwrap_or_else(|| "N/A".to_string())
    }
}
