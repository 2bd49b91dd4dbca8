use crate::{
    config::PlannerConfig,
    core::trip::TripRequest,
    error::Result,
    services::{
        build_itinerary_prompt, render_failure, render_hotels, render_itinerary, ChatBackend,
        OpenAIClient, SYSTEM_PROMPT,
    },
    sources::{Hotel, HotelDirectory, HotelQuery, StaticHotels, TravelDataset},
    types::{parse_reply, Itinerary, Report},
};
use serde::Serialize;
use tracing::{debug, info};

pub const DESTINATION_NOT_FOUND: &str = "No data found for the specified destination.";

/// Outcome of one planning run
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    /// What to show the user, in order
    pub report: Report,
    pub accommodation_cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    pub hotels: Vec<Hotel>,
}

impl TripPlan {
    fn from_report(report: Report) -> Self {
        Self {
            report,
            accommodation_cost: None,
            itinerary: None,
            hotels: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.itinerary.is_some() && !self.report.has_error()
    }
}

/// Runs dataset lookup, completion and rendering for a trip request
#[derive(Debug)]
pub struct Planner {
    backend: Box<dyn ChatBackend>,
    dataset: TravelDataset,
    hotels: Box<dyn HotelDirectory>,
}

impl Planner {
    pub fn new(backend: impl ChatBackend + 'static, dataset: TravelDataset) -> Self {
        Self {
            backend: Box::new(backend),
            dataset,
            hotels: Box::new(StaticHotels::new()),
        }
    }

    /// Build a planner talking to the configured endpoint.
    pub fn from_config(config: &PlannerConfig) -> Self {
        let mut client = OpenAIClient::default()
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_timeout(config.timeout);
        if let Some(api_key) = &config.api_key {
            client = client.with_api_key(api_key.clone());
        }
        Self::new(client, TravelDataset::new(config.dataset_path.clone()))
    }

    pub fn with_hotel_directory(mut self, hotels: impl HotelDirectory + 'static) -> Self {
        self.hotels = Box::new(hotels);
        self
    }

    /// Plan a trip.
    ///
    /// An unknown destination or an unusable model reply ends up as an error
    /// block in the report; `Err` is reserved for dataset, network and
    /// hotel-directory failures.
    pub async fn plan(&self, trip: &TripRequest) -> Result<TripPlan> {
        let destination = trip.destination();
        info!(
            destination,
            start = %trip.start_date(),
            end = %trip.end_date(),
            days = trip.trip_days(),
            include_hotels = trip.include_hotels(),
            "planning trip"
        );

        let mut report = Report::new();

        let Some(accommodation_cost) = self.dataset.accommodation_cost(destination)? else {
            info!(destination, "destination not in dataset");
            report.error(DESTINATION_NOT_FOUND);
            return Ok(TripPlan::from_report(report));
        };

        let prompt = build_itinerary_prompt(trip);
        debug!(target: "travel::completion", %prompt);

        let raw = self.backend.complete(SYSTEM_PROMPT, &prompt).await?;
        debug!(target: "travel::completion", reply = %raw);

        let itinerary = match parse_reply::<Itinerary>(&raw) {
            Ok(itinerary) => itinerary,
            Err(err) => {
                info!(error = %err, "model reply rejected");
                render_failure(&mut report, &raw, &err);
                return Ok(TripPlan {
                    accommodation_cost: Some(accommodation_cost),
                    ..TripPlan::from_report(report)
                });
            }
        };

        render_itinerary(&mut report, &itinerary);

        let mut hotels = Vec::new();
        if trip.include_hotels() {
            let query = HotelQuery {
                city: destination,
                start_date: trip.start_date(),
                end_date: trip.end_date(),
                budget: accommodation_cost,
            };
            hotels = self.hotels.hotels_within(&query)?;
            render_hotels(&mut report, accommodation_cost, &hotels);
        }

        info!(
            days = itinerary.day_count(),
            activities = itinerary.activity_count(),
            hotels = hotels.len(),
            "itinerary rendered"
        );

        Ok(TripPlan {
            report,
            accommodation_cost: Some(accommodation_cost),
            itinerary: Some(itinerary),
            hotels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tempfile::NamedTempFile;

    #[derive(Debug, Clone)]
    struct CannedBackend {
        reply: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(&self, system: &str, user: &str) -> Result<String> {
            assert_eq!(system, SYSTEM_PROMPT);
            assert!(user.contains("itinerary for"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    #[derive(Debug)]
    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Err(TripError::Http("connection reset".to_string()))
        }
    }

    fn dataset_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Destination,Accommodation cost").unwrap();
        writeln!(file, "Bali,\"$1,500\"").unwrap();
        writeln!(file, "Reykjavik,$40").unwrap();
        file
    }

    fn backend(reply: &str) -> (CannedBackend, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            CannedBackend {
                reply: reply.to_string(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn trip(destination: &str) -> TripRequest {
        TripRequest::starting(destination, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).unwrap()
    }

    const ONE_DAY: &str = r#"{"days": [{"day": 1, "activities": [
        {"title": "Tanah Lot", "description": "Temple", "link": "https://example.com",
         "start_time": "10:00 AM", "end_time": "12:00 PM"}]}]}"#;

    #[tokio::test]
    async fn test_unknown_destination_skips_backend() {
        let file = dataset_file();
        let (backend, calls) = backend(ONE_DAY);
        let planner = Planner::new(backend, TravelDataset::new(file.path()));

        let plan = planner.plan(&trip("Atlantis")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(plan.report.errors(), vec![DESTINATION_NOT_FOUND]);
        assert_eq!(plan.accommodation_cost, None);
        assert!(!plan.is_success());
    }

    #[tokio::test]
    async fn test_hotels_only_when_requested() {
        let file = dataset_file();
        let (backend, calls) = backend(ONE_DAY);
        let planner = Planner::new(backend, TravelDataset::new(file.path()));

        let plan = planner.plan(&trip("Bali")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(plan.report.headers(), vec!["Day 1"]);
        assert!(plan.hotels.is_empty());
        assert!(plan.is_success());
    }

    #[tokio::test]
    async fn test_no_matching_hotels_is_warning() {
        let file = dataset_file();
        let (backend, _) = backend(ONE_DAY);
        let planner = Planner::new(backend, TravelDataset::new(file.path()));

        let plan = planner
            .plan(&trip("Reykjavik").with_hotels(true))
            .await
            .unwrap();

        assert_eq!(plan.accommodation_cost, Some(40));
        assert_eq!(plan.report.warnings().len(), 1);
        assert!(plan.is_success());
    }

    #[tokio::test]
    async fn test_bad_reply_skips_hotels() {
        let file = dataset_file();
        let (backend, _) = backend("not json");
        let planner = Planner::new(backend, TravelDataset::new(file.path()));

        let plan = planner.plan(&trip("Bali").with_hotels(true)).await.unwrap();

        assert!(plan.report.has_error());
        assert!(plan.report.headers().is_empty());
        assert!(plan.hotels.is_empty());
        assert_eq!(plan.accommodation_cost, Some(1500));
    }

    #[tokio::test]
    async fn test_missing_key_only_matters_for_known_destinations() {
        let file = dataset_file();
        let config = PlannerConfig::default().with_dataset_path(file.path());
        let planner = Planner::from_config(&config);

        let plan = planner.plan(&trip("Atlantis")).await.unwrap();
        assert_eq!(plan.report.errors(), vec![DESTINATION_NOT_FOUND]);

        let err = planner.plan(&trip("Bali")).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let file = dataset_file();
        let planner = Planner::new(FailingBackend, TravelDataset::new(file.path()));

        let err = planner.plan(&trip("Bali")).await.unwrap_err();
        assert_eq!(err.error_code(), "HTTP_ERROR");
    }
}
