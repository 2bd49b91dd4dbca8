use crate::{
    config::PlannerConfig, core::trip::default_end_date, Interest, Planner, Report, TripRequest,
};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, time::Duration};
use tracing::{error, info};

pub const GET_STARTED: &str =
    "Enter your travel details and run again with --city to generate an itinerary.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// (flag id, interest) pairs, in the order the toggles are listed
const INTEREST_FLAGS: [(&str, Interest); 6] = [
    ("art", Interest::Art),
    ("museums", Interest::Museums),
    ("outdoor", Interest::Outdoor),
    ("indoor", Interest::Indoor),
    ("kids", Interest::KidsFriendly),
    ("young-people", Interest::YoungPeople),
];

pub fn build_command() -> Command {
    let mut command = Command::new("travel-itinerary")
        .version("0.1.0")
        .about("Travel Itinerary Generator: day-by-day plans from an LLM, with hotel suggestions")
        .arg(
            Arg::new("city")
                .short('c')
                .long("city")
                .value_name("CITY")
                .help("The city you're visiting (must match the dataset exactly)"),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .value_name("YYYY-MM-DD")
                .help("Start date of the trip (defaults to today)"),
        )
        .arg(
            Arg::new("end")
                .short('e')
                .long("end")
                .value_name("YYYY-MM-DD")
                .help("End date, at most 30 days after the start (defaults to the next day)"),
        );

    for (id, interest) in INTEREST_FLAGS {
        command = command.arg(
            Arg::new(id)
                .long(id)
                .action(ArgAction::SetTrue)
                .help(interest.label()),
        );
    }

    command
        .arg(
            Arg::new("include-hotels")
                .long("include-hotels")
                .action(ArgAction::SetTrue)
                .help("Include Hotels in Itinerary"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the plan as JSON instead of text"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Chat model to use (or set OPENAI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Chat completion base URL (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .value_name("PATH")
                .help("Travel details CSV (or set TRAVEL_DATASET)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Request timeout in seconds")
                .default_value("120"),
        )
}

/// Turn the form flags into a trip request; `None` when no city was given.
pub fn trip_from_matches(
    matches: &ArgMatches,
    today: NaiveDate,
) -> anyhow::Result<Option<TripRequest>> {
    let Some(city) = matches
        .get_one::<String>("city")
        .map(|city| city.as_str())
        .filter(|city| !city.is_empty())
    else {
        return Ok(None);
    };

    let start = match matches.get_one::<String>("start") {
        Some(raw) => parse_date(raw, "start")?,
        None => today,
    };
    let end = match matches.get_one::<String>("end") {
        Some(raw) => parse_date(raw, "end")?,
        None => default_end_date(start),
    };

    let interests = INTEREST_FLAGS
        .iter()
        .filter(|(id, _)| matches.get_flag(id))
        .map(|(_, interest)| *interest);

    let trip = TripRequest::new(city, start, end)?
        .with_interests(interests)
        .with_hotels(matches.get_flag("include-hotels"));

    Ok(Some(trip))
}

/// Flags win over environment variables, which win over defaults.
///
/// A missing API key is not an error here; the client reports it when the
/// first completion request is made.
pub fn config_from_matches(matches: &ArgMatches) -> PlannerConfig {
    let mut config = PlannerConfig::default();

    if let Some(api_key) = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("OPENAI_API_KEY").ok())
    {
        config = config.with_api_key(api_key);
    }

    if let Some(base_url) = matches
        .get_one::<String>("base-url")
        .cloned()
        .or_else(|| env::var("OPENAI_BASE_URL").ok())
    {
        config = config.with_base_url(base_url);
    }
    if let Some(model) = matches
        .get_one::<String>("model")
        .cloned()
        .or_else(|| env::var("OPENAI_MODEL").ok())
    {
        config = config.with_model(model);
    }
    if let Some(dataset) = matches
        .get_one::<String>("dataset")
        .cloned()
        .or_else(|| env::var("TRAVEL_DATASET").ok())
    {
        config = config.with_dataset_path(dataset);
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*seconds));
    }

    config
}

fn parse_date(raw: &str, which: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("invalid {which} date `{raw}`, expected YYYY-MM-DD"))
}

/// Exit code for unusable dates
pub const EXIT_USAGE: i32 = 2;

/// What one invocation prints and the exit code it ends with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    pub output: String,
}

impl Outcome {
    fn from_report(code: i32, report: &Report) -> Self {
        Self {
            code,
            output: report.to_text(),
        }
    }
}

/// Run one form submission against `planner`.
///
/// Pipeline failures come back as `Err`; everything the user should read,
/// including an unknown destination or a rejected reply, is in the outcome.
pub async fn run_with(
    matches: &ArgMatches,
    today: NaiveDate,
    planner: &Planner,
) -> anyhow::Result<Outcome> {
    let trip = match trip_from_matches(matches, today) {
        Ok(Some(trip)) => trip,
        Ok(None) => {
            let mut report = Report::new();
            report.info(GET_STARTED);
            return Ok(Outcome::from_report(0, &report));
        }
        Err(err) => {
            let mut report = Report::new();
            report.error(format!("{err:#}"));
            return Ok(Outcome::from_report(EXIT_USAGE, &report));
        }
    };

    let plan = match planner.plan(&trip).await {
        Ok(plan) => plan,
        Err(err) => {
            error!(code = err.error_code(), "Itinerary generation failed: {}", err);
            return Err(err.into());
        }
    };

    let code = if plan.report.has_error() { 1 } else { 0 };
    if matches.get_flag("json") {
        Ok(Outcome {
            code,
            output: serde_json::to_string_pretty(&plan)?,
        })
    } else {
        Ok(Outcome::from_report(code, &plan.report))
    }
}

/// CLI entry point; returns the process exit code
pub async fn run() -> anyhow::Result<i32> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command().get_matches();

    let config = config_from_matches(&matches);
    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);
    info!("Dataset: {}", config.dataset_path.display());

    let planner = Planner::from_config(&config);
    let outcome = run_with(&matches, Local::now().date_naive(), &planner).await?;

    if outcome.code == EXIT_USAGE {
        eprintln!("{}", outcome.output);
    } else {
        println!("{}", outcome.output);
    }
    Ok(outcome.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::planner::DESTINATION_NOT_FOUND, ChatBackend, TravelDataset};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tempfile::NamedTempFile;

    const ONE_DAY: &str = r#"{"days": [{"day": 1, "activities": [
        {"title": "Tanah Lot", "description": "Temple", "link": "https://example.com",
         "start_time": "10:00 AM", "end_time": "12:00 PM"}]}]}"#;

    #[derive(Debug, Clone)]
    struct CannedBackend {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(&self, _system: &str, _user: &str) -> crate::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ONE_DAY.to_string())
        }
    }

    fn dataset_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Destination,Accommodation cost").unwrap();
        writeln!(file, "Bali,\"$1,500\"").unwrap();
        file
    }

    fn canned_planner(file: &NamedTempFile) -> (Planner, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = CannedBackend {
            calls: Arc::clone(&calls),
        };
        (Planner::new(backend, TravelDataset::new(file.path())), calls)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["travel-itinerary"];
        argv.extend_from_slice(args);
        build_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_no_city_means_no_trip() {
        assert!(trip_from_matches(&matches(&[]), today()).unwrap().is_none());
        assert!(trip_from_matches(&matches(&["--city", ""]), today())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_default_dates() {
        let trip = trip_from_matches(&matches(&["-c", "Bali"]), today())
            .unwrap()
            .unwrap();
        assert_eq!(trip.start_date(), today());
        assert_eq!(trip.trip_days(), 1);
        assert!(!trip.include_hotels());
        assert_eq!(trip.interests().count(), 0);
    }

    #[test]
    fn test_flags_map_to_interests() {
        let trip = trip_from_matches(
            &matches(&[
                "--city",
                "Bali",
                "--start",
                "2024-06-01",
                "--end",
                "2024-06-04",
                "--kids",
                "--art",
                "--include-hotels",
            ]),
            today(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(trip.trip_days(), 3);
        assert!(trip.include_hotels());
        let interests: Vec<_> = trip.interests().collect();
        assert_eq!(interests, vec![Interest::Art, Interest::KidsFriendly]);
    }

    #[test]
    fn test_bad_dates_are_rejected() {
        let err = trip_from_matches(&matches(&["-c", "Bali", "-s", "01/05/2024"]), today())
            .unwrap_err();
        assert!(err.to_string().contains("invalid start date"));

        let err = trip_from_matches(
            &matches(&["-c", "Bali", "-s", "2024-05-01", "-e", "2024-07-01"]),
            today(),
        )
        .unwrap_err();
        let trip_err = err.downcast_ref::<crate::TripError>().unwrap();
        assert_eq!(trip_err.error_code(), "INVALID_DATES");
    }

    #[test]
    fn test_config_flags_override_defaults() {
        let config = config_from_matches(&matches(&[
            "-k",
            "flag-key",
            "-m",
            "gpt-4o-mini",
            "-d",
            "trips.csv",
            "-t",
            "30",
        ]));

        assert_eq!(config.api_key.as_deref(), Some("flag-key"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.dataset_path, std::path::PathBuf::from("trips.csv"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_run_without_city_prints_get_started() {
        let file = dataset_file();
        let (planner, calls) = canned_planner(&file);

        let outcome = run_with(&matches(&[]), today(), &planner).await.unwrap();

        assert_eq!(outcome.code, 0);
        assert_eq!(outcome.output, format!("info: {GET_STARTED}"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_with_bad_dates_is_usage_error() {
        let file = dataset_file();
        let (planner, calls) = canned_planner(&file);

        let outcome = run_with(
            &matches(&["-c", "Bali", "-s", "2024-05-10", "-e", "2024-05-01"]),
            today(),
            &planner,
        )
        .await
        .unwrap();
        assert_eq!(outcome.code, EXIT_USAGE);
        assert!(outcome.output.starts_with("error: Invalid trip dates"), "{}", outcome.output);

        let outcome = run_with(&matches(&["-c", "Bali", "-e", "tomorrow"]), today(), &planner)
            .await
            .unwrap();
        assert_eq!(outcome.code, EXIT_USAGE);
        assert!(outcome.output.contains("invalid end date `tomorrow`"), "{}", outcome.output);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_unknown_destination_exits_one() {
        let file = dataset_file();
        let (planner, calls) = canned_planner(&file);

        let outcome = run_with(&matches(&["-c", "Atlantis"]), today(), &planner)
            .await
            .unwrap();

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.output, format!("error: {DESTINATION_NOT_FOUND}"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_prints_report_text() {
        let file = dataset_file();
        let (planner, calls) = canned_planner(&file);

        let outcome = run_with(&matches(&["-c", "Bali", "--include-hotels"]), today(), &planner)
            .await
            .unwrap();

        assert_eq!(outcome.code, 0);
        assert!(outcome.output.starts_with("\n# Day 1\n## Tanah Lot"), "{}", outcome.output);
        assert!(outcome.output.contains("# Expected Accommodation Cost: 1500"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_json_output() {
        let file = dataset_file();
        let (planner, _) = canned_planner(&file);

        let outcome = run_with(
            &matches(&["-c", "Bali", "--include-hotels", "--json"]),
            today(),
            &planner,
        )
        .await
        .unwrap();
        assert_eq!(outcome.code, 0);

        let plan: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(plan["accommodation_cost"], 1500);
        assert_eq!(plan["itinerary"]["days"][0]["day"], 1);
        assert_eq!(
            plan["report"]["blocks"][0],
            serde_json::json!({"type": "header", "text": "Day 1"})
        );
        let hotels: Vec<&str> = plan["hotels"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|hotel| hotel["name"].as_str())
            .collect();
        assert_eq!(hotels, vec!["Kastara Resort", "Hotel Potato Head Suites & Studios"]);
    }

    #[tokio::test]
    async fn test_unknown_destination_reported_without_api_key() {
        let file = dataset_file();
        let dataset = file.path().to_str().unwrap();
        let args = matches(&["-c", "Atlantis", "-d", dataset]);

        let planner = Planner::from_config(&config_from_matches(&args));
        let outcome = run_with(&args, today(), &planner).await.unwrap();

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.output, format!("error: {DESTINATION_NOT_FOUND}"));
    }
}
