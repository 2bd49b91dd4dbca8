use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, TripError};

/// Longest trip the form accepts, in days after the start date
pub const MAX_TRIP_DAYS: i64 = 30;

/// Interest toggles, declared in the order their clauses appear in the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    Art,
    Museums,
    Outdoor,
    Indoor,
    KidsFriendly,
    YoungPeople,
}

impl Interest {
    pub const ALL: [Interest; 6] = [
        Interest::Art,
        Interest::Museums,
        Interest::Outdoor,
        Interest::Indoor,
        Interest::KidsFriendly,
        Interest::YoungPeople,
    ];

    /// Fragment appended to the prompt when the interest is selected
    pub fn clause(&self) -> &'static str {
        match self {
            Interest::Art => " explore art,",
            Interest::Museums => " visit museums,",
            Interest::Outdoor => " engage in outdoor activities,",
            Interest::Indoor => " explore indoor activities,",
            Interest::KidsFriendly => " find places suitable for kids,",
            Interest::YoungPeople => " discover places suitable for young people,",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interest::Art => "Art",
            Interest::Museums => "Museums",
            Interest::Outdoor => "Outdoor Activities",
            Interest::Indoor => "Indoor Activities",
            Interest::KidsFriendly => "Good for Kids",
            Interest::YoungPeople => "Good for Young People",
        }
    }
}

/// One submission of the trip form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    interests: BTreeSet<Interest>,
    include_hotels: bool,
}

impl TripRequest {
    /// Validate the date range; the end must fall within `[start, start + 30 days]`.
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        if end_date < start_date {
            return Err(TripError::InvalidDates(format!(
                "end date {} is before start date {}",
                end_date, start_date
            )));
        }

        let latest = start_date + Duration::days(MAX_TRIP_DAYS);
        if end_date > latest {
            return Err(TripError::InvalidDates(format!(
                "end date {} is more than {} days after {} (latest allowed: {})",
                end_date, MAX_TRIP_DAYS, start_date, latest
            )));
        }

        Ok(Self {
            destination: destination.into(),
            start_date,
            end_date,
            interests: BTreeSet::new(),
            include_hotels: false,
        })
    }

    /// Trip ending the day after `start_date`
    pub fn starting(destination: impl Into<String>, start_date: NaiveDate) -> Result<Self> {
        Self::new(destination, start_date, default_end_date(start_date))
    }

    pub fn with_interest(mut self, interest: Interest) -> Self {
        self.interests.insert(interest);
        self
    }

    pub fn with_interests(mut self, interests: impl IntoIterator<Item = Interest>) -> Self {
        self.interests.extend(interests);
        self
    }

    pub fn with_hotels(mut self, include_hotels: bool) -> Self {
        self.include_hotels = include_hotels;
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn interests(&self) -> impl Iterator<Item = Interest> + '_ {
        self.interests.iter().copied()
    }

    pub fn has_interest(&self, interest: Interest) -> bool {
        self.interests.contains(&interest)
    }

    pub fn include_hotels(&self) -> bool {
        self.include_hotels
    }

    /// Whole days between start and end; zero for a same-day trip
    pub fn trip_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

pub fn default_end_date(start_date: NaiveDate) -> NaiveDate {
    start_date + Duration::days(1)
}
