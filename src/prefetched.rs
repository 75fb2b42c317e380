use std::future::Future;

use crate::country::Country;
use crate::date::Date;
use crate::{Error, Holiday};

/// Source of pre-resolved holiday lists, one list per country-year. The
/// engine never fetches by itself; callers bring whatever transport they
/// already have.
pub trait HolidayFeed {
    type Error: std::fmt::Display;

    fn fetch(
        &self,
        country: Country,
        year: isize,
    ) -> impl Future<Output = Result<Vec<Holiday>, Self::Error>>;
}

/// The simple lookup mode: a flat, pre-fetched list with no rule projection
/// and no substitute policies.
///
/// [`HolidayList::initialize`] must complete before queries; querying an
/// uninitialized list is [`Error::Uninitialized`]. A year that fails to load
/// degrades to an empty list for that year (logged, never fatal), so the
/// process keeps answering "not a holiday" for that scope.
#[derive(Debug, Clone, Default)]
pub struct HolidayList {
    entries: Vec<Holiday>,
    initialized: bool,
}

impl HolidayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the given years from `feed` into the cache, replacing any
    /// earlier contents.
    pub async fn initialize<F: HolidayFeed>(
        &mut self,
        feed: &F,
        country: Country,
        years: &[isize],
    ) {
        let mut entries = Vec::new();
        for &year in years {
            match feed.fetch(country, year).await {
                Ok(list) => entries.extend(list),
                Err(error) => {
                    tracing::warn!(
                        country = %country,
                        year,
                        error = %error,
                        "holiday feed load failed, substituting an empty list"
                    );
                }
            }
        }

        self.entries = entries;
        self.initialized = true;
    }

    pub fn is_holiday(&self, date: impl Into<Date>) -> Result<bool, Error> {
        let date = date.into();
        self.lookup(date).map(|found| found.is_some())
    }

    pub fn holiday_name(&self, date: impl Into<Date>) -> Result<Option<&str>, Error> {
        self.lookup(date.into())
    }

    fn lookup(&self, date: Date) -> Result<Option<&str>, Error> {
        if !self.initialized {
            return Err(Error::Uninitialized);
        }
        Ok(self
            .entries
            .iter()
            .find(|it| it.date == date)
            .map(|it| it.name.as_str()))
    }
}
