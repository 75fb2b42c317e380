use std::collections::HashMap;
use std::sync::OnceLock;

use crate::country::Country;
use crate::rule::{CustomHoliday, HolidayRule};
use crate::Error;

/// Embedded rule dataset for a country, in the wire schema of
/// [`crate::rule::HolidayRule`].
fn dataset(country: Country) -> &'static str {
    match country {
        Country::AU => include_str!("../data/au.json"),
        Country::JP => include_str!("../data/jp.json"),
        Country::KR => include_str!("../data/kr.json"),
        Country::SG => include_str!("../data/sg.json"),
        Country::TW => include_str!("../data/tw.json"),
        Country::US => include_str!("../data/us.json"),
    }
}

/// Base rules for a country, parsed once per process and immutable after.
pub(crate) fn base_rules(country: Country) -> Result<&'static [HolidayRule], Error> {
    const CELL: OnceLock<Vec<HolidayRule>> = OnceLock::new();
    static PARSED: [OnceLock<Vec<HolidayRule>>; Country::ALL.len()] = [CELL; Country::ALL.len()];

    let cell = &PARSED[country as usize];
    if let Some(rules) = cell.get() {
        return Ok(rules);
    }

    let rules: Vec<HolidayRule> = serde_json::from_str(dataset(country))
        .map_err(|err| Error::MalformedDataset(err.to_string()))?;
    Ok(cell.get_or_init(|| rules))
}

/// Mutable overlay of user-defined holidays, owned by whoever owns the
/// engine. One list per country; inserting a holiday with the same
/// (month, day) as an existing entry replaces it.
#[derive(Debug, Clone, Default)]
pub struct CustomStore {
    by_country: HashMap<Country, Vec<CustomHoliday>>,
}

impl CustomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a custom holiday, replacing any existing entry for the same
    /// calendar slot. A non-recurring holiday without a year is rejected
    /// before anything is stored.
    pub fn set(&mut self, country: Country, holiday: CustomHoliday) -> Result<(), Error> {
        if !holiday.recurring && holiday.year.is_none() {
            return Err(Error::MissingYear);
        }

        let entries = self.by_country.entry(country).or_default();
        entries.retain(|it| !(it.month == holiday.month && it.day == holiday.day));
        entries.push(holiday);
        Ok(())
    }

    pub fn for_country(&self, country: Country) -> &[CustomHoliday] {
        self.by_country
            .get(&country)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Wipes every country's custom holidays. Intended for test isolation.
    pub fn clear(&mut self) {
        self.by_country.clear();
    }
}
