use std::collections::BTreeMap;

use crate::builder;
use crate::convert::{CalendarService, CivilCalendarService};
use crate::country::Country;
use crate::date::Date;
use crate::rule::CustomHoliday;
use crate::store::CustomStore;
use crate::substitute::{substitute_for, SubstitutePolicy};
use crate::Error;

/// The holiday query facade: base rules, custom overlays and substitute
/// policies behind one `is_holiday` entry point.
///
/// The engine owns the custom-holiday store; whoever owns the engine controls
/// its lifetime, and `&mut` methods serialize writes.
///
/// ```
/// use redletter::{Country, HolidayEngine};
///
/// let engine = HolidayEngine::new();
/// let date: redletter::Date = "2025-01-01".parse()?;
/// assert!(engine.is_holiday(Country::US, date)?);
/// # Ok::<(), redletter::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayEngine<C: CalendarService = CivilCalendarService> {
    calendar: C,
    custom: CustomStore,
}

impl HolidayEngine {
    /// An engine backed by the built-in conversion service.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CalendarService> HolidayEngine<C> {
    /// An engine resolving rules against a caller-supplied conversion
    /// service.
    pub fn with_calendar(calendar: C) -> Self {
        HolidayEngine {
            calendar,
            custom: CustomStore::new(),
        }
    }

    /// Layers a custom holiday over `country`'s base rules. An existing
    /// custom holiday on the same (month, day) is replaced.
    pub fn set_custom_holiday(
        &mut self,
        country: Country,
        holiday: CustomHoliday,
    ) -> Result<(), Error> {
        self.custom.set(country, holiday)
    }

    /// Removes every custom holiday, for all countries. Intended for test
    /// isolation, not as a production surface.
    pub fn clear_custom_holidays(&mut self) {
        self.custom.clear();
    }

    /// The full date → label map for one country-year. Labels of rules that
    /// independently resolve to the same date are joined with `" + "`.
    pub fn holidays(&self, country: Country, year: isize) -> Result<BTreeMap<Date, String>, Error> {
        builder::build(country, year, &self.custom, &self.calendar)
    }

    /// Whether `date` is a public holiday in `country`, either directly or as
    /// a substitute under the country's policy.
    pub fn is_holiday(&self, country: Country, date: impl Into<Date>) -> Result<bool, Error> {
        let date = date.into();
        let map = builder::build(country, date.year(), &self.custom, &self.calendar)?;

        if map.contains_key(&date) {
            return Ok(true);
        }

        let policy = SubstitutePolicy::of(country);
        if policy == SubstitutePolicy::None {
            return Ok(false);
        }

        // Custom holidays may opt out of substitution for their date.
        let exempt: Vec<Date> = self
            .custom
            .for_country(country)
            .iter()
            .filter(|it| it.applies_to(date.year()) && !it.substitute)
            .map(|it| Date::from_ymd(date.year(), it.month, it.day))
            .collect();

        for (&entry, _) in &map {
            if exempt.contains(&entry) {
                continue;
            }
            if substitute_for(policy, &map, entry)? == Some(date) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::easter_sunday;
    use crate::hijri::HijriYmd;
    use crate::lunisolar::LunarYmd;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn direct_membership() {
        let engine = HolidayEngine::new();
        assert!(engine.is_holiday(Country::US, date("2025-01-01")).unwrap());
        assert!(!engine.is_holiday(Country::US, date("2025-01-02")).unwrap());
    }

    #[test]
    fn substitute_membership() {
        let engine = HolidayEngine::new();
        // Australia Day 2025 falls on a Sunday.
        assert!(engine.is_holiday(Country::AU, date("2025-01-26")).unwrap());
        assert!(engine.is_holiday(Country::AU, date("2025-01-27")).unwrap());
        assert!(!engine.is_holiday(Country::AU, date("2025-01-28")).unwrap());
    }

    #[test]
    fn substitute_opt_out_is_respected() {
        let mut engine = HolidayEngine::new();
        engine
            .set_custom_holiday(
                Country::KR,
                CustomHoliday::new("창립기념일", 6, 15).without_substitute(),
            )
            .unwrap();

        assert!(engine.is_holiday(Country::KR, date("2025-06-15")).unwrap());
        assert!(!engine.is_holiday(Country::KR, date("2025-06-16")).unwrap());

        engine.clear_custom_holidays();
        engine
            .set_custom_holiday(Country::KR, CustomHoliday::new("창립기념일", 6, 15))
            .unwrap();
        assert!(engine.is_holiday(Country::KR, date("2025-06-16")).unwrap());
    }

    /// A conversion service with pinned answers, for exercising the engine
    /// against a controlled calendar.
    struct FixedCalendar {
        lunar_new_year: Date,
    }

    impl CalendarService for FixedCalendar {
        fn lunar_to_solar(&self, _year: isize, _month: usize, day: usize) -> Result<Date, Error> {
            Ok(self.lunar_new_year + (day as isize - 1))
        }

        fn solar_to_lunar(&self, _date: Date) -> Result<LunarYmd, Error> {
            Err(Error::OutOfTableRange)
        }

        fn easter_sunday(&self, year: isize) -> Date {
            easter_sunday(year)
        }

        fn hijri_to_gregorian(&self, _y: isize, _m: usize, _d: usize) -> Result<Date, Error> {
            Err(Error::OutOfTableRange)
        }

        fn gregorian_to_hijri(&self, _date: Date) -> Result<HijriYmd, Error> {
            Err(Error::OutOfTableRange)
        }
    }

    #[test]
    fn conversion_failures_abort_the_query() {
        // SG's dataset contains Hijri rules; a failing service must surface.
        let engine = HolidayEngine::with_calendar(FixedCalendar {
            lunar_new_year: date("2025-01-29"),
        });
        assert_eq!(
            engine.is_holiday(Country::SG, date("2025-01-29")),
            Err(Error::OutOfTableRange)
        );
    }

    #[test]
    fn injected_calendar_drives_lunar_rules() {
        let engine = HolidayEngine::with_calendar(FixedCalendar {
            lunar_new_year: date("2025-01-29"),
        });
        // KR has no Hijri rules, so the pinned lunar answers are enough.
        assert!(engine.is_holiday(Country::KR, date("2025-01-29")).unwrap());
        assert!(engine.is_holiday(Country::KR, date("2025-01-28")).unwrap());
    }
}
