use crate::builder::{HolidayMap, MERGE_SEPARATOR};
use crate::country::Country;
use crate::date::{Date, Weekday};
use crate::Error;

/// Cap on the forward walk. Real calendars resolve within a few days; hitting
/// the cap means the holiday map is corrupt.
const MAX_WALK: isize = 14;

/// Label marker of the Korean Lunar New Year block, which substitutes as a
/// unit rather than per day.
const LUNAR_SPAN_MARKER: &str = "설날";

/// Easter-span labels are exempt from substitution; the block already
/// occupies four consecutive days.
const EASTER_MARKERS: [&str; 2] = ["Easter", "Good Friday"];

/// How a country designates an observed day for a holiday that falls on a
/// non-working day. Resolved once per country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubstitutePolicy {
    /// Saturday observes the preceding Friday, Sunday the following Monday,
    /// with no further checks.
    Observed,
    /// Sunday shifts forward to the first day that is not already a holiday.
    SundayShift,
    /// Saturday and Sunday shift forward to the first weekday that is not a
    /// holiday; Easter-span entries are exempt.
    WeekendShift,
    /// Sunday shifts forward to the first clear weekday; Saturday holidays
    /// are not substituted.
    SundayWeekdayShift,
    /// Sunday entries and double-booked entries shift forward to the first
    /// clear weekday; the Lunar New Year block substitutes as a unit.
    CollisionShift,
    /// No substitute holidays.
    None,
}

impl SubstitutePolicy {
    pub(crate) fn of(country: Country) -> Self {
        match country {
            Country::US => SubstitutePolicy::Observed,
            Country::JP => SubstitutePolicy::SundayShift,
            Country::AU => SubstitutePolicy::WeekendShift,
            Country::SG => SubstitutePolicy::SundayWeekdayShift,
            Country::KR => SubstitutePolicy::CollisionShift,
            Country::TW => SubstitutePolicy::None,
        }
    }
}

/// The observed date for `date`'s holiday under `policy`, if the policy
/// yields one.
pub(crate) fn substitute_for(
    policy: SubstitutePolicy,
    map: &HolidayMap,
    date: Date,
) -> Result<Option<Date>, Error> {
    let weekday = date.weekday();

    match policy {
        SubstitutePolicy::None => Ok(None),

        SubstitutePolicy::Observed => Ok(match weekday {
            Weekday::Saturday => Some(date.pred()),
            Weekday::Sunday => Some(date.succ()),
            _ => None,
        }),

        SubstitutePolicy::SundayShift => {
            if weekday != Weekday::Sunday {
                return Ok(None);
            }
            // Walking starts on Monday, so later weekends cannot be reached
            // without passing a clear weekday first.
            first_clear_day(map, date.succ(), false).map(Some)
        }

        SubstitutePolicy::WeekendShift => {
            if let Some(label) = map.get(&date) {
                if EASTER_MARKERS.iter().any(|marker| label.contains(marker)) {
                    return Ok(None);
                }
            }
            if !weekday.is_weekend() {
                return Ok(None);
            }
            first_clear_day(map, date.succ(), true).map(Some)
        }

        SubstitutePolicy::SundayWeekdayShift => {
            if weekday != Weekday::Sunday {
                return Ok(None);
            }
            first_clear_day(map, date.succ(), true).map(Some)
        }

        SubstitutePolicy::CollisionShift => {
            let label = map.get(&date).map(String::as_str).unwrap_or_default();

            if label.contains(LUNAR_SPAN_MARKER) {
                let span: Vec<Date> = map
                    .iter()
                    .filter(|(_, name)| name.contains(LUNAR_SPAN_MARKER))
                    .map(|(&day, _)| day)
                    .collect();

                let has_sunday = span.iter().any(|it| it.weekday() == Weekday::Sunday);
                let is_last = span.last() == Some(&date);
                if has_sunday && is_last {
                    return first_clear_day(map, date.succ(), true).map(Some);
                }
                return Ok(None);
            }

            if weekday == Weekday::Sunday || label.contains(MERGE_SEPARATOR) {
                return first_clear_day(map, date.succ(), true).map(Some);
            }
            Ok(None)
        }
    }
}

/// First day at or after `start` that is not already a holiday and, when
/// `skip_weekends` is set, not a weekend.
fn first_clear_day(map: &HolidayMap, start: Date, skip_weekends: bool) -> Result<Date, Error> {
    let mut date = start;
    for _ in 0..MAX_WALK {
        let blocked = map.contains_key(&date) || (skip_weekends && date.weekday().is_weekend());
        if !blocked {
            return Ok(date);
        }
        date = date.succ();
    }
    Err(Error::SubstituteOverflow)
}
