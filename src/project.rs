use crate::convert::CalendarService;
use crate::date::{days_in_month, Date, Weekday};
use crate::rule::{HolidayRule, RuleKind};
use crate::Error;

/// Resolves a directly projectable rule to its date in `year`.
///
/// Total for fixed-date, nth-weekday and lunisolar rules. Every other kind is
/// resolved by a span expander in the map builder and is rejected here with
/// [`Error::UnsupportedProjection`].
pub(crate) fn project<C: CalendarService>(
    rule: &HolidayRule,
    year: isize,
    calendar: &C,
) -> Result<Date, Error> {
    match rule.kind {
        RuleKind::FixedDate { month, day } => Ok(Date::from_ymd(year, month, day)),
        RuleKind::NthWeekday {
            month,
            weekday,
            ordinal,
        } => nth_weekday(year, month, weekday, ordinal),
        RuleKind::LunarDate {
            lunar_month,
            lunar_day,
        } => calendar.lunar_to_solar(year, lunar_month, lunar_day),
        RuleKind::MovableFeast
        | RuleKind::HijriDate { .. }
        | RuleKind::LunarSpan
        | RuleKind::ExplicitDateList { .. } => Err(Error::UnsupportedProjection),
    }
}

/// Nth occurrence of a weekday in a month; `ordinal` −1 selects the last.
fn nth_weekday(year: isize, month: usize, weekday: Weekday, ordinal: i32) -> Result<Date, Error> {
    let target = weekday.sunday0();

    if ordinal > 0 {
        let first = Date::from_ymd(year, month, 1);
        let lag = (target - first.weekday().sunday0()).rem_euclid(7);
        let day = 1 + lag as usize + (ordinal as usize - 1) * 7;
        Ok(Date::from_ymd(year, month, day))
    } else if ordinal == -1 {
        let last_day = days_in_month(year, month);
        let last = Date::from_ymd(year, month, last_day);
        let lag = (last.weekday().sunday0() - target).rem_euclid(7);
        Ok(Date::from_ymd(year, month, last_day - lag as usize))
    } else {
        Err(Error::MalformedDataset(format!(
            "weekday rule ordinal {ordinal} is not positive or -1"
        )))
    }
}
