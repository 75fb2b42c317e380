use std::collections::BTreeMap;

use crate::convert::CalendarService;
use crate::country::Country;
use crate::date::{Date, Weekday};
use crate::project::project;
use crate::rule::{HolidayRule, RuleKind};
use crate::store::{self, CustomStore};
use crate::Error;

/// Separator for labels of independently colliding rules. A label containing
/// it marks a doubly booked date, which some substitute policies treat like a
/// holiday on a non-working day.
pub(crate) const MERGE_SEPARATOR: &str = " + ";

/// Every holiday of one country-year: date → label.
pub(crate) type HolidayMap = BTreeMap<Date, String>;

pub(crate) fn insert(map: &mut HolidayMap, date: Date, name: &str) {
    map.entry(date)
        .and_modify(|label| {
            label.push_str(MERGE_SEPARATOR);
            label.push_str(name);
        })
        .or_insert_with(|| name.to_string());
}

/// Projects every applicable base and custom rule of `country` into the
/// year's holiday map. Construction is all-or-nothing: any conversion
/// failure aborts the whole map.
pub(crate) fn build<C: CalendarService>(
    country: Country,
    year: isize,
    custom: &CustomStore,
    calendar: &C,
) -> Result<HolidayMap, Error> {
    let mut map = HolidayMap::new();

    let custom_rules: Vec<HolidayRule> = custom
        .for_country(country)
        .iter()
        .map(|it| it.as_rule())
        .collect();

    for rule in store::base_rules(country)?.iter().chain(custom_rules.iter()) {
        if !rule.applies_to(year) {
            continue;
        }

        match &rule.kind {
            RuleKind::ExplicitDateList { dates } => {
                for &date in dates {
                    insert(&mut map, date, &rule.name);
                }
            }
            RuleKind::HijriDate {
                hijri_month,
                hijri_day,
                approx_month,
                approx_day,
            } => {
                // A Hijri month/day is ambiguous across Hijri years; the
                // Gregorian estimate picks which one is meant.
                let anchor = Date::from_ymd(year, *approx_month, *approx_day);
                let hijri_year = calendar.gregorian_to_hijri(anchor)?.year;
                let date = calendar.hijri_to_gregorian(hijri_year, *hijri_month, *hijri_day)?;
                insert(&mut map, date, &rule.name);
            }
            RuleKind::LunarSpan => expand_lunar_span(&mut map, country, year, &rule.name, calendar)?,
            RuleKind::MovableFeast => expand_easter(&mut map, country, year, calendar),
            _ => {
                let date = project(rule, year, calendar)?;
                insert(&mut map, date, &rule.name);
            }
        }
    }

    Ok(map)
}

fn expand_lunar_span<C: CalendarService>(
    map: &mut HolidayMap,
    country: Country,
    year: isize,
    name: &str,
    calendar: &C,
) -> Result<(), Error> {
    let new_year = calendar.lunar_to_solar(year, 1, 1)?;

    match country {
        Country::KR => {
            let eve = format!("{name} 연휴");
            if new_year.weekday() == Weekday::Saturday {
                // The main label moves off the weekend boundary: Saturday and
                // Monday become holiday eves, Sunday carries the name.
                insert(map, new_year, &eve);
                insert(map, new_year + 1, name);
                insert(map, new_year + 2, &eve);
            } else {
                insert(map, new_year.pred(), &eve);
                insert(map, new_year, name);
                insert(map, new_year.succ(), &eve);
            }
        }
        Country::SG => {
            insert(map, new_year, name);
            insert(map, calendar.lunar_to_solar(year, 1, 2)?, name);
        }
        // Five-day festival span, two days on each side.
        _ => {
            for offset in -2..=2 {
                insert(map, new_year + offset, name);
            }
        }
    }

    Ok(())
}

fn expand_easter<C: CalendarService>(
    map: &mut HolidayMap,
    country: Country,
    year: isize,
    calendar: &C,
) {
    let easter = calendar.easter_sunday(year);

    match country {
        Country::AU => {
            insert(map, easter - 2, "Good Friday");
            insert(map, easter.pred(), "Easter Saturday");
            insert(map, easter, "Easter Sunday");
            insert(map, easter.succ(), "Easter Monday");
        }
        _ => {
            insert(map, easter - 2, "Good Friday");
        }
    }
}
