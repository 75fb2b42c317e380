use serde::Deserialize;

use crate::date::{Date, Weekday};
use crate::Error;

/// A declarative description of how a holiday's date(s) derive for any year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct HolidayRule {
    /// Display label. Not unique; colliding rules merge labels.
    pub name: String,
    pub kind: RuleKind,
    /// When `false`, the rule only applies in [`HolidayRule::year`].
    pub recurring: bool,
    pub year: Option<isize>,
}

/// How a rule's concrete date(s) are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Same Gregorian month/day every year.
    FixedDate { month: usize, day: usize },
    /// Nth weekday of a month; `ordinal` −1 selects the last occurrence.
    NthWeekday {
        month: usize,
        weekday: Weekday,
        ordinal: i32,
    },
    /// A lunisolar month/day, resolved per Gregorian year.
    LunarDate { lunar_month: usize, lunar_day: usize },
    /// Easter-anchored; expanded into a country-specific span.
    MovableFeast,
    /// A Hijri month/day. The Gregorian approximation only picks which Hijri
    /// year to resolve against; the Hijri fields produce the actual date.
    HijriDate {
        hijri_month: usize,
        hijri_day: usize,
        approx_month: usize,
        approx_day: usize,
    },
    /// Lunar New Year, expanded into a country-specific multi-day span.
    LunarSpan,
    /// A fixed list of dates, for holidays no formula generates reliably.
    ExplicitDateList { dates: Vec<Date> },
}

/// Wire schema of the per-country rule datasets.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    month: Option<usize>,
    day: Option<usize>,
    weekday: Option<u8>,
    ordinal: Option<i32>,
    lunar_month: Option<usize>,
    lunar_day: Option<usize>,
    hijri_month: Option<usize>,
    hijri_day: Option<usize>,
    approx_month: Option<usize>,
    approx_day: Option<usize>,
    recurring: Option<bool>,
    year: Option<isize>,
    dates: Option<Vec<String>>,
}

impl RawRule {
    fn field(field: Option<usize>, name: &str, rule: &str) -> Result<usize, Error> {
        field.ok_or_else(|| Error::MalformedDataset(format!("rule {rule:?} is missing {name:?}")))
    }
}

impl TryFrom<RawRule> for HolidayRule {
    type Error = Error;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "fixed" => RuleKind::FixedDate {
                month: RawRule::field(raw.month, "month", &raw.name)?,
                day: RawRule::field(raw.day, "day", &raw.name)?,
            },
            "weekday" => RuleKind::NthWeekday {
                month: RawRule::field(raw.month, "month", &raw.name)?,
                weekday: raw
                    .weekday
                    .ok_or_else(|| {
                        Error::MalformedDataset(format!("rule {:?} is missing \"weekday\"", raw.name))
                    })
                    .and_then(Weekday::try_from)?,
                ordinal: raw.ordinal.ok_or_else(|| {
                    Error::MalformedDataset(format!("rule {:?} is missing \"ordinal\"", raw.name))
                })?,
            },
            "lunar" => RuleKind::LunarDate {
                lunar_month: RawRule::field(raw.lunar_month, "lunarMonth", &raw.name)?,
                lunar_day: RawRule::field(raw.lunar_day, "lunarDay", &raw.name)?,
            },
            "easter" => RuleKind::MovableFeast,
            "hijri" => RuleKind::HijriDate {
                hijri_month: RawRule::field(raw.hijri_month, "hijriMonth", &raw.name)?,
                hijri_day: RawRule::field(raw.hijri_day, "hijriDay", &raw.name)?,
                approx_month: RawRule::field(raw.approx_month, "approxMonth", &raw.name)?,
                approx_day: RawRule::field(raw.approx_day, "approxDay", &raw.name)?,
            },
            "lunar-year" => RuleKind::LunarSpan,
            "data" => RuleKind::ExplicitDateList {
                dates: raw
                    .dates
                    .unwrap_or_default()
                    .iter()
                    .map(|it| it.parse())
                    .collect::<Result<_, _>>()?,
            },
            other => {
                return Err(Error::MalformedDataset(format!(
                    "rule {:?} has unknown type {other:?}",
                    raw.name
                )))
            }
        };

        let recurring = raw.recurring.unwrap_or(true);
        if !recurring && raw.year.is_none() {
            return Err(Error::MissingYear);
        }

        Ok(HolidayRule {
            name: raw.name,
            kind,
            recurring,
            year: raw.year,
        })
    }
}

impl HolidayRule {
    /// Whether this rule contributes dates to `year`.
    pub(crate) fn applies_to(&self, year: isize) -> bool {
        self.recurring || self.year == Some(year)
    }
}

/// A user-supplied holiday, always fixed-date, layered over a country's base
/// rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomHoliday {
    pub name: String,
    pub month: usize,
    pub day: usize,
    /// `false` pins the holiday to [`CustomHoliday::year`] alone.
    pub recurring: bool,
    pub year: Option<isize>,
    /// When `false`, the country's substitute-holiday policy ignores this
    /// entry.
    pub substitute: bool,
}

impl CustomHoliday {
    /// A recurring custom holiday with the substitute policy applied, the
    /// defaults the original configuration surface used.
    pub fn new(name: impl Into<String>, month: usize, day: usize) -> Self {
        CustomHoliday {
            name: name.into(),
            month,
            day,
            recurring: true,
            year: None,
            substitute: true,
        }
    }

    /// Restricts the holiday to a single Gregorian year.
    pub fn once(mut self, year: isize) -> Self {
        self.recurring = false;
        self.year = Some(year);
        self
    }

    /// Opts this entry out of the country's substitute-holiday policy.
    pub fn without_substitute(mut self) -> Self {
        self.substitute = false;
        self
    }

    pub(crate) fn applies_to(&self, year: isize) -> bool {
        self.recurring || self.year == Some(year)
    }

    /// The rule equivalent the map builder projects; custom holidays are
    /// fixed-date by construction.
    pub(crate) fn as_rule(&self) -> HolidayRule {
        HolidayRule {
            name: self.name.clone(),
            kind: RuleKind::FixedDate {
                month: self.month,
                day: self.day,
            },
            recurring: self.recurring,
            year: self.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_rule() {
        let rule: HolidayRule =
            serde_json::from_str(r#"{"name": "New Year's Day", "type": "fixed", "month": 1, "day": 1}"#)
                .unwrap();
        assert_eq!(rule.kind, RuleKind::FixedDate { month: 1, day: 1 });
        assert!(rule.recurring);
        assert_eq!(rule.year, None);
    }

    #[test]
    fn parses_weekday_rule() {
        let rule: HolidayRule = serde_json::from_str(
            r#"{"name": "Thanksgiving Day", "type": "weekday", "month": 11, "weekday": 4, "ordinal": 4}"#,
        )
        .unwrap();
        assert_eq!(
            rule.kind,
            RuleKind::NthWeekday {
                month: 11,
                weekday: Weekday::Thursday,
                ordinal: 4
            }
        );
    }

    #[test]
    fn parses_explicit_date_list() {
        let rule: HolidayRule = serde_json::from_str(
            r#"{"name": "Deepavali", "type": "data", "dates": ["2024-10-31", "2025-10-20"]}"#,
        )
        .unwrap();
        assert_eq!(
            rule.kind,
            RuleKind::ExplicitDateList {
                dates: vec![Date::from_ymd(2024, 10, 31), Date::from_ymd(2025, 10, 20)]
            }
        );
    }

    #[test]
    fn one_shot_rule_requires_year() {
        let result: Result<HolidayRule, _> = serde_json::from_str(
            r#"{"name": "Oops", "type": "fixed", "month": 6, "day": 12, "recurring": false}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_field_is_reported() {
        let result: Result<HolidayRule, _> =
            serde_json::from_str(r#"{"name": "Broken", "type": "fixed", "month": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn recurring_filter() {
        let rule: HolidayRule = serde_json::from_str(
            r#"{"name": "Once", "type": "fixed", "month": 6, "day": 12, "recurring": false, "year": 2025}"#,
        )
        .unwrap();
        assert!(rule.applies_to(2025));
        assert!(!rule.applies_to(2024));
        assert!(!rule.applies_to(2026));
    }

    #[test]
    fn custom_holiday_defaults() {
        let custom = CustomHoliday::new("창립기념일", 6, 3);
        assert!(custom.recurring);
        assert!(custom.substitute);
        assert_eq!(custom.year, None);

        let pinned = CustomHoliday::new("특별일", 6, 12).once(2025);
        assert!(!pinned.recurring);
        assert_eq!(pinned.year, Some(2025));
        assert!(pinned.applies_to(2025));
        assert!(!pinned.applies_to(2026));
    }
}
