#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) isize,
);

impl Date {
    /// Builds a date from calendar components using pure serial arithmetic.
    ///
    /// Components are not range-checked: out-of-range days normalize forward
    /// (`from_ymd(y, 2, 30)` lands in early March). Parse with [`str::parse`]
    /// when the input needs validation.
    pub const fn from_ymd(year: isize, month: usize, day: usize) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let y = year;
        let m = month as isize;
        let d = day as isize;

        let adjusted_year = y - if m <= 2 { 1 } else { 0 };

        let era = if adjusted_year >= 0 {
            adjusted_year / 400
        } else {
            (adjusted_year - 399) / 400
        };

        let year_of_era = adjusted_year - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        let days_since_julian = era * 146097 + day_of_era;

        Self(days_since_julian - 719163)
    }

    pub const fn ymd(&self) -> (isize, usize, usize) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let julian_day = self.0 + 719163;
        let shifted = julian_day + 32044;

        let era = (4 * shifted + 3) / 146097;
        let day_of_era = shifted - (146097 * era) / 4;
        let year_of_era = (4 * day_of_era + 3) / 1461;
        let day_of_year = day_of_era - (1461 * year_of_era) / 4;
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = (month_part + 3 - 1) % 12 + 1;
        let year = 100 * era + year_of_era - 4800 + (month_part + 3) / 12;

        (year, month as usize, day as usize)
    }

    /// Day of the month
    #[inline]
    pub const fn day(&self) -> usize {
        self.ymd().2
    }

    /// Month of the year
    #[inline]
    pub const fn month(&self) -> usize {
        self.ymd().1
    }

    /// Year
    #[inline]
    pub const fn year(&self) -> isize {
        self.ymd().0
    }

    pub const fn weekday(&self) -> Weekday {
        // Day 0 of the epoch scale (1970-01-01) was a Thursday.
        match (self.0 + 4).rem_euclid(7) {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    #[inline]
    pub const fn succ(&self) -> Self {
        Date(self.0 + 1)
    }

    #[inline]
    pub const fn pred(&self) -> Self {
        Date(self.0 - 1)
    }

    pub const fn days_since(&self, other: &Self) -> isize {
        self.0 - other.0
    }
}

impl std::ops::Add<isize> for Date {
    type Output = Date;

    #[inline]
    fn add(self, days: isize) -> Date {
        Date(self.0 + days)
    }
}

impl std::ops::Sub<isize> for Date {
    type Output = Date;

    #[inline]
    fn sub(self, days: isize) -> Date {
        Date(self.0 - days)
    }
}

pub(crate) const fn is_leap_year(year: isize) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) const fn days_in_month(year: isize, month: usize) -> usize {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

impl std::str::FromStr for Date {
    type Err = crate::Error;

    /// Parses a `YYYY-MM-DD` date, rejecting out-of-range components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let year: isize = parts
            .next()
            .and_then(|it| it.parse().ok())
            .ok_or(crate::Error::InvalidDate)?;
        let month: usize = parts
            .next()
            .and_then(|it| it.parse().ok())
            .ok_or(crate::Error::InvalidDate)?;
        let day: usize = parts
            .next()
            .and_then(|it| it.parse().ok())
            .ok_or(crate::Error::InvalidDate)?;

        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(crate::Error::InvalidDate);
        }

        Ok(Date::from_ymd(year, month, day))
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

/// Day of the week, numbered 1 = Monday … 7 = Sunday in rule data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 1 = Monday … 7 = Sunday.
    pub const fn ordinal(self) -> usize {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    /// 0 = Sunday … 6 = Saturday, the scale the projection formulas use.
    pub(crate) const fn sunday0(self) -> isize {
        (self.ordinal() % 7) as isize
    }

    pub const fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = crate::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            7 => Weekday::Sunday,
            _ => return Err(crate::Error::InvalidDate),
        })
    }
}

const SECONDS_IN_DAY: isize = 86400;

impl TryFrom<Date> for std::time::SystemTime {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        if value.0 > u64::MAX as isize / SECONDS_IN_DAY {
            return Err(crate::Error::DateTooLarge);
        }
        Ok(std::time::SystemTime::UNIX_EPOCH
            + std::time::Duration::from_secs(value.0 as u64 * SECONDS_IN_DAY as u64))
    }
}

impl From<std::time::SystemTime> for Date {
    fn from(value: std::time::SystemTime) -> Self {
        let days = match value.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => duration.as_secs() as isize / SECONDS_IN_DAY,
            Err(err) => -(err.duration().as_secs() as isize / SECONDS_IN_DAY),
        };

        Date(days)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        if value.0 > i32::MAX as isize - 719163 {
            return Err(crate::Error::DateTooLarge);
        }
        chrono::NaiveDate::from_num_days_from_ce_opt(value.0 as i32 + 719163)
            .ok_or(crate::Error::DateTooLarge)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let days = value.signed_duration_since(epoch).num_days();
        Date(days as isize)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Date::from(value.date_naive())
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Local>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Local>) -> Self {
        Date::from(value.naive_local().date())
    }
}

#[cfg(feature = "time")]
impl TryFrom<Date> for time::Date {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let julian = value.0.checked_add(2_440_588).ok_or(crate::Error::DateTooLarge)?;
        let julian = i32::try_from(julian).map_err(|_| crate::Error::DateTooLarge)?;
        time::Date::from_julian_day(julian).map_err(|_| crate::Error::DateTooLarge)
    }
}

#[cfg(feature = "time")]
impl From<time::Date> for Date {
    fn from(value: time::Date) -> Self {
        Date(value.to_julian_day() as isize - 2_440_588)
    }
}
