//! Tabular (civil) Islamic calendar conversion.
//!
//! Uses the arithmetic 30-year-cycle calendar with the civil epoch
//! (1 Muharram 1 AH = 16 July 622 CE, JDN 1948440). Gazetted observation
//! dates can differ by a day; rule data that needs exact gazetted dates uses
//! explicit date lists instead.

use crate::date::Date;
use crate::Error;

/// A date in the Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HijriYmd {
    pub year: isize,
    pub month: usize,
    pub day: usize,
}

const EPOCH_JDN: isize = 1_948_440;

/// Offset between a [`Date`]'s serial and its Julian day number.
const JDN_OF_UNIX_EPOCH: isize = 2_440_588;

const fn jdn(year: isize, month: usize, day: usize) -> isize {
    let m = month as isize;
    day as isize + ((m - 1) * 59 + 1) / 2 + (year - 1) * 354 + (3 + 11 * year) / 30 + EPOCH_JDN - 1
}

/// Gregorian date of a Hijri year/month/day.
pub fn hijri_to_gregorian(year: isize, month: usize, day: usize) -> Result<Date, Error> {
    if year < 1 || !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return Err(Error::OutOfTableRange);
    }
    Ok(Date(jdn(year, month, day) - JDN_OF_UNIX_EPOCH))
}

/// Hijri coordinates of a Gregorian date.
pub fn gregorian_to_hijri(date: Date) -> Result<HijriYmd, Error> {
    let j = date.0 + JDN_OF_UNIX_EPOCH;
    if j < EPOCH_JDN {
        return Err(Error::OutOfTableRange);
    }

    let mut year = (30 * (j - EPOCH_JDN) + 10646) / 10631;
    if jdn(year, 1, 1) > j {
        year -= 1;
    }

    let mut month = std::cmp::min(((2 * (j - jdn(year, 1, 1))) / 59 + 1) as usize, 12);
    while jdn(year, month, 1) > j {
        month -= 1;
    }
    while month < 12 && jdn(year, month + 1, 1) <= j {
        month += 1;
    }

    let day = (j - jdn(year, month, 1) + 1) as usize;

    Ok(HijriYmd { year, month, day })
}
