//! Polish public holidays, the non-working days used by the local data source.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::Holiday;

const FIXED: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (1, 6, "Epiphany"),
    (5, 1, "Labour Day"),
    (5, 3, "Constitution Day"),
    (8, 15, "Assumption Day"),
    (11, 1, "All Saints' Day"),
    (11, 11, "Independence Day"),
    (12, 25, "Christmas Day"),
    (12, 26, "Second Day of Christmas"),
];

/// Offsets in days from Easter Sunday.
const MOVABLE: &[(i64, &str)] = &[
    (0, "Easter Sunday"),
    (1, "Easter Monday"),
    (49, "Pentecost"),
    (60, "Corpus Christi"),
];

/// Easter Sunday, anonymous Gregorian algorithm.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let (b, c) = (year / 100, year % 100);
    let (d, e) = (b / 4, b % 4);
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let (i, k) = (c / 4, c % 4);
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).unwrap_or(NaiveDate::MIN)
}

/// All public holidays of `year`, sorted by date.
pub fn public_holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let easter = easter_sunday(year);
    let mut days: Vec<(NaiveDate, &'static str)> = FIXED
        .iter()
        .filter_map(|&(m, d, name)| NaiveDate::from_ymd_opt(year, m, d).map(|date| (date, name)))
        .chain(
            MOVABLE
                .iter()
                .map(|&(offset, name)| (easter + Duration::days(offset), name)),
        )
        .collect();
    days.sort_by_key(|(date, _)| *date);
    days
}

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    public_holidays(date.year())
        .into_iter()
        .find(|(d, _)| *d == date)
        .map(|(_, name)| name)
}

/// Holidays within `[start, end]`, inclusive on both ends.
pub fn holidays_between(start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
    if end < start {
        return Vec::new();
    }
    (start.year()..=end.year())
        .flat_map(public_holidays)
        .filter(|(date, _)| *date >= start && *date <= end)
        .map(|(date, name)| Holiday {
            date,
            name: name.to_string(),
        })
        .collect()
}
