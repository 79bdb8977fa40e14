use chrono::NaiveDate;

/// A closed interval of calendar dates walked one day at a time.
///
/// An inverted range (`start > end`) is not an error; it simply yields
/// nothing. Nothing bounds the length of the range, so a multi-year interval
/// produces a correspondingly large number of output directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days the range will yield.
    pub fn len(self: &Self) -> u64 {
        if self.start > self.end {
            return 0;
        }
        (self.end - self.start).num_days() as u64 + 1
    }

    pub fn is_empty(self: &Self) -> bool {
        self.start > self.end
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        Iter { cursor: Some(self.start), end: self.end }
    }
}

pub struct Iter {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Iter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.cursor?;
        if day > self.end {
            return None;
        }
        // succ_opt is None only at the end of representable time.
        self.cursor = day.succ_opt();
        Some(day)
    }
}

/// Parse a date given in one of the common human-readable formats,
/// discarding any notion of time-of-day.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d %Y", "%d %b %Y"];

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), format) {
            return Ok(date);
        }
    }
    Err(format!(
        "'{}' is not a recognized date; try e.g. 2020-12-25 or 'Dec 25 2020'",
        s
    ))
}
