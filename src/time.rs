//! RFC 3339 date-times as used by TOML.

use std::fmt;

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

/// A decoded TOML offset date-time, local date-time, local date or local
/// time.
///
/// Fields that the source did not specify are zero; use `has_date`,
/// `has_time` and `has_offset` to tell which parts were present. A `Z`
/// suffix is an offset of zero minutes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// `0..=60`, allowing a leap second.
    pub second: u8,
    /// Fractional seconds. Digits past the ninth are ignored.
    pub nanos: u32,
    pub tz_offset_minutes: i16,
    pub has_date: bool,
    pub has_time: bool,
    pub has_offset: bool,
}

/// Errors when a string is not a complete TOML date-time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTimeParseError;

impl fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid date-time")
    }
}

impl std::error::Error for DateTimeParseError {}

fn is_leap_year(year: u16) -> bool {
    (((year as u64 * 1073750999) as u32) & 3221352463) <= 126976
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

impl DateTime {
    /// Parses the date-time prefix of `input`, returning the number of bytes
    /// consumed.
    pub(crate) fn munch(input: &[u8]) -> Option<(usize, DateTime)> {
        enum State {
            Year,
            Month,
            Day,
            Hour,
            Minute,
            Second,
            Frac,
            OffHour,
            OffMin,
        }
        let mut state = match input {
            [_, _, b':', _, _, ..] => State::Hour,
            [_, _, _, _, b'-', _, _, b'-', ..] => State::Year,
            _ => return None,
        };

        let mut value = DateTime::default();
        let mut current = 0u32;
        let mut len = 0u32;
        let mut off_sign: i16 = 1;
        let mut off_hour: u8 = 0;
        let mut i = 0usize;
        let mut valid = false;

        'outer: loop {
            let byte = input.get(i).copied().unwrap_or(0);
            if byte.is_ascii_digit() {
                len += 1;
                if len <= 9 {
                    current = current * 10 + (byte - b'0') as u32;
                }
                i += 1;
                continue;
            }
            'next: {
                match state {
                    State::Year => {
                        if len != 4 || byte != b'-' {
                            break 'outer;
                        }
                        value.year = current as u16;
                        state = State::Month;
                        break 'next;
                    }
                    State::Month => {
                        let m = current as u8;
                        if len != 2 || byte != b'-' || m < 1 || m > 12 {
                            break 'outer;
                        }
                        value.month = m;
                        state = State::Day;
                        break 'next;
                    }
                    State::Day => {
                        let d = current as u8;
                        if len != 2 || d < 1 || d > days_in_month(value.year, value.month) {
                            break 'outer;
                        }
                        value.day = d;
                        value.has_date = true;
                        let time_follows = byte == b'T'
                            || byte == b't'
                            || (byte == b' '
                                && input.get(i + 1).is_some_and(|b| b.is_ascii_digit()));
                        if time_follows {
                            state = State::Hour;
                            break 'next;
                        }
                        valid = true;
                        break 'outer;
                    }
                    State::Hour => {
                        let h = current as u8;
                        if len != 2 || byte != b':' || h > 23 {
                            break 'outer;
                        }
                        value.hour = h;
                        state = State::Minute;
                        break 'next;
                    }
                    State::Minute => {
                        let m = current as u8;
                        if len != 2 || byte != b':' || m > 59 {
                            break 'outer;
                        }
                        value.minute = m;
                        state = State::Second;
                        break 'next;
                    }
                    State::Second => {
                        let s = current as u8;
                        if len != 2 || s > 60 {
                            break 'outer;
                        }
                        value.second = s;
                        value.has_time = true;
                        if byte == b'.' {
                            state = State::Frac;
                            break 'next;
                        }
                    }
                    State::Frac => {
                        if len == 0 {
                            break 'outer;
                        }
                        let mut nanos = current;
                        for _ in len.min(9)..9 {
                            nanos *= 10;
                        }
                        value.nanos = nanos;
                    }
                    State::OffHour => {
                        let h = current as u8;
                        if len != 2 || byte != b':' || h > 23 {
                            break 'outer;
                        }
                        off_hour = h;
                        state = State::OffMin;
                        break 'next;
                    }
                    State::OffMin => {
                        if len != 2 || current > 59 {
                            break 'outer;
                        }
                        value.tz_offset_minutes = off_sign * (off_hour as i16 * 60 + current as i16);
                        value.has_offset = true;
                        valid = true;
                        break 'outer;
                    }
                }
                // Seconds (and fraction) are done, an offset may follow.
                match byte {
                    b'Z' | b'z' => {
                        value.tz_offset_minutes = 0;
                        value.has_offset = true;
                        i += 1;
                        valid = true;
                        break 'outer;
                    }
                    b'+' => {
                        off_sign = 1;
                        state = State::OffHour;
                    }
                    b'-' => {
                        off_sign = -1;
                        state = State::OffHour;
                    }
                    _ => {
                        valid = true;
                        break 'outer;
                    }
                }
            }
            i += 1;
            current = 0;
            len = 0;
        }
        if !valid || (!value.has_date && value.has_offset) {
            return None;
        }
        Some((i, value))
    }

    /// Parses a complete TOML date-time.
    pub fn parse(input: &[u8]) -> Option<DateTime> {
        match DateTime::munch(input) {
            Some((len, value)) if len == input.len() => Some(value),
            _ => None,
        }
    }

    /// The offset from UTC in minutes, if one was given.
    pub fn offset(&self) -> Option<i16> {
        self.has_offset.then_some(self.tz_offset_minutes)
    }
}

impl std::str::FromStr for DateTime {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse(s.as_bytes()).ok_or(DateTimeParseError)
    }
}

impl fmt::Display for DateTime {
    /// Formats in RFC 3339 form with a `T` separator and `Z` for a zero
    /// offset. Trailing zeros of the fraction are dropped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_date {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
            if self.has_time {
                f.write_str("T")?;
            }
        }
        if !self.has_time {
            return Ok(());
        }
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanos != 0 {
            let mut nanos = self.nanos;
            let mut width = 9;
            while nanos % 10 == 0 {
                nanos /= 10;
                width -= 1;
            }
            write!(f, ".{nanos:0width$}")?;
        }
        if self.has_offset {
            match self.tz_offset_minutes {
                0 => f.write_str("Z")?,
                minutes => {
                    let sign = if minutes < 0 { '-' } else { '+' };
                    let abs = minutes.unsigned_abs();
                    write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)?;
                }
            }
        }
        Ok(())
    }
}
