use super::*;

#[track_caller]
fn roundtrip(input: &str) {
    roundtrip_lossy(input, input);
}

#[track_caller]
fn roundtrip_lossy(input: &str, expected: &str) {
    let (amount, result) = DateTime::munch(input.as_bytes()).unwrap();
    assert_eq!(amount, input.len(), "consumed wrong amount for {input:?}");
    assert_eq!(result.to_string(), expected, "roundtrip mismatch for {input:?}");
}

#[track_caller]
fn expect_err(input: &str) {
    let result = DateTime::munch(input.as_bytes());
    assert!(result.is_none(), "expected error for {input:?}");
}

#[track_caller]
fn parse_ok(input: &str) -> (usize, DateTime) {
    DateTime::munch(input.as_bytes()).unwrap()
}

#[test]
fn roundtrips() {
    let exact = &[
        "1979-05-27T07:32:00Z",
        "1979-05-27T00:32:00-23:00",
        "2000-12-17T00:32:00.5-07:00",
        "1979-05-27T00:32:00.999999+21:20",
        "1979-05-27T07:32:00",
        "1979-05-27T07:32:00.5",
        "1979-05-27T07:32:00.999999999",
        "1979-05-27T07:32:00.123456789",
        "2023-06-15T12:30:45.123Z",
        "2023-06-15T12:30:45+23:59",
        "2023-06-15T12:30:45.5-00:01",
        "2023-01-01T00:00:00",
        "2023-01-01T23:59:59",
        "1979-05-27",
        "0000-01-01",
        "9999-12-31",
        "07:32:00",
        "00:32:00.5",
        "00:32:00.999999",
        "23:59:59",
        "12:30:45.1",
        "12:30:45.123456789",
        "0000-01-01T00:00:00Z",
        "9999-12-31T23:59:59.999999999+23:59",
        "2023-01-01T00:00:00.001",
        "2023-01-01T00:00:00.000000001",
        "2023-12-31T23:59:60Z",
    ];
    for input in exact {
        roundtrip(input);
    }

    let lossy: &[(&str, &str)] = &[
        ("1979-05-27 07:32:00Z", "1979-05-27T07:32:00Z"),
        ("1999-12-31 23:59:59.9", "1999-12-31T23:59:59.9"),
        ("1979-05-27T07:32:00+00:00", "1979-05-27T07:32:00Z"),
        ("1987-07-05t17:45:00z", "1987-07-05T17:45:00Z"),
        ("2023-01-01T00:00:00.100000000", "2023-01-01T00:00:00.1"),
        ("2023-01-01T00:00:00.000000000", "2023-01-01T00:00:00"),
        ("2023-01-01T00:00:00.1234567891111", "2023-01-01T00:00:00.123456789"),
    ];
    for (input, expected) in lossy {
        roundtrip_lossy(input, expected);
    }

    for d in 1..=9 {
        roundtrip(&format!("2023-01-01T00:00:00.{d}"));
    }
}

#[test]
fn fields_and_flags() {
    let (_, dt) = parse_ok("1979-05-27T07:32:00.25-07:30");
    assert_eq!(
        dt,
        DateTime {
            year: 1979,
            month: 5,
            day: 27,
            hour: 7,
            minute: 32,
            second: 0,
            nanos: 250_000_000,
            tz_offset_minutes: -450,
            has_date: true,
            has_time: true,
            has_offset: true,
        }
    );
    assert_eq!(dt.offset(), Some(-450));

    let (_, dt) = parse_ok("2023-06-15");
    assert!(dt.has_date && !dt.has_time && !dt.has_offset);
    assert_eq!(dt.offset(), None);

    let (_, dt) = parse_ok("12:30:00");
    assert!(!dt.has_date && dt.has_time && !dt.has_offset);

    let (_, dt) = parse_ok("2023-06-15T12:30:00Z");
    assert_eq!(dt.offset(), Some(0));
}

#[test]
fn rejects_invalid() {
    let cases: &[&str] = &[
        "",
        "1",
        "12:",
        "1979",
        "hello",
        "--:--",
        "2023-00-01",
        "2023-13-01",
        "2023-01-00",
        "2023-01-32",
        "2023-04-31",
        "2023-02-30",
        "2023/01/01",
        "20230101",
        "202-01-01",
        "2023-1-01",
        "2023-01-1",
        "2023-02-29",
        "1900-02-29",
        "24:00:00",
        "00:60:00",
        "00:00:61",
        // seconds are mandatory
        "07:32",
        "2023-06-15T12:30",
        "2023-06-15T12:30Z",
        "2023-06-15 12:30+05:30",
        // offsets need a date
        "07:32:00Z",
        "07:32:00-05:00",
        "12:00:00.5+00:00",
        "12:30:45.",
        "XX:00:00",
        "2023-06-15T",
        "2023-06-15T12:3",
        "2023-06-15T12:30:4",
        "2023-06-15T12:30:00+",
        "2023-06-15T12:30:00+05",
        "2023-06-15T12:30:00+05:3",
        "2023-06-15T12:30:00+24:00",
        "2023-06-15T12:30:00-01:99",
    ];
    for input in cases {
        expect_err(input);
    }
}

#[test]
fn trailing_data() {
    let cases: &[(&str, usize)] = &[
        ("2023-06-15hello", 10),
        ("2023-06-15 # comment", 10),
        ("12:30:45world", 8),
        ("2023-06-15T12:30:45stuff", 19),
        ("2023-06-15T12:30:45.123stuff", 23),
        ("2023-06-15T12:30:45Zstuff", 20),
        ("2023-06-15T12:30:45+05:30,next", 25),
    ];
    for (input, expected_consumed) in cases {
        let (consumed, _) = parse_ok(input);
        assert_eq!(consumed, *expected_consumed, "wrong consumed for {input:?}");
        assert!(DateTime::parse(input.as_bytes()).is_none());
    }
}

#[test]
fn from_str() {
    let dt: DateTime = "2024-02-29T12:00:00+05:30".parse().unwrap();
    assert_eq!((dt.month, dt.day, dt.tz_offset_minutes), (2, 29, 330));
    assert_eq!("2024-02-30".parse::<DateTime>(), Err(DateTimeParseError));
    assert_eq!(DateTimeParseError.to_string(), "invalid date-time");
}

#[test]
fn last_day_of_every_month() {
    let non_leap = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    for (m, &day) in non_leap.iter().enumerate() {
        let month = m + 1;
        roundtrip(&format!("2023-{month:02}-{day:02}"));
        expect_err(&format!("2023-{month:02}-{:02}", day + 1));
    }
    let leap = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    for (m, &day) in leap.iter().enumerate() {
        let month = m + 1;
        roundtrip(&format!("2024-{month:02}-{day:02}"));
        expect_err(&format!("2024-{month:02}-{:02}", day + 1));
    }
}

#[test]
fn leap_year_exhaustive() {
    fn is_leap_naive(y: u16) -> bool {
        (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
    }
    for y in 0..=9999 {
        assert_eq!(is_leap_year(y), is_leap_naive(y), "year {y}");
    }
}

#[test]
fn randomized_roundtrip_full_datetime() {
    let mut rng = oorandom::Rand32::new(3);
    for _ in 0..5000 {
        let year = (rng.rand_u32() % 10000) as u16;
        let month = (rng.rand_u32() % 12) as u8 + 1;
        let day = (rng.rand_u32() % days_in_month(year, month) as u32) as u8 + 1;
        let hour = rng.rand_u32() % 24;
        let minute = rng.rand_u32() % 60;
        let second = rng.rand_u32() % 60;

        let mut s = format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}");
        let digits = rng.rand_u32() % 10;
        if digits > 0 {
            // A non-zero last digit keeps the formatted width.
            let frac = (rng.rand_u32() % 10u32.pow(digits - 1)) * 10 + rng.rand_range(1..10);
            s += &format!(".{frac:0>width$}", width = digits as usize);
        }
        match rng.rand_u32() % 3 {
            0 => {}
            1 => s += "Z",
            _ => {
                let sign = if rng.rand_u32() % 2 == 0 { '+' } else { '-' };
                let oh = rng.rand_u32() % 24;
                let om = rng.rand_u32() % 59 + 1;
                s += &format!("{sign}{oh:02}:{om:02}");
            }
        }
        roundtrip(&s);
    }
}

#[test]
fn randomized_mutation_never_panics() {
    let mut rng = oorandom::Rand32::new(0xdeadbeaf);
    let valid = b"2023-06-15T12:30:45.123+05:30";
    for _ in 0..5000 {
        let mut mutated = *valid;
        let pos = rng.rand_u32() as usize % mutated.len();
        mutated[pos] = (rng.rand_u32() % 256) as u8;
        if let Some((len, _)) = DateTime::munch(&mutated) {
            assert!(len <= mutated.len());
        }
    }
}
