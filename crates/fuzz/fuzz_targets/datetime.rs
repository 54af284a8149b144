#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_cursor::DateTime;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(dt) = text.parse::<DateTime>() else {
        return;
    };
    let out = dt.to_string().parse::<DateTime>().unwrap();
    assert_eq!(dt, out);
});
