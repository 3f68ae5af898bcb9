#![no_main]

use libfuzzer_sys::fuzz_target;
use lumine_changelog::{FilterCriteria, format_date, parse};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let entries = parse(text);
    for entry in &entries {
        let _ = format_date(&entry.date);
    }

    let criteria = FilterCriteria::default().with_query(text.lines().next().unwrap_or(""));
    let once = criteria.apply(&entries);
    assert_eq!(criteria.apply(&once), once);
});
