use chrono::{Datelike, NaiveDate};

const DISPLAY_MONTHS: [&str; 12] = [
    "Jan.", "Feb.", "Mar.", "Apr.", "May", "June", "July", "Aug.", "Sept.", "Oct.", "Nov.", "Dec.",
];

/// Parses a broadcast-log date in `MM/DD/YY` form.
///
/// Two-digit years pivot at 50: `50..=99` land in the 1900s, `00..=49` in the 2000s.
/// Sentinels (`""`, `"N/A"`, `"-"`) and impossible dates yield `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if is_sentinel(raw) {
        return None;
    }

    let mut parts = raw.split('/');
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let year_part = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let year = year_part.parse::<i32>().ok()?;
    let full_year = if year_part.len() <= 2 {
        if year >= 50 { 1900 + year } else { 2000 + year }
    } else {
        year
    };

    NaiveDate::from_ymd_opt(full_year, month, day)
}

/// Parses an ad-platform week key (`YYYY-MM-DD`), falling back to `MM/DD/YY`.
pub fn parse_week_start(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_date(raw))
}

/// `"01/08/24"` -> `"Jan. 8th 2024"`. Anything unparseable is returned as given.
pub fn format_display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => {
            let day = date.day();
            format!(
                "{} {}{} {}",
                DISPLAY_MONTHS[date.month0() as usize],
                day,
                ordinal_suffix(day),
                date.year()
            )
        }
        None => raw.to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

fn is_sentinel(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("n/a") || raw == "-"
}
