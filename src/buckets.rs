use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_BUCKET_COUNT: usize = 12;
/// Two years of weeks. Larger requests are capped.
pub const MAX_BUCKET_COUNT: usize = 104;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Weekly,
    Monthly,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            other => Err(format!("unknown period '{other}'")),
        }
    }
}

/// A half-open `[start, end)` window with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl TimeBucket {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

pub fn generate_buckets(period: Period, count: usize) -> Vec<TimeBucket> {
    generate_buckets_at(Local::now().date_naive(), period, count)
}

/// Oldest first; the last bucket contains `today`.
///
/// `count` is capped at [`MAX_BUCKET_COUNT`]. Windows that would fall outside the
/// representable calendar are left out rather than wrapped.
pub fn generate_buckets_at(today: NaiveDate, period: Period, count: usize) -> Vec<TimeBucket> {
    let count = count.min(MAX_BUCKET_COUNT);
    match period {
        Period::Weekly => {
            let current = week_start(today);
            (0..count as i64)
                .rev()
                .filter_map(|offset| {
                    let start = current.checked_sub_signed(Duration::weeks(offset))?;
                    let end = start.checked_add_signed(Duration::days(7))?;
                    Some(TimeBucket {
                        start,
                        end,
                        label: week_label(start),
                    })
                })
                .collect()
        }
        Period::Monthly => {
            let current = today.year() * 12 + today.month0() as i32;
            (0..count as i32)
                .rev()
                .filter_map(|offset| {
                    let start = month_start(current - offset)?;
                    let end = month_start(current - offset + 1)?;
                    Some(TimeBucket {
                        start,
                        end,
                        label: month_label(start),
                    })
                })
                .collect()
        }
    }
}

pub fn generate_week_labels(period: Period, count: usize) -> Vec<String> {
    generate_buckets(period, count)
        .into_iter()
        .map(|bucket| bucket.label)
        .collect()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// `"Jan 13"`. Not unique across years, so never use it as a key.
pub fn week_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

fn month_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.year())
}

fn month_start(month_index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(month_index.div_euclid(12), month_index.rem_euclid(12) as u32 + 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_buckets_are_contiguous_mondays() {
        let today = ymd(2026, 1, 7);
        let buckets = generate_buckets_at(today, Period::Weekly, DEFAULT_BUCKET_COUNT);
        assert_eq!(buckets.len(), 12);
        assert!(buckets.iter().all(|b| b.start.weekday() == Weekday::Mon));
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
        let last = buckets.last().unwrap();
        assert_eq!(last.start, ymd(2026, 1, 5));
        assert!(last.contains(today));
        assert_eq!(last.label, "Jan 5");
    }

    #[test]
    fn sunday_rolls_back_six_days() {
        assert_eq!(week_start(ymd(2025, 1, 19)), ymd(2025, 1, 13));
        assert_eq!(week_start(ymd(2025, 1, 13)), ymd(2025, 1, 13));
    }

    #[test]
    fn weekly_buckets_span_year_boundary() {
        let buckets = generate_buckets_at(ymd(2026, 1, 2), Period::Weekly, 2);
        assert_eq!(buckets[0].start, ymd(2025, 12, 22));
        assert_eq!(buckets[1].start, ymd(2025, 12, 29));
        assert_eq!(buckets[1].label, "Dec 29");
    }

    #[test]
    fn monthly_buckets_end_with_current_month() {
        let buckets = generate_buckets_at(ymd(2026, 2, 14), Period::Monthly, 3);
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Dec 2025", "Jan 2026", "Feb 2026"]);
        assert_eq!(buckets[0].end, ymd(2026, 1, 1));
        assert_eq!(buckets[2].end, ymd(2026, 3, 1));
    }

    #[test]
    fn labels_follow_the_local_clock() {
        let labels = generate_week_labels(Period::Weekly, DEFAULT_BUCKET_COUNT);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[11], week_label(week_start(Local::now().date_naive())));
    }

    #[test]
    fn oversized_counts_are_capped() {
        let buckets = generate_buckets_at(ymd(2026, 1, 7), Period::Weekly, usize::MAX);
        assert_eq!(buckets.len(), MAX_BUCKET_COUNT);
        assert_eq!(buckets[MAX_BUCKET_COUNT - 1].start, ymd(2026, 1, 5));

        let months = generate_buckets_at(ymd(2026, 1, 7), Period::Monthly, usize::MAX);
        assert_eq!(months.len(), MAX_BUCKET_COUNT);
        assert_eq!(months[MAX_BUCKET_COUNT - 1].label, "Jan 2026");
    }

    #[test]
    fn calendar_floor_drops_unrepresentable_weeks() {
        let today = NaiveDate::MIN + Duration::days(30);
        let buckets = generate_buckets_at(today, Period::Weekly, MAX_BUCKET_COUNT);
        assert!(!buckets.is_empty());
        assert!(buckets.len() < MAX_BUCKET_COUNT);
        assert!(buckets.last().unwrap().contains(today));
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_buckets_at(ymd(2026, 1, 1), Period::Weekly, 0).is_empty());
    }

    #[test]
    fn period_parses_case_insensitively() {
        assert_eq!("Monthly".parse::<Period>(), Ok(Period::Monthly));
        assert_eq!("weekly".parse::<Period>(), Ok(Period::Weekly));
        assert!("daily".parse::<Period>().is_err());
    }
}
