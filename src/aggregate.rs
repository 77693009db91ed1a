use crate::buckets::TimeBucket;
use crate::dates::{parse_date, parse_week_start};
use crate::models::{AggregatedSeries, Campaign, ChartData, OrdersPayload, SeriesKind};
use crate::sources::Region;
use chrono::NaiveDate;
use std::cmp::Ordering;

pub const DEFAULT_TOP_CAMPAIGNS: usize = 5;

/// Sums `adCount` per bucket across every daily record of every order.
///
/// Records whose date does not parse are dropped; buckets with nothing in them stay at zero.
pub fn aggregate_by_week(payloads: &[&OrdersPayload], buckets: &[TimeBucket]) -> Vec<u64> {
    let mut airings: Vec<(NaiveDate, u64)> = payloads
        .iter()
        .flat_map(|payload| payload.orders.iter())
        .flat_map(|order| order.daily_breakdown.iter())
        .filter_map(|day| parse_date(&day.date).map(|date| (date, day.ad_count)))
        .collect();
    airings.sort_by_key(|(date, _)| *date);

    buckets
        .iter()
        .map(|bucket| {
            airings
                .iter()
                .filter(|(date, _)| bucket.contains(*date))
                .fold(0u64, |sum, (_, count)| sum.saturating_add(*count))
        })
        .collect()
}

/// One spend series per top-spending campaign, aligned to `buckets`.
///
/// Weekly entries land in the bucket containing their week-start date. A later entry for
/// the same bucket replaces an earlier one; entries outside every bucket are dropped.
pub fn build_campaign_series(
    campaigns: &[Campaign],
    buckets: &[TimeBucket],
    top_n: usize,
    platform: &str,
) -> Vec<AggregatedSeries> {
    let mut ranked: Vec<&Campaign> = campaigns.iter().collect();
    ranked.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .take(top_n)
        .map(|campaign| {
            let mut points = vec![0.0; buckets.len()];
            for entry in &campaign.weekly_breakdown {
                let Some(week) = parse_week_start(&entry.week) else {
                    continue;
                };
                if let Some(index) = buckets.iter().position(|bucket| bucket.contains(week)) {
                    points[index] = entry.spend;
                }
            }
            AggregatedSeries {
                name: series_name(platform, &campaign.name),
                kind: SeriesKind::Column,
                points,
            }
        })
        .collect()
}

/// Payloads fetched for one broadcast region. `None` marks a station that failed or is missing.
#[derive(Debug, Clone)]
pub struct RegionPayloads {
    pub region: Region,
    pub stations: Vec<Option<OrdersPayload>>,
}

impl RegionPayloads {
    fn present(&self) -> Vec<&OrdersPayload> {
        self.stations.iter().flatten().collect()
    }
}

/// Builds the overview grid: Google columns, then Meta columns, then one line per region.
pub fn assemble_chart_data(
    google: Option<&[Campaign]>,
    meta: Option<&[Campaign]>,
    regions: &[RegionPayloads],
    buckets: &[TimeBucket],
    top_n: usize,
) -> ChartData {
    let mut series = Vec::new();
    if let Some(campaigns) = google {
        series.extend(build_campaign_series(campaigns, buckets, top_n, "Google Ads"));
    }
    if let Some(campaigns) = meta {
        series.extend(build_campaign_series(campaigns, buckets, top_n, "Meta Ads"));
    }

    let mut ordered: Vec<&RegionPayloads> = regions.iter().collect();
    ordered.sort_by_key(|entry| entry.region);
    for entry in ordered {
        let present = entry.present();
        if present.is_empty() {
            continue;
        }
        let totals = aggregate_by_week(&present, buckets);
        series.push(AggregatedSeries {
            name: entry.region.series_name().to_string(),
            kind: SeriesKind::Line,
            points: totals.into_iter().map(|total| total as f64).collect(),
        });
    }

    ChartData {
        week_labels: buckets.iter().map(|bucket| bucket.label.clone()).collect(),
        series,
    }
}

fn series_name(platform: &str, campaign: &str) -> String {
    if campaign.trim().is_empty() {
        platform.to_string()
    } else {
        format!("{platform}: {campaign}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::{generate_buckets_at, Period};
    use crate::models::{CampaignsPayload, DailyRecord, Order, WeeklySpend};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload(days: &[(&str, u64)]) -> OrdersPayload {
        OrdersPayload {
            orders: vec![Order {
                order_number: "A-1".into(),
                total_ads: days.iter().map(|(_, count)| count).sum(),
                daily_breakdown: days
                    .iter()
                    .map(|(date, count)| DailyRecord {
                        date: date.to_string(),
                        ad_count: *count,
                        ad_ids: Vec::new(),
                    })
                    .collect(),
                ..Order::default()
            }],
        }
    }

    fn campaign(name: &str, spend: f64, weeks: &[(&str, f64)]) -> Campaign {
        Campaign {
            id: name.to_lowercase(),
            name: name.into(),
            spend,
            weekly_breakdown: weeks
                .iter()
                .map(|(week, spend)| WeeklySpend { week: week.to_string(), spend: *spend })
                .collect(),
            ..Campaign::default()
        }
    }

    #[test]
    fn same_week_records_sum_across_orders() {
        let today = ymd(2025, 1, 3);
        let buckets = generate_buckets_at(today, Period::Weekly, 12);
        let first = payload(&[("01/01/25", 3)]);
        let second = payload(&[("01/01/25", 2)]);

        let totals = aggregate_by_week(&[&first, &second], &buckets);
        assert_eq!(totals.len(), 12);
        assert_eq!(totals[11], 5);
        assert_eq!(totals.iter().sum::<u64>(), 5);
    }

    #[test]
    fn empty_input_yields_all_zero_buckets() {
        let buckets = generate_buckets_at(ymd(2025, 1, 3), Period::Weekly, 12);
        assert_eq!(aggregate_by_week(&[], &buckets), vec![0; 12]);
    }

    #[test]
    fn malformed_dates_are_dropped() {
        let buckets = generate_buckets_at(ymd(2025, 1, 3), Period::Weekly, 4);
        let data = payload(&[("13/40/24", 9), ("N/A", 4), ("12/30/24", 1), ("12/23/24", 2)]);
        assert_eq!(aggregate_by_week(&[&data], &buckets), vec![0, 0, 2, 1]);
    }

    #[test]
    fn bucket_end_is_exclusive() {
        let buckets = generate_buckets_at(ymd(2025, 1, 15), Period::Weekly, 2);
        // Mon Jan 6 and Sun Jan 12 are in the first bucket, Mon Jan 13 starts the second.
        let data = payload(&[("01/06/25", 1), ("01/12/25", 1), ("01/13/25", 7)]);
        assert_eq!(aggregate_by_week(&[&data], &buckets), vec![2, 7]);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let buckets = generate_buckets_at(ymd(2025, 3, 1), Period::Weekly, 12);
        let data = payload(&[("02/10/25", 4), ("02/27/25", 6)]);
        assert_eq!(aggregate_by_week(&[&data], &buckets), aggregate_by_week(&[&data], &buckets));
    }

    #[test]
    fn campaign_spend_lands_on_its_week() {
        let buckets = generate_buckets_at(ymd(2025, 1, 15), Period::Weekly, 4);
        let index = buckets.iter().position(|b| b.label == "Jan 13").unwrap();
        let series = build_campaign_series(
            &[campaign("Brand", 100.0, &[("2025-01-13", 100.0)])],
            &buckets,
            DEFAULT_TOP_CAMPAIGNS,
            "Google Ads",
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points.len(), 4);
        assert_eq!(series[0].points[index], 100.0);
        assert_eq!(series[0].points.iter().sum::<f64>(), 100.0);
        assert_eq!(series[0].name, "Google Ads: Brand");
    }

    #[test]
    fn campaign_weeks_a_year_apart_do_not_collide() {
        let buckets = generate_buckets_at(ymd(2025, 1, 15), Period::Weekly, 4);
        let series = build_campaign_series(
            &[campaign("Brand", 1.0, &[("2024-01-15", 50.0), ("2025-01-13", 10.0), ("bogus", 3.0)])],
            &buckets,
            5,
            "Google Ads",
        );
        assert_eq!(series[0].points, vec![0.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn duplicate_weeks_keep_last_value() {
        let buckets = generate_buckets_at(ymd(2025, 1, 15), Period::Weekly, 1);
        let series = build_campaign_series(
            &[campaign("Brand", 1.0, &[("2025-01-13", 10.0), ("2025-01-15", 25.0)])],
            &buckets,
            5,
            "Meta Ads",
        );
        assert_eq!(series[0].points, vec![25.0]);
    }

    #[test]
    fn only_top_spenders_are_charted() {
        let buckets = generate_buckets_at(ymd(2025, 1, 15), Period::Weekly, 2);
        let campaigns: Vec<_> = (0..7).map(|i| campaign(&format!("C{i}"), i as f64, &[])).collect();
        let series = build_campaign_series(&campaigns, &buckets, 5, "Google Ads");
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["Google Ads: C6", "Google Ads: C5", "Google Ads: C4", "Google Ads: C3", "Google Ads: C2"]
        );
    }

    #[test]
    fn monthly_buckets_sum_whole_months() {
        let buckets = generate_buckets_at(ymd(2025, 3, 10), Period::Monthly, 3);
        // Jan 31 closes January, Feb 1 and Feb 28 bracket February, Mar 1 opens March.
        let data = payload(&[("01/31/25", 1), ("02/01/25", 2), ("02/28/25", 3), ("03/01/25", 4), ("12/31/24", 9)]);
        assert_eq!(aggregate_by_week(&[&data], &buckets), vec![1, 5, 4]);
    }

    #[test]
    fn monthly_campaign_spend_lands_on_its_month() {
        let buckets = generate_buckets_at(ymd(2025, 3, 10), Period::Monthly, 3);
        let series = build_campaign_series(
            &[campaign("Brand", 10.0, &[("2025-02-03", 40.0), ("2025-03-03", 15.0), ("2024-12-30", 7.0)])],
            &buckets,
            5,
            "Google Ads",
        );
        assert_eq!(series[0].points, vec![0.0, 40.0, 15.0]);
    }

    #[test]
    fn one_bad_campaign_leaves_the_rest_charted() {
        let payload: CampaignsPayload = serde_json::from_value(serde_json::json!({
            "campaigns": [
                { "id": 1, "name": "Brand", "spend": "100.00", "weeklyBreakdown": [{ "week": "2025-01-13", "spend": 60 }] },
                { "id": 2, "name": "Broken", "spend": { "amount": 5 } }
            ]
        }))
        .unwrap();
        let buckets = generate_buckets_at(ymd(2025, 1, 15), Period::Weekly, 2);

        let series = build_campaign_series(&payload.campaigns, &buckets, 5, "Google Ads");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Google Ads: Brand");
        assert_eq!(series[0].points, vec![0.0, 60.0]);
    }

    #[test]
    fn absent_regions_are_omitted() {
        let buckets = generate_buckets_at(ymd(2025, 1, 3), Period::Weekly, 12);
        let regions = vec![
            RegionPayloads { region: Region::Albany, stations: vec![None, None] },
            RegionPayloads {
                region: Region::SyracuseRochester,
                stations: vec![Some(payload(&[("01/01/25", 3)])), None, Some(payload(&[("01/02/25", 2)]))],
            },
            RegionPayloads { region: Region::MontrealPlattsburgh, stations: Vec::new() },
        ];
        let google = [campaign("Search", 10.0, &[])];

        let chart = assemble_chart_data(Some(&google), None, &regions, &buckets, 5);
        assert_eq!(chart.week_labels.len(), 12);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].kind, SeriesKind::Column);
        assert_eq!(chart.series[1].name, "Syracuse/Rochester Ads");
        assert_eq!(chart.series[1].points[11], 5.0);
        assert!(chart.series.iter().all(|s| s.points.len() == chart.week_labels.len()));
    }
}
