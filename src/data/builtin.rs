//! Built-in snapshot rendered when no data file is given.

use super::model::*;

fn point(date: &str, dau: u64, mrr: f64) -> TimeSeriesPoint {
    TimeSeriesPoint {
        date: date.to_string(),
        dau,
        mrr,
    }
}

fn cohort(label: &str, observed: &[f64]) -> CohortRow {
    let mut weekly_retention = [None; COHORT_WEEKS];
    for (slot, value) in weekly_retention.iter_mut().zip(observed) {
        *slot = Some(*value);
    }
    CohortRow {
        cohort: label.to_string(),
        weekly_retention,
    }
}

fn query(query: &str, calls: u64, avg_latency_ms: f64, error_rate: f64) -> QueryStat {
    QueryStat {
        query: query.to_string(),
        calls,
        avg_latency_ms,
        error_rate,
    }
}

fn tag(tag: &str, count: u64) -> TagCount {
    TagCount {
        tag: tag.to_string(),
        count,
    }
}

fn region(region: &str, revenue: f64, growth: f64) -> RegionalRevenue {
    RegionalRevenue {
        region: region.to_string(),
        revenue,
        growth,
    }
}

fn payment(method: &str, share: f64) -> PaymentMethodShare {
    PaymentMethodShare {
        method: method.to_string(),
        share,
    }
}

fn job(name: &str, state: JobState, duration_secs: u64, last_run: &str) -> JobStatus {
    JobStatus {
        name: name.to_string(),
        state,
        duration_secs,
        last_run: last_run.to_string(),
    }
}

pub fn builtin_snapshot() -> DashboardData {
    DashboardData {
        time_series: vec![
            point("Jan", 4200, 21_400.0),
            point("Feb", 4650, 23_800.0),
            point("Mar", 5100, 25_100.0),
            point("Apr", 5400, 27_900.0),
            point("May", 5900, 30_200.0),
            point("Jun", 6300, 32_800.0),
            point("Jul", 6800, 35_400.0),
            point("Aug", 7200, 37_100.0),
            point("Sep", 7600, 39_900.0),
            point("Oct", 7900, 41_800.0),
            point("Nov", 8100, 43_600.0),
            point("Dec", 9000, 46_900.0),
        ],
        cohorts: vec![
            cohort("Jan 01", &[100.0, 62.4, 48.1, 41.0, 36.5, 33.2, 30.8, 29.1]),
            cohort("Jan 08", &[100.0, 58.9, 45.3, 38.7, 34.0, 31.1, 28.6]),
            cohort("Jan 15", &[100.0, 64.2, 51.0, 43.8, 39.2, 35.5]),
            cohort("Jan 22", &[100.0, 55.7, 41.9, 35.2, 30.0]),
            cohort("Jan 29", &[100.0, 60.3, 47.6, 39.9]),
            cohort("Feb 05", &[100.0, 57.1, 44.2]),
            cohort("Feb 12", &[100.0, 61.8]),
            cohort("Feb 19", &[100.0]),
        ],
        queries: vec![
            query("events by user", 128_430, 42.5, 0.4),
            query("revenue by region", 18_902, 310.2, 1.2),
            query("funnel conversion", 7_214, 845.7, 3.8),
            query("cohort retention rollup", 2_390, 1_290.4, 0.9),
        ],
        tags: vec![
            tag("onboarding", 412),
            tag("billing", 298),
            tag("performance", 187),
            tag("mobile", 143),
        ],
        regions: vec![
            region("North America", 182_400.0, 12.4),
            region("Europe", 121_700.0, 8.1),
            region("Asia Pacific", 86_300.0, 21.7),
            region("Latin America", 24_900.0, -3.2),
        ],
        payment_methods: vec![
            payment("Credit card", 64.5),
            payment("PayPal", 18.2),
            payment("Bank transfer", 11.8),
            payment("Apple Pay", 5.5),
        ],
        jobs: vec![
            job("nightly-etl", JobState::Succeeded, 1_842, "2024-12-31 02:00"),
            job("mrr-snapshot", JobState::Running, 312, "2024-12-31 06:00"),
            job("cohort-rebuild", JobState::Failed, 97, "2024-12-31 04:30"),
            job("search-reindex", JobState::Queued, 0, "2024-12-30 23:15"),
        ],
    }
}
