use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::filters::MONTHS;
use crate::models::{Transaction, TxnKind};

/// Aggregation granularity for the spending chart.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChartView {
    Daily,
    Monthly,
}

impl ChartView {
    pub fn series_label(&self) -> &'static str {
        match self {
            ChartView::Daily => "Daily Spending",
            ChartView::Monthly => "Monthly Spending",
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Whole days between the earliest and latest transaction dates; 0 when
/// fewer than two dates parse.
pub fn span_days(transactions: &[Transaction]) -> i64 {
    let mut min: Option<NaiveDate> = None;
    let mut max: Option<NaiveDate> = None;
    for tx in transactions {
        if let Some(date) = parse_date(&tx.date) {
            min = Some(min.map_or(date, |m| m.min(date)));
            max = Some(max.map_or(date, |m| m.max(date)));
        }
    }
    match (min, max) {
        (Some(lo), Some(hi)) => (hi - lo).num_days(),
        _ => 0,
    }
}

/// The granularity heuristic: a wide date span or a multi-month (or
/// unconstrained) filter reads better bucketed by month; a single tight
/// month reads better day by day.
pub fn choose_view(transactions: &[Transaction], checked_months: usize) -> ChartView {
    if span_days(transactions) > 32 || checked_months > 1 || checked_months == 0 {
        ChartView::Monthly
    } else {
        ChartView::Daily
    }
}

/// Sums Debit amounts per bucket. Monthly buckets are month
/// abbreviations ordered Jan→Dec; daily buckets are the raw ISO date
/// strings in lexicographic (hence chronological) order.
pub fn spending_series(transactions: &[Transaction], view: ChartView) -> Vec<(String, f64)> {
    let mut grouped: HashMap<String, f64> = HashMap::new();
    for tx in transactions {
        if tx.kind != TxnKind::Debit {
            continue;
        }
        let key = match view {
            ChartView::Monthly => match parse_date(&tx.date) {
                Some(date) => MONTHS[date.month0() as usize].1.to_string(),
                None => continue,
            },
            ChartView::Daily => tx.date.clone(),
        };
        *grouped.entry(key).or_insert(0.0) += tx.amount;
    }

    match view {
        ChartView::Monthly => MONTHS
            .iter()
            .filter_map(|(_, name)| grouped.remove(*name).map(|v| (name.to_string(), v)))
            .collect(),
        ChartView::Daily => {
            let mut series: Vec<(String, f64)> = grouped.into_iter().collect();
            series.sort_by(|a, b| a.0.cmp(&b.0));
            series
        }
    }
}

// SVG geometry for the line chart. The viewBox is fixed; the element
// scales responsively via CSS.
pub const VIEW_W: f64 = 640.0;
pub const VIEW_H: f64 = 240.0;
const PAD_X: f64 = 16.0;
const PAD_Y: f64 = 14.0;

pub fn baseline_y() -> f64 {
    VIEW_H - PAD_Y
}

/// Positions for each series value, left to right, scaled so the peak
/// value touches the top padding and zero sits on the baseline.
pub fn point_positions(values: &[f64]) -> Vec<(f64, f64)> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let peak = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0);
    let inner_w = VIEW_W - 2.0 * PAD_X;
    let inner_h = VIEW_H - 2.0 * PAD_Y;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n == 1 {
                VIEW_W / 2.0
            } else {
                PAD_X + inner_w * i as f64 / (n - 1) as f64
            };
            let y = PAD_Y + inner_h * (1.0 - v / peak);
            (x, y)
        })
        .collect()
}

pub fn polyline_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The fill polygon: the line closed down to the baseline on both ends.
pub fn area_points(points: &[(f64, f64)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let first = points[0].0;
    let last = points[points.len() - 1].0;
    format!(
        "{} {:.1},{:.1} {:.1},{:.1}",
        polyline_points(points),
        last,
        baseline_y(),
        first,
        baseline_y()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debit(date: &str, amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: date.into(),
            merchant: "Shop".into(),
            amount,
            category: "Food".into(),
            payment_mode: "Cash".into(),
            kind: TxnKind::Debit,
            source: "manual".into(),
            image_hash: None,
            is_flagged: None,
        }
    }

    fn credit(date: &str, amount: f64) -> Transaction {
        Transaction {
            kind: TxnKind::Credit,
            ..debit(date, amount)
        }
    }

    #[test]
    fn monthly_when_no_months_checked() {
        let txns = vec![debit("2024-01-03", 10.0)];
        assert_eq!(choose_view(&txns, 0), ChartView::Monthly);
    }

    #[test]
    fn monthly_when_multiple_months_checked_regardless_of_span() {
        let txns = vec![debit("2024-01-03", 10.0), debit("2024-01-04", 5.0)];
        assert_eq!(choose_view(&txns, 2), ChartView::Monthly);
    }

    #[test]
    fn monthly_when_span_exceeds_32_days() {
        let txns = vec![debit("2024-01-01", 10.0), debit("2024-03-01", 5.0)];
        assert_eq!(choose_view(&txns, 1), ChartView::Monthly);
    }

    #[test]
    fn daily_for_one_month_and_tight_span() {
        let txns = vec![debit("2024-01-01", 10.0), debit("2024-01-20", 5.0)];
        assert_eq!(choose_view(&txns, 1), ChartView::Daily);
    }

    #[test]
    fn span_ignores_unparseable_dates() {
        let txns = vec![debit("garbage", 1.0), debit("2024-01-01", 1.0)];
        assert_eq!(span_days(&txns), 0);
    }

    #[test]
    fn series_sums_debits_only() {
        let txns = vec![
            debit("2024-01-05", 40.0),
            credit("2024-01-05", 100.0),
            debit("2024-01-05", 10.0),
        ];
        let series = spending_series(&txns, ChartView::Daily);
        assert_eq!(series, vec![("2024-01-05".to_string(), 50.0)]);
    }

    #[test]
    fn monthly_labels_run_jan_to_dec() {
        let txns = vec![
            debit("2024-11-01", 1.0),
            debit("2024-02-10", 2.0),
            debit("2024-07-04", 3.0),
            debit("2024-02-20", 4.0),
        ];
        let series = spending_series(&txns, ChartView::Monthly);
        let labels: Vec<&str> = series.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Feb", "Jul", "Nov"]);
        assert_eq!(series[0].1, 6.0);
    }

    #[test]
    fn daily_labels_sort_lexicographically() {
        let txns = vec![
            debit("2024-01-10", 1.0),
            debit("2024-01-02", 2.0),
            debit("2024-01-05", 3.0),
        ];
        let series = spending_series(&txns, ChartView::Daily);
        let labels: Vec<&str> = series.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["2024-01-02", "2024-01-05", "2024-01-10"]);
    }

    #[test]
    fn geometry_scales_peak_to_top() {
        let points = point_positions(&[0.0, 100.0]);
        assert_eq!(points.len(), 2);
        // zero sits on the baseline, the peak on the top padding
        assert!((points[0].1 - baseline_y()).abs() < 1e-9);
        assert!((points[1].1 - 14.0).abs() < 1e-9);
        assert!(points[0].0 < points[1].0);
    }

    #[test]
    fn geometry_centers_single_point() {
        let points = point_positions(&[50.0]);
        assert_eq!(points.len(), 1);
        assert!((points[0].0 - VIEW_W / 2.0).abs() < 1e-9);
    }

    #[test]
    fn area_closes_to_baseline() {
        let points = point_positions(&[10.0, 20.0]);
        let area = area_points(&points);
        assert!(area.ends_with(&format!("{:.1},{:.1}", points[0].0, baseline_y())));
    }
}
