use crate::error::ReportMergeError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// A KPI group that can be flattened into `key -> value` pairs for reporting.
/// `None` marks a metric that is undefined for the input, not zero.
pub trait MetricGroup {
    fn group_name(&self) -> &'static str;
    fn entries(&self) -> Vec<(String, Option<Decimal>)>;
}

/// The merged, flat view of several metric groups.
///
/// This struct is the final output of the metrics engine and the only thing a
/// presentation layer needs to read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    groups: Vec<&'static str>,
    metrics: BTreeMap<String, Option<Decimal>>,
}

impl SummaryReport {
    pub fn groups(&self) -> &[&'static str] {
        &self.groups
    }

    pub fn metrics(&self) -> &BTreeMap<String, Option<Decimal>> {
        &self.metrics
    }

    /// `None` if the key is absent, `Some(None)` if present but undefined.
    pub fn get(&self, key: &str) -> Option<Option<Decimal>> {
        self.metrics.get(key).copied()
    }

    /// Plain-text summary of the headline metrics. Sections appear only for
    /// the groups that were merged.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let value = |key: &str| self.get(key).flatten();

        out.push_str("BUSINESS METRICS SUMMARY REPORT\n");
        out.push_str("================================\n");

        if self.has_group("revenue") {
            section(&mut out, "REVENUE PERFORMANCE");
            line(&mut out, "Total Revenue", money(value("total_revenue")));
            line(&mut out, "Total Orders", whole(value("total_orders")));
            line(&mut out, "Average Order Value", money(value("average_order_value")));
            line(&mut out, "Average Item Price", money(value("average_item_price")));

            if self.metrics.contains_key("revenue_growth_rate") {
                section(&mut out, "YEAR-OVER-YEAR COMPARISON");
                line(&mut out, "Revenue Growth", percent(value("revenue_growth_rate"), 2));
                line(&mut out, "Order Growth", percent(value("order_growth_rate"), 2));
                line(&mut out, "AOV Growth", percent(value("aov_growth_rate"), 2));
            }
        }

        if self.has_group("satisfaction") {
            section(&mut out, "CUSTOMER SATISFACTION");
            line(
                &mut out,
                "Average Rating",
                value("average_rating")
                    .map(|v| format!("{}/5.0", format_fixed(v, 2)))
                    .unwrap_or_else(not_available),
            );
            line(&mut out, "Total Reviews", whole(value("total_reviews")));
            line(
                &mut out,
                "Satisfaction Rate",
                format!("{} (4+ stars)", percent(value("satisfaction_rate"), 1)),
            );
            line(&mut out, "Net Promoter Score", fixed(value("nps_score"), 1));
        }

        if self.has_group("delivery") {
            section(&mut out, "DELIVERY PERFORMANCE");
            line(
                &mut out,
                "Average Delivery Time",
                value("average_delivery_days")
                    .map(|v| format!("{} days", format_fixed(v, 1)))
                    .unwrap_or_else(not_available),
            );
            line(
                &mut out,
                "Fast Delivery Rate",
                format!("{} (<=3 days)", percent(value("fast_delivery_rate"), 1)),
            );
            line(
                &mut out,
                "Slow Delivery Rate",
                format!("{} (>7 days)", percent(value("slow_delivery_rate"), 1)),
            );
            line(&mut out, "On-Time Rate", percent(value("on_time_rate"), 1));
        }

        out
    }

    fn has_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| *g == name)
    }
}

/// Merges the entries of every group in order. A key produced twice is an error;
/// nothing is ever overwritten.
pub fn merge_groups(groups: &[&dyn MetricGroup]) -> Result<SummaryReport, ReportMergeError> {
    let mut metrics = BTreeMap::new();
    let mut origin: BTreeMap<String, &'static str> = BTreeMap::new();
    let mut names = Vec::with_capacity(groups.len());

    for group in groups {
        let incoming_group = group.group_name();
        for (key, value) in group.entries() {
            if let Some(existing_group) = origin.get(&key) {
                return Err(ReportMergeError::DuplicateKey {
                    key,
                    existing_group: *existing_group,
                    incoming_group,
                });
            }
            origin.insert(key.clone(), incoming_group);
            metrics.insert(key, value);
        }
        names.push(incoming_group);
    }

    Ok(SummaryReport {
        groups: names,
        metrics,
    })
}

/// Rounds half away from zero to `dp` places and always prints exactly `dp`
/// decimals, so `14/3` at 2 places is `4.67` and `50` at 1 place is `50.0`.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n{}\n", title, "-".repeat(title.len())));
}

fn line(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("{label}: {value}\n"));
}

fn not_available() -> String {
    "n/a".to_string()
}

fn fixed(value: Option<Decimal>, dp: u32) -> String {
    value
        .map(|v| format_fixed(v, dp))
        .unwrap_or_else(not_available)
}

fn percent(value: Option<Decimal>, dp: u32) -> String {
    value
        .map(|v| format!("{}%", format_fixed(v, dp)))
        .unwrap_or_else(not_available)
}

fn whole(value: Option<Decimal>) -> String {
    value
        .map(|v| group_thousands(&format_fixed(v, 0)))
        .unwrap_or_else(not_available)
}

fn money(value: Option<Decimal>) -> String {
    value
        .map(|v| {
            let rounded = format_fixed(v, 2);
            let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
            format!("${}.{}", group_thousands(int_part), frac_part)
        })
        .unwrap_or_else(not_available)
}

/// Inserts `,` every three digits of an integer string, keeping a leading sign.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Fixed(&'static str, Vec<(&'static str, Option<Decimal>)>);

    impl MetricGroup for Fixed {
        fn group_name(&self) -> &'static str {
            self.0
        }

        fn entries(&self) -> Vec<(String, Option<Decimal>)> {
            self.1.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        }
    }

    #[test]
    fn merges_disjoint_groups() {
        let revenue = Fixed("revenue", vec![("total_revenue", Some(dec!(300)))]);
        let satisfaction = Fixed("satisfaction", vec![("nps_score", None)]);

        let report = merge_groups(&[&revenue, &satisfaction]).unwrap();
        assert_eq!(report.groups(), &["revenue", "satisfaction"]);
        assert_eq!(report.get("total_revenue"), Some(Some(dec!(300))));
        assert_eq!(report.get("nps_score"), Some(None));
        assert_eq!(report.get("missing"), None);
    }

    #[test]
    fn colliding_keys_are_a_merge_error() {
        let current = Fixed("revenue", vec![("total_revenue", Some(dec!(300)))]);
        let other = Fixed("legacy", vec![("total_revenue", Some(dec!(1)))]);

        let err = merge_groups(&[&current, &other]).unwrap_err();
        assert_eq!(
            err,
            ReportMergeError::DuplicateKey {
                key: "total_revenue".to_string(),
                existing_group: "revenue",
                incoming_group: "legacy",
            }
        );
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-1000"), "-1,000");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(money(Some(dec!(1234.5))), "$1,234.50");
        assert_eq!(money(Some(dec!(1.999))), "$2.00");
        assert_eq!(money(None), "n/a");
    }

    #[test]
    fn fixed_formatting_rounds_and_pads() {
        let fourteen_thirds = dec!(14) / dec!(3);
        assert_eq!(format_fixed(fourteen_thirds, 2), "4.67");
        assert_eq!(format_fixed(fourteen_thirds, 1), "4.7");
        assert_eq!(format_fixed(dec!(12.345), 2), "12.35");
        assert_eq!(format_fixed(dec!(-0.125), 2), "-0.13");
        assert_eq!(format_fixed(dec!(50), 1), "50.0");
        assert_eq!(format_fixed(dec!(2.5), 0), "3");
    }

    #[test]
    fn text_report_rounds_repeating_values() {
        let satisfaction = Fixed(
            "satisfaction",
            vec![
                ("average_rating", Some(dec!(14) / dec!(3))),
                ("total_reviews", Some(dec!(3))),
                ("satisfaction_rate", Some(dec!(50))),
                ("nps_score", Some(dec!(200) / dec!(3))),
            ],
        );
        let text = merge_groups(&[&satisfaction]).unwrap().render_text();

        assert!(text.contains("Average Rating: 4.67/5.0"));
        assert!(text.contains("Satisfaction Rate: 50.0% (4+ stars)"));
        assert!(text.contains("Net Promoter Score: 66.7"));
    }

    #[test]
    fn text_report_shows_only_merged_sections() {
        let revenue = Fixed(
            "revenue",
            vec![
                ("total_revenue", Some(dec!(1500))),
                ("total_orders", Some(dec!(10))),
                ("average_order_value", Some(dec!(150))),
                ("average_item_price", Some(dec!(75))),
            ],
        );
        let text = merge_groups(&[&revenue]).unwrap().render_text();

        assert!(text.contains("Total Revenue: $1,500.00"));
        assert!(text.contains("Total Orders: 10"));
        assert!(!text.contains("YEAR-OVER-YEAR"));
        assert!(!text.contains("CUSTOMER SATISFACTION"));
    }
}
