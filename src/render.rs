//! Terminal table rendering of metric groups and feed shapes.

use crate::AnalysisOutput;
use analytics::format_fixed;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use loader::{DatasetInfo, DatasetKind};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const NOT_AVAILABLE: &str = "n/a";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Right-aligns every column after the first.
fn align_numbers(table: &mut Table) {
    let columns = table.column_count();
    for index in 1..columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn money(value: Decimal) -> String {
    format_fixed(value, 2)
}

fn pct(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{}%", format_fixed(v, 2)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn num(value: Option<Decimal>, dp: u32) -> String {
    value
        .map(|v| format_fixed(v, dp))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// One table per metric group, separated by a titled blank line.
pub fn tables(output: &AnalysisOutput) -> String {
    let mut sections = Vec::new();

    let revenue = &output.revenue;
    let mut table = new_table(vec!["Revenue", "Value"]);
    table
        .add_row(vec!["Total revenue".to_string(), money(revenue.total_revenue)])
        .add_row(vec!["Total freight".to_string(), money(revenue.total_freight)])
        .add_row(vec!["Orders".to_string(), revenue.total_orders.to_string()])
        .add_row(vec!["Items".to_string(), revenue.total_items.to_string()])
        .add_row(vec![
            "Average order value".to_string(),
            money(revenue.average_order_value),
        ])
        .add_row(vec![
            "Average item price".to_string(),
            money(revenue.average_item_price),
        ])
        .add_row(vec![
            "Payments received".to_string(),
            money(revenue.total_payment_value),
        ]);
    if let Some(c) = &revenue.comparison {
        table
            .add_row(vec!["Previous revenue".to_string(), money(c.previous_revenue)])
            .add_row(vec!["Previous orders".to_string(), c.previous_orders.to_string()])
            .add_row(vec!["Previous AOV".to_string(), money(c.previous_aov)])
            .add_row(vec!["Revenue growth".to_string(), pct(c.revenue_growth_rate)])
            .add_row(vec!["Order growth".to_string(), pct(c.order_growth_rate)])
            .add_row(vec!["AOV growth".to_string(), pct(c.aov_growth_rate)]);
    }
    align_numbers(&mut table);
    sections.push(("Revenue", table));

    let satisfaction = &output.satisfaction;
    let mut table = new_table(vec!["Satisfaction", "Value"]);
    table
        .add_row(vec![
            "Average rating".to_string(),
            num(satisfaction.average_rating, 2),
        ])
        .add_row(vec![
            "Satisfaction rate (4+)".to_string(),
            pct(satisfaction.satisfaction_rate),
        ])
        .add_row(vec!["NPS".to_string(), num(satisfaction.nps_score, 1)])
        .add_row(vec![
            "Reviews".to_string(),
            satisfaction.total_reviews.to_string(),
        ]);
    for (score, n) in &satisfaction.rating_distribution {
        table.add_row(vec![format!("{score} stars"), n.to_string()]);
    }
    align_numbers(&mut table);
    sections.push(("Customer satisfaction", table));

    let delivery = &output.delivery;
    let mut table = new_table(vec!["Delivery", "Value"]);
    table
        .add_row(vec!["Orders".to_string(), delivery.total_orders.to_string()])
        .add_row(vec![
            "Delivered".to_string(),
            delivery.delivered_orders.to_string(),
        ])
        .add_row(vec![
            "Average days".to_string(),
            num(delivery.average_delivery_days, 1),
        ])
        .add_row(vec![
            "Median days".to_string(),
            num(delivery.median_delivery_days, 1),
        ])
        .add_row(vec!["Fast (<=3 days)".to_string(), pct(delivery.fast_delivery_rate)])
        .add_row(vec!["Slow (>7 days)".to_string(), pct(delivery.slow_delivery_rate)])
        .add_row(vec!["On time".to_string(), pct(delivery.on_time_rate)]);
    for (bucket, n) in &delivery.distribution {
        table.add_row(vec![bucket.to_string(), n.to_string()]);
    }
    align_numbers(&mut table);
    sections.push(("Delivery", table));

    let mut table = new_table(vec![
        "Category",
        "Revenue",
        "Items",
        "Orders",
        "Avg price",
        "Share",
    ]);
    for c in &output.products.categories {
        table.add_row(vec![
            c.category.clone(),
            money(c.total_revenue),
            c.total_items.to_string(),
            c.unique_orders.to_string(),
            money(c.average_price),
            pct(c.market_share),
        ]);
    }
    align_numbers(&mut table);
    sections.push(("Product categories", table));

    let mut table = new_table(vec![
        "State",
        "Revenue",
        "Orders",
        "Customers",
        "Rev/customer",
        "Share",
    ]);
    for s in &output.geography.states {
        table.add_row(vec![
            s.state.clone(),
            money(s.total_revenue),
            s.total_orders.to_string(),
            s.unique_customers.to_string(),
            money(s.revenue_per_customer),
            pct(s.market_share),
        ]);
    }
    align_numbers(&mut table);
    sections.push(("Customer states", table));

    let mut table = new_table(vec!["Month", "Revenue", "Orders", "AOV", "Revenue growth"]);
    for m in &output.monthly.months {
        table.add_row(vec![
            format!("{}-{:02}", m.year, m.month),
            money(m.revenue),
            m.orders.to_string(),
            money(m.average_order_value),
            pct(m.revenue_growth),
        ]);
    }
    align_numbers(&mut table);
    sections.push(("Monthly trends", table));

    let mut table = new_table(vec!["Delivery time", "Avg rating", "Reviews", "Std", "Satisfied"]);
    for b in &output.satisfaction_by_delivery.buckets {
        table.add_row(vec![
            b.bucket.to_string(),
            num(Some(b.average_rating), 2),
            b.review_count.to_string(),
            num(b.rating_std, 2),
            pct(Some(b.satisfaction_rate)),
        ]);
    }
    align_numbers(&mut table);
    sections.push(("Satisfaction by delivery time", table));

    sections
        .into_iter()
        .map(|(title, table)| format!("{title}\n{table}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rows, columns and empty cells of every feed that was read.
pub fn dataset_info(info: &BTreeMap<DatasetKind, DatasetInfo>) -> String {
    let mut table = new_table(vec!["Feed", "File", "Rows", "Columns", "Missing values"]);
    for (kind, shape) in info {
        table.add_row(vec![
            kind.name().to_string(),
            kind.file_name().to_string(),
            shape.rows.to_string(),
            shape.columns.to_string(),
            shape.missing_values.to_string(),
        ]);
    }
    align_numbers(&mut table);
    table.to_string()
}
