use analytics::MetricsEngine;
use configuration::SalesFilter;
use core_types::DeliveryBucket;
use ecom_insights::{render, run_analysis};
use loader::{Datasets, load_ecommerce_data};
use rust_decimal_macros::dec;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, file_name: &str, lines: &[&str]) {
    fs::write(dir.path().join(file_name), lines.join("\n") + "\n").unwrap();
}

/// Two delivered January 2023 orders (2 and 10 days in transit) and one
/// delivered 2022 order for the comparison period.
fn store() -> (TempDir, Datasets) {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir,
        "orders_dataset.csv",
        &[
            "order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date",
            "o1,c1,delivered,2023-01-10 10:00:00,,,2023-01-12 10:00:00,2023-01-20 00:00:00",
            "o2,c2,delivered,2023-01-15 10:00:00,,,2023-01-25 10:00:00,2023-01-22 00:00:00",
            "o0,c1,delivered,2022-03-01 10:00:00,,,2022-03-05 10:00:00,2022-03-10 00:00:00",
        ],
    );
    write(
        &dir,
        "order_items_dataset.csv",
        &[
            "order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value",
            "o1,1,p1,s1,,100.00,10.00",
            "o2,1,p2,s1,,200.00,20.00",
            "o0,1,p1,s1,,150.00,15.00",
        ],
    );
    write(
        &dir,
        "products_dataset.csv",
        &[
            "product_id,product_category_name",
            "p1,perfumaria",
            "p2,informatica_acessorios",
        ],
    );
    write(
        &dir,
        "customers_dataset.csv",
        &[
            "customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state",
            "c1,u1,14409,franca,SP",
            "c2,u2,20000,rio de janeiro,RJ",
        ],
    );
    write(
        &dir,
        "order_reviews_dataset.csv",
        &[
            "review_id,order_id,review_score,review_comment_title,review_comment_message,review_creation_date,review_answer_timestamp",
            "r1,o1,5,,,2023-01-13 00:00:00,2023-01-14 00:00:00",
            "r2,o2,2,,,2023-01-26 00:00:00,2023-01-27 00:00:00",
        ],
    );
    write(
        &dir,
        "order_payments_dataset.csv",
        &[
            "order_id,payment_sequential,payment_type,payment_installments,payment_value",
            "o1,1,credit_card,1,110.00",
            "o2,1,boleto,1,220.00",
            "o0,1,credit_card,2,165.00",
        ],
    );

    let datasets = load_ecommerce_data(dir.path()).unwrap();
    (dir, datasets)
}

#[test]
fn two_order_store_produces_expected_kpis() {
    let (_dir, datasets) = store();
    let engine = MetricsEngine::new();
    let current = SalesFilter::new(2023, None, Some("delivered")).unwrap();
    let previous = current.with_year(2022);

    let output = run_analysis(&engine, &datasets, &current, Some(&previous));

    assert_eq!(output.revenue.total_revenue, dec!(300));
    assert_eq!(output.revenue.total_orders, 2);
    assert_eq!(output.revenue.average_order_value, dec!(150));
    assert_eq!(output.revenue.total_freight, dec!(30));

    let comparison = output.revenue.comparison.as_ref().unwrap();
    assert_eq!(comparison.previous_revenue, dec!(150));
    assert_eq!(comparison.revenue_growth_rate, Some(dec!(100)));

    assert_eq!(output.delivery.fast_delivery_rate, Some(dec!(50)));
    assert_eq!(output.delivery.distribution[&DeliveryBucket::UpToThreeDays], 1);
    assert_eq!(output.delivery.distribution[&DeliveryBucket::FourToSevenDays], 0);
    assert_eq!(output.delivery.distribution[&DeliveryBucket::EightOrMoreDays], 1);
    assert_eq!(output.delivery.distribution[&DeliveryBucket::Unknown], 0);

    assert_eq!(output.satisfaction.average_rating, Some(dec!(3.5)));
    assert_eq!(output.satisfaction.satisfaction_rate, Some(dec!(50)));

    let summary = output.summary(&engine).unwrap();
    assert_eq!(summary.groups().len(), 7);
    assert_eq!(summary.get("total_revenue"), Some(Some(dec!(300))));
    assert_eq!(summary.get("delivery_8_plus_days_count"), Some(Some(dec!(1))));
    assert_eq!(summary.get("state.SP.revenue"), Some(Some(dec!(100))));

    let text = summary.render_text();
    assert!(text.contains("Total Revenue: $300.00"));
    assert!(text.contains("Average Rating: 3.50/5.0"));
    assert!(text.contains("Satisfaction Rate: 50.0% (4+ stars)"));
    assert!(text.contains("YEAR-OVER-YEAR COMPARISON"));
}

#[test]
fn year_without_orders_degrades_to_empty_metrics() {
    let (_dir, datasets) = store();
    let engine = MetricsEngine::new();
    let filter = SalesFilter::for_year(1999);

    let output = run_analysis(&engine, &datasets, &filter, None);

    assert_eq!(output.revenue.total_orders, 0);
    assert_eq!(output.revenue.average_order_value, dec!(0));
    assert!(output.revenue.comparison.is_none());
    assert_eq!(output.satisfaction.average_rating, None);
    assert_eq!(output.delivery.average_delivery_days, None);
    assert!(output.products.categories.is_empty());
    assert!(output.monthly.months.is_empty());

    let summary = output.summary(&engine).unwrap();
    assert_eq!(summary.get("nps_score"), Some(None));
    assert!(!summary.render_text().contains("YEAR-OVER-YEAR"));
}

#[test]
fn table_output_lists_every_group() {
    let (_dir, datasets) = store();
    let engine = MetricsEngine::new();
    let output = run_analysis(&engine, &datasets, &SalesFilter::for_year(2023), None);

    let rendered = render::tables(&output);
    for title in [
        "Revenue",
        "Customer satisfaction",
        "Delivery",
        "Product categories",
        "Customer states",
        "Monthly trends",
        "Satisfaction by delivery time",
    ] {
        assert!(rendered.contains(title), "missing section {title}");
    }
    assert!(rendered.contains("perfumaria"));

    let json = serde_json::to_value(&output).unwrap();
    assert!(!json["revenue"]["total_revenue"].is_null());
    assert_eq!(json["filter"]["target_year"], 2023);
}
