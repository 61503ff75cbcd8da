mod common;

use common::Fixture;
use configuration::SalesFilter;
use core_types::{DeliveryBucket, OrderStatus, SalesRecord};
use loader::{DatasetLoader, Datasets};
use rust_decimal_macros::dec;

fn sample() -> (Fixture, Datasets) {
    let fixture = Fixture::sample();
    let datasets = DatasetLoader::new(fixture.path()).load_all_datasets().unwrap();
    (fixture, datasets)
}

fn find<'a>(records: &'a [SalesRecord], order_id: &str, item: u32) -> &'a SalesRecord {
    records
        .iter()
        .find(|r| r.order_id == order_id && r.order_item_id == item)
        .unwrap()
}

#[test]
fn year_filter_keeps_only_matching_rows() {
    let (_fixture, datasets) = sample();
    let filter = SalesFilter::for_year(2023);
    let records = datasets.create_sales_dataset(&filter);

    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.year == 2023));
    // The item whose order is unknown never appears.
    assert!(records.iter().all(|r| r.order_id != "ghost"));
}

#[test]
fn month_and_status_filters_combine() {
    let (_fixture, datasets) = sample();

    let january = SalesFilter::new(2023, Some(1), Some("Delivered")).unwrap();
    let records = datasets.create_sales_dataset(&january);
    assert_eq!(records.len(), 3);
    assert!(records
        .iter()
        .all(|r| r.month == 1 && r.order_status == OrderStatus::Delivered));

    let shipped = SalesFilter::new(2023, None, Some("SHIPPED")).unwrap();
    let records = datasets.create_sales_dataset(&shipped);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].order_id, "o3");
}

#[test]
fn rows_are_joined_and_enriched() {
    let (_fixture, datasets) = sample();
    let records = datasets.create_sales_dataset(&SalesFilter::for_year(2023));

    let o1 = find(&records, "o1", 1);
    assert_eq!(o1.price, dec!(100.00));
    assert_eq!(o1.freight_value, dec!(10.00));
    assert_eq!(o1.category, "perfumaria");
    assert_eq!(o1.customer_state, "SP");
    assert_eq!(o1.customer_city.as_deref(), Some("franca"));
    assert_eq!(o1.review_score, Some(5));
    assert_eq!(o1.delivery_days, Some(2));
    assert_eq!(o1.delivery_bucket, DeliveryBucket::UpToThreeDays);
    assert_eq!(o1.delivered_on_time, Some(true));
    let payment = o1.payment.unwrap();
    assert_eq!(payment.total_value, dec!(110.00));
    assert_eq!(payment.max_installments, 3);

    let o2 = find(&records, "o2", 1);
    assert_eq!(o2.category, "bed_bath_table");
    assert_eq!(o2.raw_category.as_deref(), Some("cama_mesa_banho"));
    // The later-answered review of o2 wins.
    assert_eq!(o2.review_score, Some(4));
    assert_eq!(o2.delivery_days, Some(10));
    assert_eq!(o2.delivery_bucket, DeliveryBucket::EightOrMoreDays);
    assert_eq!(o2.delivered_on_time, Some(false));
    assert_eq!(o2.payment.unwrap().total_value, dec!(225.00));
    assert_eq!(o2.payment.unwrap().payment_count, 2);

    // p3 has no product row: the item is kept and left uncategorized.
    let o2_second = find(&records, "o2", 2);
    assert_eq!(o2_second.category, SalesRecord::UNCATEGORIZED);
    assert_eq!(o2_second.raw_category, None);
}

#[test]
fn undelivered_orders_are_bucketed_as_unknown() {
    let (_fixture, datasets) = sample();
    let records = datasets.create_sales_dataset(&SalesFilter::for_year(2023));

    let o3 = find(&records, "o3", 1);
    assert_eq!(o3.delivery_days, None);
    assert_eq!(o3.delivery_bucket, DeliveryBucket::Unknown);
    assert_eq!(o3.delivered_on_time, None);
    assert_eq!(o3.review_score, None);
    assert_eq!(o3.payment, None);
}

#[test]
fn customers_without_a_row_get_the_unknown_state() {
    let (_fixture, datasets) = sample();
    let records = datasets.create_sales_dataset(&SalesFilter::for_year(2022));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].customer_state, SalesRecord::UNKNOWN_STATE);
    assert_eq!(records[0].order_status, OrderStatus::Canceled);
}

#[test]
fn no_matching_year_yields_an_empty_table() {
    let (_fixture, datasets) = sample();
    assert!(datasets
        .create_sales_dataset(&SalesFilter::for_year(1999))
        .is_empty());
}

#[test]
fn repeated_calls_are_identical() {
    let (fixture, datasets) = sample();
    let filter = SalesFilter::new(2023, None, None).unwrap();

    let first = datasets.create_sales_dataset(&filter);
    let second = datasets.create_sales_dataset(&filter);
    assert_eq!(first, second);

    let reloaded = DatasetLoader::new(fixture.path()).load_all_datasets().unwrap();
    assert_eq!(first, reloaded.create_sales_dataset(&filter));
}
