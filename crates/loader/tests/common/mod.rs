#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const ORDERS_HEADER: &str = "order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date";
pub const ITEMS_HEADER: &str =
    "order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value";
pub const PRODUCTS_HEADER: &str = "product_id,product_category_name,product_name_lenght,product_description_lenght,product_photos_qty,product_weight_g,product_length_cm,product_height_cm,product_width_cm";
pub const CUSTOMERS_HEADER: &str =
    "customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state";
pub const REVIEWS_HEADER: &str = "review_id,order_id,review_score,review_comment_title,review_comment_message,review_creation_date,review_answer_timestamp";
pub const PAYMENTS_HEADER: &str =
    "order_id,payment_sequential,payment_type,payment_installments,payment_value";

/// A throwaway data directory holding one CSV per feed.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Every required feed present with headers only.
    pub fn empty() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.write("orders_dataset.csv", ORDERS_HEADER, &[]);
        fixture.write("order_items_dataset.csv", ITEMS_HEADER, &[]);
        fixture.write("products_dataset.csv", PRODUCTS_HEADER, &[]);
        fixture.write("customers_dataset.csv", CUSTOMERS_HEADER, &[]);
        fixture.write("order_reviews_dataset.csv", REVIEWS_HEADER, &[]);
        fixture.write("order_payments_dataset.csv", PAYMENTS_HEADER, &[]);
        fixture
    }

    /// A small store: two delivered orders in January 2023, one shipped order in
    /// March 2023, one canceled order in 2022 and an item whose order is unknown.
    pub fn sample() -> Self {
        let fixture = Self::empty();
        fixture.write(
            "orders_dataset.csv",
            ORDERS_HEADER,
            &[
                "o1,c1,delivered,2023-01-10 09:00:00,2023-01-10 10:00:00,2023-01-11 08:00:00,2023-01-12 12:00:00,2023-01-20 00:00:00",
                "o2,c2,delivered,2023-01-15 14:30:00,2023-01-15 15:00:00,2023-01-17 08:00:00,2023-01-25 16:00:00,2023-01-22 00:00:00",
                "o3,c1,shipped,2023-03-02 11:00:00,2023-03-02 12:00:00,2023-03-04 08:00:00,,2023-03-20 00:00:00",
                "o4,c3,canceled,2022-07-01 08:00:00,,,,2022-07-15 00:00:00",
            ],
        );
        fixture.write(
            "order_items_dataset.csv",
            ITEMS_HEADER,
            &[
                "o1,1,p1,s1,2023-01-12 00:00:00,100.00,10.00",
                "o2,1,p2,s1,2023-01-17 00:00:00,150.00,12.50",
                "o2,2,p3,s2,2023-01-17 00:00:00,50.00,12.50",
                "o3,1,p1,s1,2023-03-05 00:00:00,80.00,8.00",
                "o4,1,p2,s2,2022-07-03 00:00:00,40.00,5.00",
                "ghost,1,p1,s1,2023-01-12 00:00:00,999.00,0.00",
            ],
        );
        fixture.write(
            "products_dataset.csv",
            PRODUCTS_HEADER,
            &[
                "p1,perfumaria,40,287,1,225,16,10,14",
                "p2,cama_mesa_banho,44,276,1,1000,30,18,20",
            ],
        );
        fixture.write(
            "customers_dataset.csv",
            CUSTOMERS_HEADER,
            &[
                "c1,u1,14409,franca,SP",
                "c2,u2,9790,sao bernardo do campo,RJ",
            ],
        );
        fixture.write(
            "order_reviews_dataset.csv",
            REVIEWS_HEADER,
            &[
                "r1,o1,5,,,2023-01-13 00:00:00,2023-01-14 10:00:00",
                "r2,o2,2,,atrasou,2023-01-26 00:00:00,2023-01-27 10:00:00",
                "r3,o2,4,,,2023-01-26 00:00:00,2023-01-28 10:00:00",
            ],
        );
        fixture.write(
            "order_payments_dataset.csv",
            PAYMENTS_HEADER,
            &[
                "o1,1,credit_card,3,110.00",
                "o2,1,credit_card,1,150.00",
                "o2,2,voucher,1,75.00",
            ],
        );
        fixture.write(
            "product_category_name_translation.csv",
            "product_category_name,product_category_name_english",
            &["cama_mesa_banho,bed_bath_table"],
        );
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, file_name: &str, header: &str, rows: &[&str]) {
        let mut contents = String::from(header);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(self.dir.path().join(file_name), contents).unwrap();
    }

    pub fn remove(&self, file_name: &str) {
        fs::remove_file(self.dir.path().join(file_name)).unwrap();
    }
}
