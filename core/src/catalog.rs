//! Fixed product catalog. Seed data, not generated.

use crate::types::{Category, EntityId, Money};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    pub product_id: EntityId,
    pub category: Category,
    pub name: String,
    pub unit_price: Money,
    pub avg_cogs: Money,
    pub active_since: NaiveDate,
}

// (id, category, name, unit price cents, avg cogs cents, active since)
const CATALOG: [(&str, Category, &str, i64, i64, (i32, u32, u32)); 10] = [
    ("P001", Category::Beverage, "Organic Green Tea", 1899, 850, (2021, 3, 1)),
    ("P002", Category::Beverage, "Herbal Wellness Blend", 2299, 1020, (2021, 6, 15)),
    ("P003", Category::Snack, "Superfood Energy Bars", 2499, 1200, (2021, 1, 10)),
    ("P004", Category::Snack, "Organic Trail Mix", 1599, 780, (2021, 8, 1)),
    ("P005", Category::Supplement, "Vitamin D3 Gummies", 2999, 1450, (2022, 1, 1)),
    ("P006", Category::Supplement, "Probiotic Blend", 3499, 1680, (2022, 3, 15)),
    ("P007", Category::PersonalCare, "Natural Face Serum", 3999, 1800, (2022, 6, 1)),
    ("P008", Category::PersonalCare, "Organic Body Lotion", 2699, 1250, (2022, 8, 10)),
    ("P009", Category::Beverage, "Detox Tea Collection", 3299, 1500, (2023, 1, 5)),
    ("P010", Category::Snack, "Keto-Friendly Crackers", 1999, 950, (2023, 4, 20)),
];

/// Build the 10-row product table.
pub fn build_catalog() -> Vec<Product> {
    log::info!("catalog: building {} products", CATALOG.len());
    CATALOG
        .iter()
        .map(|&(id, category, name, price, cogs, (y, m, d))| Product {
            product_id: id.to_string(),
            category,
            name: name.to_string(),
            unit_price: Money::from_cents(price),
            avg_cogs: Money::from_cents(cogs),
            active_since: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        })
        .collect()
}
