//! The generation pipeline.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   1. Catalog   — fixed product table, no randomness
//!   2. Customers — D2C then B2B
//!   3. Orders    — per customer, consumes catalog + customers
//!
//! RULES:
//!   - Each stage is a function of the previous stages' tables.
//!   - All randomness flows through the one GenRng passed in.
//!   - Summaries (stats, quality report) are read-only over the Dataset.

use crate::{
    catalog::{build_catalog, Product},
    config::GeneratorConfig,
    customer::{generate_customers, Customer},
    error::GenResult,
    order::{generate_orders, LineItem, Order},
    report::{DatasetStats, QualityReport},
    rng::GenRng,
};

/// All four output tables of one run, held fully in memory.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub line_items: Vec<LineItem>,
}

impl Dataset {
    pub fn stats(&self, config: &GeneratorConfig) -> DatasetStats {
        DatasetStats::compute(config, &self.customers, &self.orders, &self.line_items)
    }

    pub fn quality_report(&self) -> QualityReport {
        QualityReport::compute(&self.customers, &self.orders)
    }
}

/// Run every stage in order against `rng`.
pub fn generate(config: &GeneratorConfig, rng: &mut GenRng) -> GenResult<Dataset> {
    config.validate()?;

    let products = build_catalog();
    let customers = generate_customers(config, rng)?;
    let book = generate_orders(config, &products, &customers, rng)?;

    Ok(Dataset {
        products,
        customers,
        orders: book.orders,
        line_items: book.line_items,
    })
}

/// Seed a fresh stream and run the pipeline.
pub fn generate_seeded(config: &GeneratorConfig, seed: u64) -> GenResult<Dataset> {
    log::info!("pipeline: seed={seed} d2c={} b2b={}", config.num_d2c, config.num_b2b);
    let mut rng = GenRng::new(seed);
    generate(config, &mut rng)
}
