//! Order and line-item generation.
//!
//! Draw order (fixed, part of the reproducibility contract):
//!   per customer:  order count
//!   per order:     order date → item count → (product, quantity) per item
//!                  → discount tier → missing-date coin → missing-COGS coin
//!
//! Order and line-item sequence numbers run globally across customers.

use crate::{
    catalog::Product,
    config::GeneratorConfig,
    customer::Customer,
    error::{GenError, GenResult},
    rng::GenRng,
    types::{Category, CustomerStatus, EntityId, Money, Segment},
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub const MISSING_ORDER_DATE_RATE: f64 = 0.005;
pub const MISSING_COGS_RATE: f64 = 0.03;

const PROGRESS_EVERY: usize = 5_000;

static B2B_DISCOUNTS: [(u32, u32); 5] = [(0, 20), (5, 30), (10, 30), (15, 15), (20, 5)];
static D2C_DISCOUNTS: [(u32, u32); 3] = [(0, 70), (10, 25), (15, 5)];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Order {
    pub order_id: EntityId,
    pub customer_id: EntityId,
    pub order_date: Option<NaiveDate>,
    pub subtotal: Money,
    pub discount_percent: u32,
    pub discount_amount: Money,
    pub revenue: Money,
    pub total_cogs: Option<Money>,
    pub profit: Option<Money>,
    pub num_items: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineItem {
    pub line_item_id: EntityId,
    pub order_id: EntityId,
    pub customer_id: EntityId,
    pub product_id: EntityId,
    pub product_name: String,
    pub category: Category,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub revenue: Money,
    pub cogs: Money,
    pub profit: Money,
    pub order_date: Option<NaiveDate>,
}

/// Orders and their line items, both in generation order.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    pub orders: Vec<Order>,
    pub line_items: Vec<LineItem>,
}

/// Per-customer purchasing behaviour, fixed by segment and status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderProfile {
    pub orders: (u32, u32),
    pub items_per_order: (u32, u32),
    pub quantity: (u32, u32),
    pub discounts: &'static [(u32, u32)],
}

impl OrderProfile {
    pub fn for_customer(customer: &Customer) -> Self {
        match customer.segment {
            Segment::B2B => Self {
                orders: (12, 36),
                items_per_order: (3, 8),
                quantity: (10, 60),
                discounts: &B2B_DISCOUNTS,
            },
            Segment::D2C => Self {
                orders: match customer.status {
                    CustomerStatus::Active => (2, 10),
                    CustomerStatus::Churned => (1, 3),
                    CustomerStatus::AtRisk => (2, 7),
                },
                items_per_order: (1, 3),
                quantity: (1, 3),
                discounts: &D2C_DISCOUNTS,
            },
        }
    }
}

/// Generate every customer's order history against the catalog.
pub fn generate_orders(
    config: &GeneratorConfig,
    products: &[Product],
    customers: &[Customer],
    rng: &mut GenRng,
) -> GenResult<OrderBook> {
    if products.is_empty() {
        return Err(GenError::MissingInput {
            stage: "order",
            what: "products",
        });
    }
    if customers.is_empty() {
        return Err(GenError::MissingInput {
            stage: "order",
            what: "customers",
        });
    }

    log::info!("order: generating orders for {} customers", customers.len());
    let mut book = OrderBook::default();
    let mut seq: u64 = 1;

    for (i, customer) in customers.iter().enumerate() {
        if i % PROGRESS_EVERY == 0 {
            log::info!("order: processing customer {i}/{}", customers.len());
        }

        let profile = OrderProfile::for_customer(customer);
        let anchor = customer
            .acquisition_date
            .unwrap_or(config.fallback_acquisition_date);
        let (lo, hi) = profile.orders;
        let num_orders = rng.range_inclusive(lo, hi);

        for _ in 0..num_orders {
            generate_order(seq, customer, anchor, &profile, config, products, rng, &mut book)?;
            seq += 1;
        }
    }

    log::info!(
        "order: {} orders, {} line items",
        book.orders.len(),
        book.line_items.len()
    );
    Ok(book)
}

#[allow(clippy::too_many_arguments)]
fn generate_order(
    seq: u64,
    customer: &Customer,
    anchor: NaiveDate,
    profile: &OrderProfile,
    config: &GeneratorConfig,
    products: &[Product],
    rng: &mut GenRng,
    book: &mut OrderBook,
) -> GenResult<()> {
    let horizon = (config.window_end - anchor)
        .num_days()
        .min(config.max_order_horizon_days);
    let order_date = rng.date_between(anchor, anchor + Duration::days(horizon));

    let (lo, hi) = profile.items_per_order;
    let num_items = rng.range_inclusive(lo, hi);
    let mut picks: Vec<(&Product, u32)> = Vec::with_capacity(num_items as usize);
    for _ in 0..num_items {
        let product = &products[rng.next_u64_below(products.len() as u64) as usize];
        let (lo, hi) = profile.quantity;
        picks.push((product, rng.range_inclusive(lo, hi)));
    }

    let item_subtotals: Vec<Money> = picks.iter().map(|(p, q)| p.unit_price.times(*q)).collect();
    let subtotal: Money = item_subtotals.iter().copied().sum();
    let discount_percent = rng.weighted_pick(profile.discounts)?;
    let discount_amount = subtotal.percent_of(discount_percent);
    let revenue = subtotal - discount_amount;
    let total_cogs: Money = picks.iter().map(|(p, q)| p.avg_cogs.times(*q)).sum();
    let profit = revenue - total_cogs;

    let order_date = (!rng.chance(MISSING_ORDER_DATE_RATE)).then_some(order_date);
    let cogs_known = !rng.chance(MISSING_COGS_RATE);

    let order_id = format!("ORD{seq:07}");
    let item_discounts = allocate_proportionally(discount_amount, &item_subtotals);

    for (pos, ((product, quantity), (item_subtotal, item_discount))) in picks
        .iter()
        .zip(item_subtotals.iter().zip(item_discounts))
        .enumerate()
    {
        let item_revenue = *item_subtotal - item_discount;
        let item_cogs = product.avg_cogs.times(*quantity);
        book.line_items.push(LineItem {
            line_item_id: format!("LI{seq:07}_{}", pos + 1),
            order_id: order_id.clone(),
            customer_id: customer.customer_id.clone(),
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            category: product.category,
            quantity: *quantity,
            unit_price: product.unit_price,
            subtotal: *item_subtotal,
            discount_amount: item_discount,
            revenue: item_revenue,
            cogs: item_cogs,
            profit: item_revenue - item_cogs,
            order_date,
        });
    }

    book.orders.push(Order {
        order_id,
        customer_id: customer.customer_id.clone(),
        order_date,
        subtotal,
        discount_percent,
        discount_amount,
        revenue,
        total_cogs: cogs_known.then_some(total_cogs),
        profit: cogs_known.then_some(profit),
        num_items: picks.len(),
    });
    Ok(())
}

/// Split `total` across `shares` in proportion to each share's size.
///
/// Largest-remainder in cents: every part is within one cent of its exact
/// proportional value and the parts sum to `total` exactly. Leftover cents
/// go to the largest fractional remainders, earliest position first on ties.
pub fn allocate_proportionally(total: Money, shares: &[Money]) -> Vec<Money> {
    let denominator: i128 = shares.iter().map(|s| i128::from(s.cents())).sum();
    if denominator <= 0 {
        return vec![Money::ZERO; shares.len()];
    }
    let total_cents = i128::from(total.cents());

    let mut parts: Vec<i128> = Vec::with_capacity(shares.len());
    let mut remainders: Vec<(i128, usize)> = Vec::with_capacity(shares.len());
    for (i, share) in shares.iter().enumerate() {
        let exact = i128::from(share.cents()) * total_cents;
        parts.push(exact.div_euclid(denominator));
        remainders.push((exact.rem_euclid(denominator), i));
    }

    let mut leftover = total_cents - parts.iter().sum::<i128>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, i) in remainders {
        if leftover <= 0 {
            break;
        }
        parts[i] += 1;
        leftover -= 1;
    }

    parts
        .into_iter()
        .map(|cents| Money::from_cents(cents as i64))
        .collect()
}
