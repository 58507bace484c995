//! Structural and financial invariants over a generated dataset.

use kikapu_core::{
    config::GeneratorConfig,
    order::{LineItem, Order},
    pipeline::{generate_seeded, Dataset},
    types::{Money, Segment},
};
use std::collections::{HashMap, HashSet};

fn dataset(seed: u64) -> Dataset {
    let config = GeneratorConfig {
        num_d2c: 1_500,
        num_b2b: 30,
        ..GeneratorConfig::default()
    };
    generate_seeded(&config, seed).unwrap()
}

fn items_by_order(line_items: &[LineItem]) -> HashMap<&str, Vec<&LineItem>> {
    let mut map: HashMap<&str, Vec<&LineItem>> = HashMap::new();
    for li in line_items {
        map.entry(li.order_id.as_str()).or_default().push(li);
    }
    map
}

fn segments(dataset: &Dataset) -> HashMap<&str, Segment> {
    dataset
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.segment))
        .collect()
}

#[test]
fn customer_ids_are_unique_and_segment_prefixed() {
    let ds = dataset(1);
    let mut seen = HashSet::new();
    for c in &ds.customers {
        assert!(seen.insert(c.customer_id.clone()), "duplicate {}", c.customer_id);
        assert!(c.customer_id.starts_with(c.segment.id_prefix()));
        let digits = &c.customer_id[1..];
        let width = match c.segment {
            Segment::D2C => 6,
            Segment::B2B => 5,
        };
        assert_eq!(digits.len(), width, "{}", c.customer_id);
        assert!(digits.chars().all(|ch| ch.is_ascii_digit()));
    }
}

#[test]
fn order_and_line_item_ids_increase_monotonically() {
    let ds = dataset(2);
    let numbers: Vec<u64> = ds
        .orders
        .iter()
        .map(|o| o.order_id.trim_start_matches("ORD").parse().unwrap())
        .collect();
    assert_eq!(numbers[0], 1);
    for pair in numbers.windows(2) {
        assert_eq!(pair[1], pair[0] + 1, "order sequence gap after {}", pair[0]);
    }

    let mut previous: Option<(u64, usize)> = None;
    for li in &ds.line_items {
        let (order, pos) = li
            .line_item_id
            .trim_start_matches("LI")
            .split_once('_')
            .unwrap();
        let key = (order.parse::<u64>().unwrap(), pos.parse::<usize>().unwrap());
        assert_eq!(format!("ORD{order}"), li.order_id);
        if let Some(prev) = previous {
            assert!(key > prev, "{} not after {:?}", li.line_item_id, prev);
        }
        previous = Some(key);
    }
}

#[test]
fn order_financials_are_consistent() {
    let ds = dataset(3);
    for o in &ds.orders {
        assert_eq!(o.discount_amount, o.subtotal.percent_of(o.discount_percent), "{}", o.order_id);
        assert_eq!(o.revenue, o.subtotal - o.discount_amount, "{}", o.order_id);
        match (o.total_cogs, o.profit) {
            (Some(cogs), Some(profit)) => assert_eq!(profit, o.revenue - cogs, "{}", o.order_id),
            (None, None) => {}
            _ => panic!("{}: COGS and profit must be null together", o.order_id),
        }
    }
}

#[test]
fn discount_tiers_come_from_segment_tables() {
    let ds = dataset(4);
    let segments = segments(&ds);
    for o in &ds.orders {
        let allowed: &[u32] = match segments[o.customer_id.as_str()] {
            Segment::B2B => &[0, 5, 10, 15, 20],
            Segment::D2C => &[0, 10, 15],
        };
        assert!(allowed.contains(&o.discount_percent), "{}: {}%", o.order_id, o.discount_percent);
    }
}

#[test]
fn line_items_reproduce_order_totals() {
    let ds = dataset(5);
    let by_order = items_by_order(&ds.line_items);
    for o in &ds.orders {
        let items = &by_order[o.order_id.as_str()];
        assert_eq!(items.len(), o.num_items, "{}", o.order_id);

        let subtotal: Money = items.iter().map(|li| li.subtotal).sum();
        let discount: Money = items.iter().map(|li| li.discount_amount).sum();
        let revenue: Money = items.iter().map(|li| li.revenue).sum();
        let cogs: Money = items.iter().map(|li| li.cogs).sum();
        assert_eq!(subtotal, o.subtotal, "{}", o.order_id);
        assert_eq!(discount, o.discount_amount, "{}", o.order_id);
        assert_eq!(revenue, o.revenue, "{}", o.order_id);
        if let Some(total_cogs) = o.total_cogs {
            assert_eq!(cogs, total_cogs, "{}", o.order_id);
        }
    }
}

#[test]
fn line_item_discount_is_proportional_to_subtotal_share() {
    let ds = dataset(6);
    let orders: HashMap<&str, &Order> = ds.orders.iter().map(|o| (o.order_id.as_str(), o)).collect();
    for li in &ds.line_items {
        let o = orders[li.order_id.as_str()];
        let exact = li.subtotal.as_f64() / o.subtotal.as_f64() * o.discount_amount.as_f64();
        assert!(
            (li.discount_amount.as_f64() - exact).abs() < 0.01 + 1e-9,
            "{}: {} vs exact {exact:.4}",
            li.line_item_id,
            li.discount_amount
        );
        assert_eq!(li.subtotal, li.unit_price.times(li.quantity));
        assert_eq!(li.revenue, li.subtotal - li.discount_amount);
        assert_eq!(li.profit, li.revenue - li.cogs);
    }
}

#[test]
fn line_items_inherit_order_date_and_customer() {
    let ds = dataset(7);
    let orders: HashMap<&str, &Order> = ds.orders.iter().map(|o| (o.order_id.as_str(), o)).collect();
    for li in &ds.line_items {
        let o = orders[li.order_id.as_str()];
        assert_eq!(li.order_date, o.order_date, "{}", li.line_item_id);
        assert_eq!(li.customer_id, o.customer_id, "{}", li.line_item_id);
    }
}

#[test]
fn basket_shapes_follow_segment() {
    let ds = dataset(8);
    let segments = segments(&ds);
    let products: HashSet<&str> = ds.products.iter().map(|p| p.product_id.as_str()).collect();
    for o in &ds.orders {
        let items = match segments[o.customer_id.as_str()] {
            Segment::B2B => 3..=8,
            Segment::D2C => 1..=3,
        };
        assert!(items.contains(&o.num_items), "{}: {} items", o.order_id, o.num_items);
    }
    for li in &ds.line_items {
        assert!(products.contains(li.product_id.as_str()));
        let quantity = match segments[li.customer_id.as_str()] {
            Segment::B2B => 10..=60,
            Segment::D2C => 1..=3,
        };
        assert!(quantity.contains(&li.quantity), "{}: qty {}", li.line_item_id, li.quantity);
    }
}

#[test]
fn order_level_null_rates_are_plausible() {
    let ds = dataset(9);
    let report = ds.quality_report();
    assert_eq!(report.missing_cogs, report.missing_profit);
    assert!(report.missing_cogs_pct() > 1.5 && report.missing_cogs_pct() < 4.5,
        "missing COGS {:.2}%", report.missing_cogs_pct());
    assert!(report.missing_order_date_pct() < 1.5,
        "missing order dates {:.2}%", report.missing_order_date_pct());
}
