//! Read-only summaries over generated tables: headline statistics and
//! the data-quality report.

use crate::{
    config::GeneratorConfig,
    customer::Customer,
    order::{LineItem, Order},
    types::{CustomerStatus, Money, Segment},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub active: usize,
    pub churned: usize,
    pub at_risk: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetStats {
    pub total_customers: usize,
    pub d2c_customers: usize,
    pub b2b_customers: usize,
    pub d2c_by_status: StatusBreakdown,
    pub total_orders: usize,
    pub total_line_items: usize,
    pub total_revenue: Money,
    pub date_range_start: NaiveDate,
    pub date_range_end: NaiveDate,
}

impl DatasetStats {
    pub fn compute(
        config: &GeneratorConfig,
        customers: &[Customer],
        orders: &[Order],
        line_items: &[LineItem],
    ) -> Self {
        let mut d2c_by_status = StatusBreakdown::default();
        let mut b2b_customers = 0;
        for c in customers {
            match (c.segment, c.status) {
                (Segment::B2B, _) => b2b_customers += 1,
                (Segment::D2C, CustomerStatus::Active) => d2c_by_status.active += 1,
                (Segment::D2C, CustomerStatus::Churned) => d2c_by_status.churned += 1,
                (Segment::D2C, CustomerStatus::AtRisk) => d2c_by_status.at_risk += 1,
            }
        }

        Self {
            total_customers: customers.len(),
            d2c_customers: customers.len() - b2b_customers,
            b2b_customers,
            d2c_by_status,
            total_orders: orders.len(),
            total_line_items: line_items.len(),
            total_revenue: orders.iter().map(|o| o.revenue).sum(),
            date_range_start: config.d2c_acquisition_start,
            date_range_end: config.window_end,
        }
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "Generation Complete - Dataset Statistics")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total Customers:     {}", with_commas(self.total_customers as u64))?;
        writeln!(f, "  - D2C Customers:   {}", with_commas(self.d2c_customers as u64))?;
        writeln!(f, "      Active:        {}", with_commas(self.d2c_by_status.active as u64))?;
        writeln!(f, "      Churned:       {}", with_commas(self.d2c_by_status.churned as u64))?;
        writeln!(f, "      At Risk:       {}", with_commas(self.d2c_by_status.at_risk as u64))?;
        writeln!(f, "  - B2B Clients:     {}", with_commas(self.b2b_customers as u64))?;
        writeln!(f, "Total Orders:        {}", with_commas(self.total_orders as u64))?;
        writeln!(f, "Total Line Items:    {}", with_commas(self.total_line_items as u64))?;
        writeln!(f, "Total Revenue:       ${}", money_with_commas(self.total_revenue))?;
        writeln!(
            f,
            "Date Range:          {} to {}",
            self.date_range_start, self.date_range_end
        )?;
        write!(f, "{rule}")
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct QualityReport {
    pub customers: usize,
    pub missing_acquisition_dates: usize,
    pub missing_channels: usize,
    pub orders: usize,
    pub missing_order_dates: usize,
    pub missing_cogs: usize,
    pub missing_profit: usize,
}

impl QualityReport {
    pub fn compute(customers: &[Customer], orders: &[Order]) -> Self {
        Self {
            customers: customers.len(),
            missing_acquisition_dates: customers
                .iter()
                .filter(|c| c.acquisition_date.is_none())
                .count(),
            missing_channels: customers.iter().filter(|c| c.channel.is_none()).count(),
            orders: orders.len(),
            missing_order_dates: orders.iter().filter(|o| o.order_date.is_none()).count(),
            missing_cogs: orders.iter().filter(|o| o.total_cogs.is_none()).count(),
            missing_profit: orders.iter().filter(|o| o.profit.is_none()).count(),
        }
    }

    pub fn missing_acquisition_date_pct(&self) -> f64 {
        percent(self.missing_acquisition_dates, self.customers)
    }

    pub fn missing_channel_pct(&self) -> f64 {
        percent(self.missing_channels, self.customers)
    }

    pub fn missing_order_date_pct(&self) -> f64 {
        percent(self.missing_order_dates, self.orders)
    }

    pub fn missing_cogs_pct(&self) -> f64 {
        percent(self.missing_cogs, self.orders)
    }

    pub fn missing_profit_pct(&self) -> f64 {
        percent(self.missing_profit, self.orders)
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "Data Quality Report")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "CUSTOMERS:")?;
        writeln!(
            f,
            "  - Missing acquisition dates: {} ({:.2}%)",
            self.missing_acquisition_dates,
            self.missing_acquisition_date_pct()
        )?;
        writeln!(
            f,
            "  - Missing channels: {} ({:.2}%)",
            self.missing_channels,
            self.missing_channel_pct()
        )?;
        writeln!(f)?;
        writeln!(f, "ORDERS:")?;
        writeln!(
            f,
            "  - Missing order dates: {} ({:.2}%)",
            self.missing_order_dates,
            self.missing_order_date_pct()
        )?;
        writeln!(
            f,
            "  - Missing COGS: {} ({:.2}%)",
            self.missing_cogs,
            self.missing_cogs_pct()
        )?;
        writeln!(
            f,
            "  - Missing profit: {} ({:.2}%)",
            self.missing_profit,
            self.missing_profit_pct()
        )?;
        writeln!(f)?;
        writeln!(f, "NOTE: These data quality issues are intentional and reflect")?;
        writeln!(f, "real-world fragmented data scenarios.")?;
        write!(f, "{rule}")
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn money_with_commas(amount: Money) -> String {
    let sign = if amount.cents() < 0 { "-" } else { "" };
    let abs = amount.cents().unsigned_abs();
    format!("{sign}{}.{:02}", with_commas(abs / 100), abs % 100)
}
