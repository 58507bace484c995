//! Flat-file export of a generated dataset.
//!
//! RULE: Only export.rs touches the filesystem.
//! Files already written are left in place if a later write fails.

use crate::{error::GenResult, pipeline::Dataset};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const PRODUCTS_FILE: &str = "kikapu_products.csv";
pub const CUSTOMERS_FILE: &str = "kikapu_customers.csv";
pub const ORDERS_FILE: &str = "kikapu_orders.csv";
pub const LINE_ITEMS_FILE: &str = "kikapu_order_line_items.csv";

/// Serialize `rows` as CSV with a header row taken from the field names.
pub fn write_table<W: Write, T: Serialize>(writer: W, rows: &[T]) -> GenResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write all four tables into `dir`, creating it if needed.
/// Returns the written paths in write order.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> GenResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    log::info!("export: writing dataset to {}", dir.display());

    let written = vec![
        write_file(&dir.join(PRODUCTS_FILE), &dataset.products)?,
        write_file(&dir.join(CUSTOMERS_FILE), &dataset.customers)?,
        write_file(&dir.join(ORDERS_FILE), &dataset.orders)?,
        write_file(&dir.join(LINE_ITEMS_FILE), &dataset.line_items)?,
    ];
    Ok(written)
}

fn write_file<T: Serialize>(path: &Path, rows: &[T]) -> GenResult<PathBuf> {
    let file = File::create(path)?;
    write_table(BufWriter::new(file), rows)?;
    log::debug!("export: wrote {} rows to {}", rows.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;

    #[test]
    fn product_table_has_header_and_ten_rows() {
        let mut buf = Vec::new();
        write_table(&mut buf, &build_catalog()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "product_id,category,name,unit_price,avg_cogs,active_since");
        assert_eq!(lines[1], "P001,Beverage,Organic Green Tea,18.99,8.50,2021-03-01");
        assert_eq!(lines[7], "P007,Personal Care,Natural Face Serum,39.99,18.00,2022-06-01");
    }
}
