//! kikapu-gen: generate the Kikapu Naturals synthetic dataset.
//!
//! Usage:
//!   kikapu-gen --seed 42 --out ./kikapu_data
//!   kikapu-gen --seed 7 --d2c 1000 --b2b 20 --window-end 2024-06-30
//!   kikapu-gen --config run.json --stats-json

use anyhow::Result;
use chrono::NaiveDate;
use kikapu_core::{
    config::GeneratorConfig,
    export::{write_dataset, write_table},
    pipeline::{generate_seeded, Dataset},
};
use std::env;
use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let preview = parse_arg(&args, "--preview", 5usize);
    let stats_json = args.iter().any(|a| a == "--stats-json");
    let out_dir = string_arg(&args, "--out").unwrap_or("./kikapu_data");

    let mut config = match string_arg(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    config.num_d2c = parse_arg(&args, "--d2c", config.num_d2c);
    config.num_b2b = parse_arg(&args, "--b2b", config.num_b2b);
    config.d2c_acquisition_start =
        parse_arg::<NaiveDate>(&args, "--d2c-start", config.d2c_acquisition_start);
    config.b2b_acquisition_start =
        parse_arg::<NaiveDate>(&args, "--b2b-start", config.b2b_acquisition_start);
    config.window_end = parse_arg::<NaiveDate>(&args, "--window-end", config.window_end);

    let rule = "=".repeat(60);
    println!("{rule}");
    println!("Kikapu Naturals - Dataset Generation");
    println!("{rule}");
    println!("  seed:      {seed}");
    println!("  d2c:       {}", config.num_d2c);
    println!("  b2b:       {}", config.num_b2b);
    println!("  window:    {} to {}", config.d2c_acquisition_start, config.window_end);
    println!("  out:       {out_dir}");
    println!();

    let dataset = generate_seeded(&config, seed)?;
    let stats = dataset.stats(&config);

    println!("{stats}");
    println!();

    let written = write_dataset(Path::new(out_dir), &dataset)?;
    log::info!("kikapu-gen: wrote {} files to {out_dir}", written.len());
    for path in &written {
        println!("  saved {}", path.display());
    }
    println!();

    println!("{}", dataset.quality_report());

    if preview > 0 {
        print_preview(&dataset, preview)?;
    }

    if stats_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

fn print_preview(dataset: &Dataset, rows: usize) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "\nSample Data Preview:")?;

    writeln!(out, "\n--- Products ---")?;
    write_table(&mut out, head(&dataset.products, rows))?;
    writeln!(out, "\n--- Customers (first {rows}) ---")?;
    write_table(&mut out, head(&dataset.customers, rows))?;
    writeln!(out, "\n--- Orders (first {rows}) ---")?;
    write_table(&mut out, head(&dataset.orders, rows))?;
    writeln!(out, "\n--- Order Line Items (first {rows}) ---")?;
    write_table(&mut out, head(&dataset.line_items, rows))?;
    Ok(())
}

fn head<T>(rows: &[T], n: usize) -> &[T] {
    &rows[..n.min(rows.len())]
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
