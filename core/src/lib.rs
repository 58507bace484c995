//! Synthetic CPG business dataset generator: product catalog, D2C and B2B
//! customers, and their orders and line items, with injected missing data.

pub mod catalog;
pub mod config;
pub mod customer;
pub mod error;
pub mod export;
pub mod order;
pub mod pipeline;
pub mod report;
pub mod rng;
pub mod types;
