use crate::error::{GenError, GenResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters of one generation run. Everything else (weight tables,
/// order-count ranges, null-injection rates) is fixed in the stage modules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_d2c: usize,
    pub num_b2b: usize,
    pub d2c_acquisition_start: NaiveDate,
    pub b2b_acquisition_start: NaiveDate,
    /// Last day of both acquisition windows; no order is dated after it.
    pub window_end: NaiveDate,
    /// Lower bound for order dates when a customer's acquisition date
    /// has been nulled.
    pub fallback_acquisition_date: NaiveDate,
    /// Orders fall at most this many days after acquisition.
    pub max_order_horizon_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_d2c: 50_000,
            num_b2b: 200,
            d2c_acquisition_start: ymd(2022, 1, 1),
            b2b_acquisition_start: ymd(2021, 6, 1),
            window_end: ymd(2024, 11, 30),
            fallback_acquisition_date: ymd(2023, 1, 1),
            max_order_horizon_days: 730,
        }
    }
}

impl GeneratorConfig {
    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Small population for use in tests.
    pub fn default_test() -> Self {
        Self {
            num_d2c: 100,
            num_b2b: 5,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.num_d2c + self.num_b2b == 0 {
            return Err(GenError::InvalidConfig(
                "at least one customer is required".into(),
            ));
        }
        if self.d2c_acquisition_start > self.window_end {
            return Err(GenError::InvalidConfig(format!(
                "D2C window starts {} after it ends {}",
                self.d2c_acquisition_start, self.window_end
            )));
        }
        if self.b2b_acquisition_start > self.window_end {
            return Err(GenError::InvalidConfig(format!(
                "B2B window starts {} after it ends {}",
                self.b2b_acquisition_start, self.window_end
            )));
        }
        if self.fallback_acquisition_date > self.window_end {
            return Err(GenError::InvalidConfig(format!(
                "fallback acquisition date {} is after the window end {}",
                self.fallback_acquisition_date, self.window_end
            )));
        }
        if self.max_order_horizon_days < 0 {
            return Err(GenError::InvalidConfig(
                "max_order_horizon_days must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
