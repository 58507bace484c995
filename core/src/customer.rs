//! Customer population: D2C consumers followed by B2B accounts.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    rng::GenRng,
    types::{AccountTier, Channel, Country, CustomerStatus, EntityId, Segment},
};
use chrono::NaiveDate;
use serde::Serialize;

pub const MISSING_ACQUISITION_DATE_RATE: f64 = 0.02;
pub const MISSING_CHANNEL_RATE: f64 = 0.01;

const PROGRESS_EVERY: usize = 10_000;

// Cohort-age churn tiers: (max age in days, exclusive; status weights).
static STATUS_BY_COHORT_AGE: [(i64, [(CustomerStatus, u32); 3]); 2] = [
    (90, [(CustomerStatus::Active, 80), (CustomerStatus::Churned, 15), (CustomerStatus::AtRisk, 5)]),
    (365, [(CustomerStatus::Active, 60), (CustomerStatus::Churned, 30), (CustomerStatus::AtRisk, 10)]),
];
static STATUS_MATURE: [(CustomerStatus, u32); 3] = [
    (CustomerStatus::Active, 40),
    (CustomerStatus::Churned, 50),
    (CustomerStatus::AtRisk, 10),
];

const D2C_CHANNELS: [(Channel, u32); 6] = [
    (Channel::PaidAds, 30),
    (Channel::OrganicSocial, 25),
    (Channel::Email, 15),
    (Channel::Referral, 12),
    (Channel::Seo, 15),
    (Channel::Sales, 3),
];

const D2C_COUNTRIES: [(Country, u32); 5] = [
    (Country::US, 50),
    (Country::UK, 20),
    (Country::CA, 15),
    (Country::AU, 10),
    (Country::DE, 5),
];

const B2B_COUNTRIES: [(Country, u32); 5] = [
    (Country::US, 40),
    (Country::UK, 30),
    (Country::CA, 15),
    (Country::AU, 10),
    (Country::DE, 5),
];

const B2B_TIERS: [(AccountTier, u32); 3] = [
    (AccountTier::Enterprise, 20),
    (AccountTier::MidMarket, 50),
    (AccountTier::Smb, 30),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Customer {
    pub customer_id: EntityId,
    pub segment: Segment,
    pub acquisition_date: Option<NaiveDate>,
    pub channel: Option<Channel>,
    pub country: Country,
    pub status: CustomerStatus,
    pub company_name: Option<String>,
    pub account_tier: Option<AccountTier>,
}

/// Generate `num_d2c` D2C customers then `num_b2b` B2B customers.
pub fn generate_customers(config: &GeneratorConfig, rng: &mut GenRng) -> GenResult<Vec<Customer>> {
    let mut customers = Vec::with_capacity(config.num_d2c + config.num_b2b);

    log::info!("customer: generating {} D2C customers", config.num_d2c);
    for n in 1..=config.num_d2c {
        if n % PROGRESS_EVERY == 0 {
            log::info!("customer: generated {n}/{} D2C customers", config.num_d2c);
        }
        customers.push(generate_d2c(n, config, rng)?);
    }

    log::info!("customer: generating {} B2B customers", config.num_b2b);
    for n in 1..=config.num_b2b {
        customers.push(generate_b2b(n, config, rng)?);
    }

    log::info!("customer: {} customers total", customers.len());
    Ok(customers)
}

/// Status weights for a customer acquired `cohort_age_days` before the window end.
pub fn status_weights(cohort_age_days: i64) -> &'static [(CustomerStatus, u32); 3] {
    STATUS_BY_COHORT_AGE
        .iter()
        .find(|(max_age, _)| cohort_age_days < *max_age)
        .map(|(_, weights)| weights)
        .unwrap_or(&STATUS_MATURE)
}

fn generate_d2c(n: usize, config: &GeneratorConfig, rng: &mut GenRng) -> GenResult<Customer> {
    let acquired = rng.date_between(config.d2c_acquisition_start, config.window_end);
    let cohort_age = (config.window_end - acquired).num_days();
    let status = rng.weighted_pick(status_weights(cohort_age))?;
    let channel = rng.weighted_pick(&D2C_CHANNELS)?;
    let country = rng.weighted_pick(&D2C_COUNTRIES)?;

    // The true values above already shaped the record; only the
    // persisted copies are blanked.
    let acquisition_date = (!rng.chance(MISSING_ACQUISITION_DATE_RATE)).then_some(acquired);
    let channel = (!rng.chance(MISSING_CHANNEL_RATE)).then_some(channel);

    Ok(Customer {
        customer_id: format!("C{n:06}"),
        segment: Segment::D2C,
        acquisition_date,
        channel,
        country,
        status,
        company_name: None,
        account_tier: None,
    })
}

fn generate_b2b(n: usize, config: &GeneratorConfig, rng: &mut GenRng) -> GenResult<Customer> {
    let acquired = rng.date_between(config.b2b_acquisition_start, config.window_end);
    let country = rng.weighted_pick(&B2B_COUNTRIES)?;
    let tier = rng.weighted_pick(&B2B_TIERS)?;

    Ok(Customer {
        customer_id: format!("B{n:05}"),
        segment: Segment::B2B,
        acquisition_date: Some(acquired),
        channel: Some(Channel::Sales),
        country,
        status: CustomerStatus::Active,
        company_name: Some(format!("Business Customer {n}")),
        account_tier: Some(tier),
    })
}
