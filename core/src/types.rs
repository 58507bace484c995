//! Shared primitive types used across every generation stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// A stable, unique identifier for any generated record.
pub type EntityId = String;

/// Customer segment. Drives every per-customer distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Segment {
    D2C,
    B2B,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D2C => "D2C",
            Self::B2B => "B2B",
        }
    }

    /// Leading character of every customer id in this segment.
    pub fn id_prefix(&self) -> char {
        match self {
            Self::D2C => 'C',
            Self::B2B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Beverage,
    Snack,
    Supplement,
    #[serde(rename = "Personal Care")]
    PersonalCare,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beverage => "Beverage",
            Self::Snack => "Snack",
            Self::Supplement => "Supplement",
            Self::PersonalCare => "Personal Care",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CustomerStatus {
    Active,
    Churned,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Churned => "Churned",
            Self::AtRisk => "At Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Channel {
    #[serde(rename = "Paid Ads")]
    PaidAds,
    #[serde(rename = "Organic Social")]
    OrganicSocial,
    Email,
    Referral,
    #[serde(rename = "SEO")]
    Seo,
    Sales,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Country {
    US,
    UK,
    CA,
    AU,
    DE,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountTier {
    Enterprise,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    #[serde(rename = "SMB")]
    Smb,
}

/// A monetary amount in whole cents.
///
/// Every money column is computed in cents, so rounding to two decimals
/// happens exactly once, at the point a fractional amount is produced
/// (see [`Money::percent_of`]). Serializes as a fixed two-decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Round a dollar amount half away from zero to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn times(&self, quantity: u32) -> Self {
        Money(self.0 * i64::from(quantity))
    }

    /// `percent`% of this amount, rounded half-up to the cent.
    pub fn percent_of(&self, percent: u32) -> Self {
        let scaled = self.0 * i64::from(percent);
        Money((scaled + scaled.signum() * 50) / 100)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
