use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Trade finance day-count basis.
pub const DAYS_IN_YEAR: Decimal = dec!(360);
/// Every month counts as 30 days under the 30/360 basis.
pub const DAYS_PER_MONTH: u32 = 30;
pub const MONTHS_IN_YEAR: Decimal = dec!(12);

/// How interest on the advance accrues over the tenor.
///
/// Both conventions appear in factoring term sheets. They agree for whole
/// months in exact arithmetic, but the day-count path materializes a daily
/// rate first, so the two are never mixed inside one computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestConvention {
    /// advance x annual rate x (months / 12)
    #[default]
    SimpleAnnual,
    /// advance x (annual rate / 360) x (months x 30)
    DayCount30360,
}

impl InterestConvention {
    /// Interest accrued on `principal` for `tenor_months`, or `None` when the
    /// amount is not representable as a Decimal.
    pub fn accrue(self, principal: Money, annual_rate: Rate, tenor_months: u32) -> Option<Money> {
        match self {
            InterestConvention::SimpleAnnual => principal
                .checked_mul(annual_rate)?
                .checked_mul(Decimal::from(tenor_months))?
                .checked_div(MONTHS_IN_YEAR),
            InterestConvention::DayCount30360 => {
                let daily_rate = annual_rate / DAYS_IN_YEAR;
                principal
                    .checked_mul(daily_rate)?
                    .checked_mul(tenor_days_exact(tenor_months))
            }
        }
    }
}

impl std::fmt::Display for InterestConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterestConvention::SimpleAnnual => write!(f, "Simple annual (months/12)"),
            InterestConvention::DayCount30360 => write!(f, "Day count 30/360"),
        }
    }
}

impl std::str::FromStr for InterestConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', '/'], "").as_str() {
            "simple" | "simpleannual" => Ok(InterestConvention::SimpleAnnual),
            "daycount" | "daycount30360" | "30360" => Ok(InterestConvention::DayCount30360),
            _ => Err(format!(
                "Unknown interest convention '{s}'. Expected one of: simple-annual, day-count"
            )),
        }
    }
}

/// Tenor in days on a 30/360 basis, as reported. Saturates at `u32::MAX`;
/// calculations use [`tenor_days_exact`].
pub fn tenor_days(tenor_months: u32) -> u32 {
    tenor_months.saturating_mul(DAYS_PER_MONTH)
}

/// Tenor in days on a 30/360 basis, exact for every `u32` month count.
pub fn tenor_days_exact(tenor_months: u32) -> Decimal {
    Decimal::from(tenor_months) * Decimal::from(DAYS_PER_MONTH)
}

/// Inputs for one factoring calculation.
///
/// Built once per calculation and never mutated. The `with_*` helpers return
/// a new value, which is how scenario sweeps vary a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionParameters {
    /// Cash advanced to the client.
    pub advance_amount: Money,
    /// Fraction of the total receivable that is advanced, in (0, 1].
    pub advance_rate: Rate,
    /// Service fee as a fraction of the total receivable.
    pub service_fee_rate: Rate,
    /// Nominal annual discount (interest) rate, as a fraction.
    pub discount_rate_annual: Rate,
    /// Duration of the factoring period.
    pub tenor_months: u32,
    #[serde(default)]
    pub interest_convention: InterestConvention,
}

impl TransactionParameters {
    pub fn new(
        advance_amount: Money,
        advance_rate: Rate,
        service_fee_rate: Rate,
        discount_rate_annual: Rate,
        tenor_months: u32,
    ) -> Self {
        Self {
            advance_amount,
            advance_rate,
            service_fee_rate,
            discount_rate_annual,
            tenor_months,
            interest_convention: InterestConvention::default(),
        }
    }

    pub fn with_convention(self, interest_convention: InterestConvention) -> Self {
        Self {
            interest_convention,
            ..self
        }
    }

    pub fn with_tenor_months(self, tenor_months: u32) -> Self {
        Self {
            tenor_months,
            ..self
        }
    }

    pub fn with_discount_rate(self, discount_rate_annual: Rate) -> Self {
        Self {
            discount_rate_annual,
            ..self
        }
    }
}
