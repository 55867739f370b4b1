//! Mandatory government contributions.
//!
//! Each function takes the monthly base salary and returns the full
//! monthly amount owed by the employee.  Halving for a semi-monthly pay
//! period is the caller's job (see [`Contributions::split`]).
//!
//! PhilHealth is the odd one out: the premium is shared with the
//! employer, so [`phil_health_contribution`] already returns the
//! employee's half of it.

use crate::money::{round2, saturating_sum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Monthly salary credit floor for SSS.
pub const SSS_MSC_FLOOR: Decimal = dec!(5000);
/// Monthly salary credit cap for SSS.
pub const SSS_MSC_CAP: Decimal = dec!(35000);
/// Employee SSS rate on the salary credit.
pub const SSS_RATE: Decimal = dec!(0.05);

/// Lowest base the PhilHealth premium is computed on.
pub const PHILHEALTH_FLOOR: Decimal = dec!(10000);
/// Highest base the PhilHealth premium is computed on.
pub const PHILHEALTH_CAP: Decimal = dec!(100000);
/// Total PhilHealth premium rate, shared with the employer.
pub const PHILHEALTH_RATE: Decimal = dec!(0.05);

/// Pag-IBIG has a cap but no floor.
pub const PAGIBIG_CAP: Decimal = dec!(10000);
/// Employee Pag-IBIG rate on the capped base.
pub const PAGIBIG_RATE: Decimal = dec!(0.02);

const TWO: Decimal = dec!(2);

/// Social Security System contribution.
pub fn sss_contribution(monthly_basic: Decimal) -> Decimal {
    let msc = monthly_basic.clamp(SSS_MSC_FLOOR, SSS_MSC_CAP);
    round2(msc * SSS_RATE)
}

/// Employee share of the PhilHealth premium.
pub fn phil_health_contribution(monthly_basic: Decimal) -> Decimal {
    let base = monthly_basic.clamp(PHILHEALTH_FLOOR, PHILHEALTH_CAP);
    let total_premium = base * PHILHEALTH_RATE;
    round2(total_premium / TWO)
}

/// Pag-IBIG (HDMF) contribution.
pub fn pag_ibig_contribution(monthly_basic: Decimal) -> Decimal {
    let base = monthly_basic.min(PAGIBIG_CAP);
    round2(base * PAGIBIG_RATE)
}

/// The three contributions for one monthly base salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    pub sss: Decimal,
    pub phil_health: Decimal,
    pub pag_ibig: Decimal,
}

impl Contributions {
    /// Full monthly contributions for `monthly_basic`.
    pub fn monthly(monthly_basic: Decimal) -> Self {
        Self {
            sss: sss_contribution(monthly_basic),
            phil_health: phil_health_contribution(monthly_basic),
            pag_ibig: pag_ibig_contribution(monthly_basic),
        }
    }

    /// Per-period shares under the 15-30 split.  Each amount is halved
    /// again, so the PhilHealth share is a quarter of the total premium.
    pub fn split(&self) -> Self {
        Self {
            sss: round2(self.sss / TWO),
            phil_health: round2(self.phil_health / TWO),
            pag_ibig: round2(self.pag_ibig / TWO),
        }
    }

    /// Sum of the three amounts.
    pub fn total(&self) -> Decimal {
        saturating_sum([self.sss, self.phil_health, self.pag_ibig])
    }
}
