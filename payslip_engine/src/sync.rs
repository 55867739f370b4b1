//! Outbound payroll notification payload.
//!
//! A [`SyncEnvelope`] wraps the payroll state and its totals with a
//! timestamp and company metadata.  Delivering it is up to the caller;
//! the engine never waits on, retries, or reacts to the outcome.

use crate::engine::PayrollRules;
use crate::models::{PayrollState, Totals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPANY: &str = "Fillenial Digital Marketing Services";
pub const DEFAULT_VERSION: &str = "25.1";

/// Identifies the sender of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMetadata {
    pub company: String,
    pub version: String,
}

impl Default for SyncMetadata {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

/// The payload posted to sync collaborators after a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEnvelope {
    pub timestamp: DateTime<Utc>,
    pub metadata: SyncMetadata,
    pub payroll_data: PayrollState,
    pub calculations: Totals,
}

impl SyncEnvelope {
    /// Wraps `state` together with its freshly computed totals.
    pub fn new(
        state: PayrollState,
        rules: &PayrollRules,
        metadata: SyncMetadata,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let calculations = state.totals(rules);
        Self {
            timestamp,
            metadata,
            payroll_data: state,
            calculations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PayslipRequest;
    use crate::models::EmployeeProfile;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_envelope_shape() {
        let rules = PayrollRules::default();
        let state = PayslipRequest {
            employee: EmployeeProfile {
                name: "Maria Santos".into(),
                pay_period_start: "2025-06-01".into(),
                pay_period_end: "2025-06-15".into(),
                basic_monthly_pay: dec!(75000),
                ..EmployeeProfile::default()
            },
            ..PayslipRequest::default()
        }
        .into_state(&rules);
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap();

        let envelope = SyncEnvelope::new(state, &rules, SyncMetadata::default(), timestamp);
        assert_eq!(envelope.calculations.tax, dec!(4834.38));

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["timestamp"], "2025-06-15T09:30:00Z");
        assert_eq!(json["metadata"]["company"], DEFAULT_COMPANY);
        assert_eq!(json["metadata"]["version"], "25.1");
        assert_eq!(json["payrollData"]["employee"]["name"], "Maria Santos");
        assert_eq!(json["payrollData"]["attendance"]["totalDutyDays"], 11);
        assert!(json["calculations"]["netPay"].is_number());
    }
}
