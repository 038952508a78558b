//! Report data structure (HTML is generated in bbn_yield_report crate).

use crate::compute::Evaluation;
use crate::fingerprint::{evaluation_fingerprint, FingerprintError};
use crate::params::InputParams;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Data passed to a presenter: the evaluation, the parameters as entered, and its fingerprint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportData {
    pub params: InputParams,
    pub evaluation: Evaluation,
    pub fingerprint_sha256: String,
    pub created_utc_rfc3339: String,
}

impl ReportData {
    /// `params` are shown as entered; `evaluation` must have been computed from them.
    pub fn new(params: InputParams, evaluation: Evaluation) -> Result<Self, FingerprintError> {
        Self::at(params, evaluation, OffsetDateTime::now_utc())
    }

    pub fn at(
        params: InputParams,
        evaluation: Evaluation,
        now: OffsetDateTime,
    ) -> Result<Self, FingerprintError> {
        let fingerprint_sha256 = evaluation_fingerprint(&evaluation)?;
        Ok(Self {
            params,
            evaluation,
            fingerprint_sha256,
            created_utc_rfc3339: now.format(&Rfc3339).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evaluate;
    use time::macros::datetime;

    #[test]
    fn report_data_carries_fingerprint_and_time() {
        let params = InputParams::default();
        let evaluation = evaluate(&params.to_inputs().unwrap()).unwrap();
        let expected = evaluation_fingerprint(&evaluation).unwrap();
        let data = ReportData::at(params, evaluation, datetime!(2024-08-22 12:00 UTC)).unwrap();
        assert_eq!(data.fingerprint_sha256, expected);
        assert_eq!(data.created_utc_rfc3339, "2024-08-22T12:00:00Z");
        assert_eq!(data.params.btc_split_pct, 50.0);
    }

    #[test]
    fn params_are_kept_as_entered() {
        let params = InputParams {
            inflation_rate_pct: 7.0,
            ..Default::default()
        };
        let evaluation = evaluate(&params.to_inputs().unwrap()).unwrap();
        let data = ReportData::new(params.clone(), evaluation).unwrap();
        assert_eq!(data.params, params);
        assert_eq!(data.params.inflation_rate_pct.to_string(), "7");
    }
}
