//! Input collector record: scenario parameters in the units a user enters them,
//! their defaults and the basic range constraints.

use crate::compute::{bbn_split_for, InputField, SimulatorInputs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{field} must be a finite number")]
    NotFinite { field: InputField },
    #[error("{field} = {value} is outside {}", describe_range(.min, .max))]
    OutOfRange {
        field: InputField,
        value: f64,
        min: f64,
        max: Option<f64>,
    },
}

fn describe_range(min: &f64, max: &Option<f64>) -> String {
    match max {
        Some(max) => format!("[{}, {}]", min, max),
        None => format!("[{}, +inf)", min),
    }
}

/// Scenario parameters. Percent-valued fields are 0..=100; `staking_ratio` is a fraction.
/// Missing fields in a JSON scenario take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputParams {
    pub tvl: f64,
    pub fdv: f64,
    pub staking_ratio: f64,
    pub bbn_price: f64,
    pub total_bbn: f64,
    pub inflation_rate_pct: f64,
    pub btc_split_pct: f64,
    pub btc_staking_apr: f64,
    pub lrt2_rewards_apr: f64,
    pub estimated_s4_added_apr: f64,
    pub collateral_yield: f64,
    pub borrow_cost: f64,
    pub ltv_ratio: f64,
    pub max_leverage: f64,
}

impl Default for InputParams {
    fn default() -> Self {
        Self {
            tvl: 10_000_000_000.0,
            fdv: 4_000_000_000.0,
            staking_ratio: 0.4,
            bbn_price: 0.4,
            total_bbn: 10_000_000_000.0,
            inflation_rate_pct: 8.0,
            btc_split_pct: 50.0,
            btc_staking_apr: 1.6,
            lrt2_rewards_apr: 0.6,
            estimated_s4_added_apr: 0.5,
            collateral_yield: 0.01,
            borrow_cost: 1.0,
            ltv_ratio: 75.0,
            max_leverage: 4.0,
        }
    }
}

/// How one parameter is presented and bounded.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub field: InputField,
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
    pub step: f64,
}

const fn spec(
    field: InputField,
    label: &'static str,
    min: f64,
    max: Option<f64>,
    step: f64,
) -> FieldSpec {
    FieldSpec {
        field,
        label,
        min,
        max,
        step,
    }
}

/// Every collected parameter in display order. `BBNSplit` is derived and not listed.
pub const FIELD_SPECS: [FieldSpec; 14] = [
    spec(InputField::Tvl, "Total Value Locked (TVL) in USD", 0.0, None, 1.0),
    spec(InputField::Fdv, "Fully Diluted Value (FDV) in USD", 0.0, None, 1.0),
    spec(InputField::StakingRatio, "Staking Ratio", 0.0, Some(1.0), 0.01),
    spec(InputField::BbnPrice, "Price of 1 BBN token in USD", 0.0, None, 0.01),
    spec(InputField::TotalBbn, "Total supply of BBN tokens", 0.0, None, 1.0),
    spec(InputField::InflationRate, "Annual Inflation Rate (%)", 0.0, Some(100.0), 0.1),
    spec(InputField::BtcSplit, "BTC Split (%)", 0.0, Some(100.0), 0.1),
    spec(InputField::BtcStakingApr, "BTC Staking APR (%)", 0.0, None, 0.01),
    spec(InputField::Lrt2RewardsApr, "LRT2 Rewards APR (%)", 0.0, None, 0.01),
    spec(InputField::EstimatedS4AddedApr, "Estimated S4 Added APR (%)", 0.0, None, 0.01),
    spec(InputField::CollateralYield, "Collateral Yield (%)", 0.0, None, 0.01),
    spec(InputField::BorrowCost, "Borrow Cost (%)", 0.0, None, 0.01),
    spec(InputField::LtvRatio, "Loan-to-Value Ratio (LTV)", 0.0, Some(100.0), 0.1),
    spec(InputField::MaxLeverage, "Max Leverage", 1.0, None, 0.1),
];

impl InputParams {
    /// Value of a field in user units (`InflationRate` in percent).
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Tvl => self.tvl,
            InputField::Fdv => self.fdv,
            InputField::StakingRatio => self.staking_ratio,
            InputField::BbnPrice => self.bbn_price,
            InputField::TotalBbn => self.total_bbn,
            InputField::InflationRate => self.inflation_rate_pct,
            InputField::BtcSplit => self.btc_split_pct,
            InputField::BbnSplit => bbn_split_for(self.btc_split_pct),
            InputField::BtcStakingApr => self.btc_staking_apr,
            InputField::Lrt2RewardsApr => self.lrt2_rewards_apr,
            InputField::EstimatedS4AddedApr => self.estimated_s4_added_apr,
            InputField::CollateralYield => self.collateral_yield,
            InputField::BorrowCost => self.borrow_cost,
            InputField::LtvRatio => self.ltv_ratio,
            InputField::MaxLeverage => self.max_leverage,
        }
    }

    fn slot_mut(&mut self, field: InputField) -> Option<&mut f64> {
        Some(match field {
            InputField::Tvl => &mut self.tvl,
            InputField::Fdv => &mut self.fdv,
            InputField::StakingRatio => &mut self.staking_ratio,
            InputField::BbnPrice => &mut self.bbn_price,
            InputField::TotalBbn => &mut self.total_bbn,
            InputField::InflationRate => &mut self.inflation_rate_pct,
            InputField::BtcSplit => &mut self.btc_split_pct,
            InputField::BbnSplit => return None,
            InputField::BtcStakingApr => &mut self.btc_staking_apr,
            InputField::Lrt2RewardsApr => &mut self.lrt2_rewards_apr,
            InputField::EstimatedS4AddedApr => &mut self.estimated_s4_added_apr,
            InputField::CollateralYield => &mut self.collateral_yield,
            InputField::BorrowCost => &mut self.borrow_cost,
            InputField::LtvRatio => &mut self.ltv_ratio,
            InputField::MaxLeverage => &mut self.max_leverage,
        })
    }

    /// Replace every field given a `Some` value; `None` keeps the current one.
    /// `BBNSplit` is derived and cannot be overridden.
    pub fn apply_overrides(
        &mut self,
        overrides: impl IntoIterator<Item = (InputField, Option<f64>)>,
    ) {
        for (field, value) in overrides {
            if let (Some(v), Some(slot)) = (value, self.slot_mut(field)) {
                *slot = v;
            }
        }
    }

    /// Check finiteness and the per-field bounds in [`FIELD_SPECS`].
    pub fn validate(&self) -> Result<(), ParamsError> {
        for spec in &FIELD_SPECS {
            let value = self.get(spec.field);
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { field: spec.field });
            }
            let above_max = spec.max.is_some_and(|max| value > max);
            if value < spec.min || above_max {
                return Err(ParamsError::OutOfRange {
                    field: spec.field,
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }

    /// Validate, then convert to calculator units.
    pub fn to_inputs(&self) -> Result<SimulatorInputs, ParamsError> {
        self.validate()?;
        Ok(SimulatorInputs {
            tvl: self.tvl,
            fdv: self.fdv,
            staking_ratio: self.staking_ratio,
            bbn_price: self.bbn_price,
            total_bbn: self.total_bbn,
            inflation_rate: self.inflation_rate_pct / 100.0,
            btc_split: self.btc_split_pct,
            bbn_split: bbn_split_for(self.btc_split_pct),
            btc_staking_apr: self.btc_staking_apr,
            lrt2_rewards_apr: self.lrt2_rewards_apr,
            estimated_s4_added_apr: self.estimated_s4_added_apr,
            collateral_yield: self.collateral_yield,
            borrow_cost: self.borrow_cost,
            ltv_ratio: self.ltv_ratio,
            max_leverage: self.max_leverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_convert_to_calculator_units() {
        let inputs = InputParams::default().to_inputs().unwrap();
        assert!((inputs.inflation_rate - 0.08).abs() < 1e-12);
        assert_eq!(inputs.btc_split, 50.0);
        assert_eq!(inputs.bbn_split, 50.0);
        assert_eq!(inputs.max_leverage, 4.0);
        assert_eq!(inputs.ltv_ratio, 75.0);
    }

    #[test]
    fn bbn_split_is_derived() {
        let params = InputParams {
            btc_split_pct: 30.0,
            ..Default::default()
        };
        let inputs = params.to_inputs().unwrap();
        assert_eq!(inputs.bbn_split, 70.0);
        assert_eq!(params.get(InputField::BbnSplit), 70.0);
    }

    #[test]
    fn staking_ratio_above_one_rejected() {
        let params = InputParams {
            staking_ratio: 1.5,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            ParamsError::OutOfRange {
                field: InputField::StakingRatio,
                ..
            }
        ));
        assert_eq!(err.to_string(), "StakingRatio = 1.5 is outside [0, 1]");
    }

    #[test]
    fn leverage_below_one_rejected() {
        let params = InputParams {
            max_leverage: 0.5,
            ..Default::default()
        };
        let err = params.to_inputs().unwrap_err();
        assert_eq!(err.to_string(), "max_leverage = 0.5 is outside [1, +inf)");
    }

    #[test]
    fn negative_apr_rejected() {
        let params = InputParams {
            borrow_cost: -0.1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn nan_rejected() {
        let params = InputParams {
            bbn_price: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotFinite {
                field: InputField::BbnPrice
            })
        );
    }

    #[test]
    fn zero_tvl_passes_range_check() {
        let params = InputParams {
            tvl: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut params = InputParams {
            tvl: 5e9,
            borrow_cost: 2.0,
            ..Default::default()
        };
        params.apply_overrides([
            (InputField::Tvl, Some(7e9)),
            (InputField::InflationRate, Some(12.0)),
            (InputField::BorrowCost, None),
            (InputField::BbnSplit, Some(90.0)),
        ]);
        assert_eq!(params.tvl, 7e9);
        assert_eq!(params.inflation_rate_pct, 12.0);
        assert_eq!(params.borrow_cost, 2.0);
        assert_eq!(params.btc_split_pct, 50.0);
        assert_eq!(params.get(InputField::BbnSplit), 50.0);
    }

    #[test]
    fn every_collected_field_can_be_overridden() {
        let mut params = InputParams::default();
        params.apply_overrides(FIELD_SPECS.iter().map(|s| (s.field, Some(s.min + 0.5))));
        for spec in &FIELD_SPECS {
            assert_eq!(params.get(spec.field), spec.min + 0.5, "{}", spec.field);
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: InputParams = serde_json::from_str(r#"{"tvl": 5e9}"#).unwrap();
        assert_eq!(params.tvl, 5e9);
        assert_eq!(params.max_leverage, 4.0);
    }
}
