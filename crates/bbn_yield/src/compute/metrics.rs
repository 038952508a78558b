//! Closed-form yield metrics: inflation reward split, BTC/BBN APY, leveraged APR.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Named scalar input, used to point errors at the offending field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    Tvl,
    Fdv,
    StakingRatio,
    BbnPrice,
    TotalBbn,
    InflationRate,
    BtcSplit,
    BbnSplit,
    BtcStakingApr,
    Lrt2RewardsApr,
    EstimatedS4AddedApr,
    CollateralYield,
    BorrowCost,
    LtvRatio,
    MaxLeverage,
}

impl InputField {
    pub fn name(self) -> &'static str {
        match self {
            InputField::Tvl => "TVL",
            InputField::Fdv => "FDV",
            InputField::StakingRatio => "StakingRatio",
            InputField::BbnPrice => "BBNPrice",
            InputField::TotalBbn => "TotalBBN",
            InputField::InflationRate => "InflationRate",
            InputField::BtcSplit => "BTCSplit",
            InputField::BbnSplit => "BBNSplit",
            InputField::BtcStakingApr => "btc_staking_apr",
            InputField::Lrt2RewardsApr => "lrt2_rewards_apr",
            InputField::EstimatedS4AddedApr => "estimated_s4_added_apr",
            InputField::CollateralYield => "collateral_yield",
            InputField::BorrowCost => "borrow_cost",
            InputField::LtvRatio => "ltv_ratio",
            InputField::MaxLeverage => "max_leverage",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid input: {field} is zero and is used as a divisor")]
    InvalidInput { field: InputField },
    #[error("{output} is not finite ({value})")]
    NonFinite { output: &'static str, value: f64 },
}

/// One evaluation's inputs. `inflation_rate` is a fraction; splits, APRs and
/// `ltv_ratio` are percentages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorInputs {
    pub tvl: f64,
    pub fdv: f64,
    pub staking_ratio: f64,
    pub bbn_price: f64,
    pub total_bbn: f64,
    pub inflation_rate: f64,
    pub btc_split: f64,
    pub bbn_split: f64,
    pub btc_staking_apr: f64,
    pub lrt2_rewards_apr: f64,
    /// Collected for interface compatibility; no output depends on it.
    pub estimated_s4_added_apr: f64,
    pub collateral_yield: f64,
    pub borrow_cost: f64,
    /// Collected for interface compatibility; no output depends on it.
    pub ltv_ratio: f64,
    pub max_leverage: f64,
}

/// The five headline outputs, all in percent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorResults {
    pub btc_apy: f64,
    pub bbn_apy: f64,
    pub apr_without_s4: f64,
    pub net_apr_without_s4: f64,
    pub leveraged_apr_without_s4: f64,
}

/// Intermediate reward figures behind the headline yields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Staked BBN (tokens).
    pub s_staked: f64,
    /// Annual inflation reward (USD).
    pub r_inf: f64,
    /// Inflation reward routed to BTC stakers (USD).
    pub r_btc: f64,
    /// Inflation reward routed to BBN stakers (USD).
    pub r_bbn: f64,
    /// BTC share of TVL (USD).
    pub t_btc: f64,
    /// USD value of staked BBN.
    pub v_bbn: f64,
}

/// Everything one evaluation produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub version: u32,
    pub inputs: SimulatorInputs,
    pub breakdown: RewardBreakdown,
    pub results: SimulatorResults,
}

pub const EVALUATION_VERSION: u32 = 1;

/// BBN side of the inflation split.
pub fn bbn_split_for(btc_split: f64) -> f64 {
    100.0 - btc_split
}

/// Formula set over a borrowed input record. Every method is pure.
#[derive(Clone, Copy, Debug)]
pub struct StakingSimulator<'a> {
    inputs: &'a SimulatorInputs,
}

impl<'a> StakingSimulator<'a> {
    pub fn new(inputs: &'a SimulatorInputs) -> Self {
        Self { inputs }
    }

    pub fn s_staked(&self) -> f64 {
        self.inputs.total_bbn * self.inputs.staking_ratio
    }

    pub fn r_inf(&self) -> f64 {
        self.inputs.inflation_rate * self.inputs.total_bbn * self.inputs.bbn_price
    }

    pub fn r_btc(&self) -> f64 {
        self.r_inf() * self.inputs.btc_split / 100.0
    }

    pub fn r_bbn(&self) -> f64 {
        self.r_inf() * self.inputs.bbn_split / 100.0
    }

    pub fn t_btc(&self) -> f64 {
        self.inputs.tvl * self.inputs.btc_split / 100.0
    }

    pub fn v_bbn(&self) -> f64 {
        self.s_staked() * self.inputs.bbn_price
    }

    /// BTC staker APY in percent. `btc_split` is already a percentage, so no `* 100`.
    pub fn btc_apy(&self) -> Result<f64, CalcError> {
        let i = self.inputs;
        if i.tvl == 0.0 {
            return Err(CalcError::InvalidInput {
                field: InputField::Tvl,
            });
        }
        finite(
            "btc_apy",
            i.btc_split * i.inflation_rate * i.total_bbn * i.bbn_price / i.tvl,
        )
    }

    /// BBN staker APY in percent.
    pub fn bbn_apy(&self) -> Result<f64, CalcError> {
        let v_bbn = self.v_bbn();
        if v_bbn == 0.0 {
            return Err(CalcError::InvalidInput {
                field: self.zero_v_bbn_factor(),
            });
        }
        finite("bbn_apy", self.r_bbn() / v_bbn * 100.0)
    }

    pub fn apr_without_s4(&self) -> f64 {
        self.inputs.btc_staking_apr + self.inputs.lrt2_rewards_apr + self.inputs.collateral_yield
    }

    pub fn net_apr_without_s4(&self) -> f64 {
        self.apr_without_s4() - self.inputs.borrow_cost
    }

    pub fn leveraged_apr_without_s4(&self) -> f64 {
        self.net_apr_without_s4() * self.inputs.max_leverage
    }

    pub fn breakdown(&self) -> RewardBreakdown {
        RewardBreakdown {
            s_staked: self.s_staked(),
            r_inf: self.r_inf(),
            r_btc: self.r_btc(),
            r_bbn: self.r_bbn(),
            t_btc: self.t_btc(),
            v_bbn: self.v_bbn(),
        }
    }

    pub fn results(&self) -> Result<SimulatorResults, CalcError> {
        Ok(SimulatorResults {
            btc_apy: self.btc_apy()?,
            bbn_apy: self.bbn_apy()?,
            apr_without_s4: self.apr_without_s4(),
            net_apr_without_s4: self.net_apr_without_s4(),
            leveraged_apr_without_s4: self.leveraged_apr_without_s4(),
        })
    }

    fn zero_v_bbn_factor(&self) -> InputField {
        if self.inputs.bbn_price == 0.0 {
            InputField::BbnPrice
        } else if self.inputs.total_bbn == 0.0 {
            InputField::TotalBbn
        } else {
            InputField::StakingRatio
        }
    }
}

fn finite(output: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite { output, value })
    }
}

/// Compute the five headline outputs.
pub fn simulate(inputs: &SimulatorInputs) -> Result<SimulatorResults, CalcError> {
    StakingSimulator::new(inputs).results()
}

/// Compute outputs and intermediate figures in one record.
pub fn evaluate(inputs: &SimulatorInputs) -> Result<Evaluation, CalcError> {
    let sim = StakingSimulator::new(inputs);
    let results = sim.results()?;
    let breakdown = sim.breakdown();
    debug!(
        btc_apy = results.btc_apy,
        bbn_apy = results.bbn_apy,
        leveraged_apr_without_s4 = results.leveraged_apr_without_s4,
        "evaluated scenario"
    );
    Ok(Evaluation {
        version: EVALUATION_VERSION,
        inputs: inputs.clone(),
        breakdown,
        results,
    })
}
