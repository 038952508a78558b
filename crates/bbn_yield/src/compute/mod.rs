//! Yield calculator: inflation split, staking APYs, leveraged APR.

mod metrics;

pub use metrics::{bbn_split_for, evaluate, simulate, StakingSimulator, EVALUATION_VERSION};
pub use metrics::{
    CalcError, Evaluation, InputField, RewardBreakdown, SimulatorInputs, SimulatorResults,
};
