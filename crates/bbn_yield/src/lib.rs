//! bbn_yield — staking yield simulator for Bitcoin and Babylon (BBN) stakers.
//!
//! Single-point evaluation of closed-form APR/APY formulas: inflation reward
//! split between BTC and BBN stakers, plus leveraged external yield.

pub mod compute;
pub mod config;
pub mod fingerprint;
pub mod params;
pub mod report;
pub mod ui;

pub use compute::{evaluate, simulate, CalcError, Evaluation, SimulatorInputs, SimulatorResults};
pub use config::ScenarioConfig;
pub use fingerprint::evaluation_fingerprint;
pub use params::InputParams;
pub use report::ReportData;
pub use ui::{run_simulation, SimulatorUi};
