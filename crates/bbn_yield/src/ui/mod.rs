//! Presentation boundary: collect a scenario, show its results.
//!
//! One adapter per medium. Terminal and scripted adapters live here; the HTML
//! page lives in the bbn_yield_report crate.

mod scripted;
mod text;

pub use scripted::ScriptedUi;
pub use text::{TextUi, UiError};

use crate::compute::{simulate, CalcError, SimulatorInputs, SimulatorResults};

pub const PAGE_TITLE: &str = "Staking Simulator for Bitcoin and Babylon Stakers";

pub trait SimulatorUi {
    type Error: From<CalcError>;

    fn setup_page(&mut self) -> Result<(), Self::Error>;

    fn get_inputs(&mut self) -> Result<SimulatorInputs, Self::Error>;

    fn display_results(&mut self, results: &SimulatorResults) -> Result<(), Self::Error>;
}

/// setup -> collect -> compute -> display.
pub fn run_simulation<U: SimulatorUi + ?Sized>(ui: &mut U) -> Result<SimulatorResults, U::Error> {
    ui.setup_page()?;
    let inputs = ui.get_inputs()?;
    let results = simulate(&inputs)?;
    ui.display_results(&results)?;
    Ok(results)
}

/// Percent with three decimals, e.g. `10.000%`.
pub fn format_pct(value: f64) -> String {
    format!("{:.3}%", value)
}

/// Display label and value for each output, in presentation order.
pub fn result_lines(results: &SimulatorResults) -> [(&'static str, f64); 5] {
    [
        ("BTC APR", results.btc_apy),
        ("BBN APR", results.bbn_apy),
        ("Total APR Without S4", results.apr_without_s4),
        ("Net APR Without S4", results.net_apr_without_s4),
        ("Leveraged APR Without S4", results.leveraged_apr_without_s4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_three_decimals() {
        assert_eq!(format_pct(10.0), "10.000%");
        assert_eq!(format_pct(4.84), "4.840%");
        assert_eq!(format_pct(-2.7912), "-2.791%");
    }

    #[test]
    fn result_lines_order() {
        let r = SimulatorResults {
            btc_apy: 1.0,
            bbn_apy: 2.0,
            apr_without_s4: 3.0,
            net_apr_without_s4: 4.0,
            leveraged_apr_without_s4: 5.0,
        };
        let lines = result_lines(&r);
        assert_eq!(lines[0], ("BTC APR", 1.0));
        assert_eq!(lines[4], ("Leveraged APR Without S4", 5.0));
    }
}
