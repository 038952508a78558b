//! Plain-text presenter for terminals.

use super::{format_pct, result_lines, SimulatorUi, PAGE_TITLE};
use crate::compute::{CalcError, SimulatorInputs, SimulatorResults};
use crate::params::{InputParams, ParamsError};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("params: {0}")]
    Params(#[from] ParamsError),
    #[error("calc: {0}")]
    Calc(#[from] CalcError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Takes already-collected parameters, writes the results to `out`.
pub struct TextUi<W: Write> {
    params: InputParams,
    out: W,
}

impl<W: Write> TextUi<W> {
    pub fn new(params: InputParams, out: W) -> Self {
        Self { params, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SimulatorUi for TextUi<W> {
    type Error = UiError;

    fn setup_page(&mut self) -> Result<(), UiError> {
        writeln!(self.out, "{}", PAGE_TITLE)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn get_inputs(&mut self) -> Result<SimulatorInputs, UiError> {
        Ok(self.params.to_inputs()?)
    }

    fn display_results(&mut self, results: &SimulatorResults) -> Result<(), UiError> {
        writeln!(self.out, "Results")?;
        for (label, value) in result_lines(results) {
            writeln!(self.out, "  {}: {}", label, format_pct(value))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
