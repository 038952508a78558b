//! Scripted adapter for tests and batch callers: fixed inputs, recorded outputs.

use super::SimulatorUi;
use crate::compute::{CalcError, SimulatorInputs, SimulatorResults};

#[derive(Clone, Debug)]
pub struct ScriptedUi {
    inputs: SimulatorInputs,
    pub setup_calls: usize,
    pub displayed: Vec<SimulatorResults>,
}

impl ScriptedUi {
    pub fn new(inputs: SimulatorInputs) -> Self {
        Self {
            inputs,
            setup_calls: 0,
            displayed: Vec::new(),
        }
    }
}

impl SimulatorUi for ScriptedUi {
    type Error = CalcError;

    fn setup_page(&mut self) -> Result<(), CalcError> {
        self.setup_calls += 1;
        Ok(())
    }

    fn get_inputs(&mut self) -> Result<SimulatorInputs, CalcError> {
        Ok(self.inputs.clone())
    }

    fn display_results(&mut self, results: &SimulatorResults) -> Result<(), CalcError> {
        self.displayed.push(results.clone());
        Ok(())
    }
}
