//! Application framework for hosting the table headlessly

mod framework;

pub use framework::{ScriptedEvent, SimulationRunner, TableApp};
