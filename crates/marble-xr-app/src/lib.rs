//! Headless host for the marble table
//!
//! Plays scripted host events into a [`MarbleTable`] through the
//! fixed-step runner and reports what the table did.

pub mod scenario;
pub mod table;

pub use scenario::{run_scenario, Scenario, ScenarioReport};
pub use table::{MarbleTable, TableState, TableStats};
