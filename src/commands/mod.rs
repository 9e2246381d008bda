//! CLI command implementations.
//!
//! Available commands:
//! - **calculate**: Load a project, run the risk calculation and write a report
//! - **phases**: Print the review phase applicability table
//! - **init**: Initialize a new swrisk configuration file

pub mod calculate;
pub mod init;
pub mod phases;

pub use calculate::{handle_calculate, CalculateConfig};
pub use init::init_config;
pub use phases::write_phase_table;
