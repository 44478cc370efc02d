//! Hand gesture recognition

mod clap;

pub use clap::{ClapDetector, ClapKind};
