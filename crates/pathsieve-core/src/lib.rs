//! pathsieve-core: Core types, configuration, logging, and path filtering for pathsieve.

pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod paths;
pub mod pattern;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{Candidate, ExclusionFilter, FileKind};
pub use pattern::{PatternSet, WildcardPattern};
