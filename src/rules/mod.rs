//! Rule Definitions
//!
//! Concrete checks grouped by the kind of document they inspect, and the
//! registry that assembles them into per-kind rule sets.

pub mod compile;
pub mod java;
pub mod manifest;
pub mod markdown;
pub mod registry;
pub mod yaml;

pub use registry::RuleRegistry;
