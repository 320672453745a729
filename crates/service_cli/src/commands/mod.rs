//! CLI command implementations

pub mod batch;
pub mod check;
pub mod dividend;
pub mod inputs;
pub mod output;
pub mod price;
