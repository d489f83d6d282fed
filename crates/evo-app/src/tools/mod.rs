//! Built-in utility tools: calculator, unit converter, password checker.
//!
//! These run locally and never touch the model or the transcript.

pub mod calc;
pub mod convert;
pub mod password;
