//! Golden-file regression harness.
//!
//! A batch flows strictly downstream: [`discovery`] finds the cases,
//! [`engine`] runs the subject program once per case, [`evaluator`]
//! classifies each captured output and [`reporter`] prints the summary.
//! [`executor`] is the glue that drives one batch.

pub mod cli;
pub mod discovery;
pub mod engine;
pub mod evaluator;
pub mod executor;
pub mod reporter;
