//! Production-planning MILP.
//!
//! A plant produces a catalog of products inside a shared time budget.
//! Each product consumes fixed amounts of raw materials, which can only be
//! purchased in whole lots. Producing a product at all costs a fixed
//! changeover time on top of its per-unit time. The goal is to pick
//! production quantities and lot purchases that maximize profit.
//!
//! The pipeline is parse ([`parser`]) → build and solve ([`model`], backed
//! by SCIP via `russcip`) → report ([`report`]).

pub mod model;
pub mod parser;
pub mod problem;
pub mod report;

pub use model::{PlanOutcome, PlanSolution, solve};
pub use parser::{ParseError, parse_file, parse_str};
pub use problem::{Material, Problem, Product};
