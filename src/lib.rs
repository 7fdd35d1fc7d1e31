//! Financial calculator suite: compound growth, debt payoff, withdrawal
//! depletion, IRA deduction phase-out, and the summation calculators,
//! served as JSON endpoints by the `api` module.

pub mod api;
pub mod core;
