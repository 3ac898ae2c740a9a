//! Closed-form linear models built on the Newton–Schulz inverses.
//!
//! Both fits append a column of ones to the design matrix, so the returned
//! weight vector has `n_features + 1` entries with the intercept last.

mod regression;

#[cfg(test)]
mod tests;

pub use regression::{linear_regression, ridge};
