//! # threshold-rs: Threshold Logic Function Identification
//!
//! **`threshold-rs`** decides whether a Boolean function, given as a complete truth table,
//! is a *threshold function* and, if it is, computes a weight/threshold vector realizing it.
//!
//! ## What is a threshold function?
//!
//! A function `f(x₀, ..., xₙ₋₁)` is a threshold (linear) function if there are integer weights
//! `wᵢ` and a threshold `T` such that `f(x) = 1` exactly when `Σ wᵢxᵢ >= T`.
//! Such functions are implemented by a single threshold gate, which makes recognizing
//! them a basic step in threshold logic synthesis.
//!
//! ## How it works
//!
//! Identification runs three stages, each of which may stop early with a negative answer:
//!
//! 1. **Polarity normalization** ([`unate`]): every threshold function is unate. Binate
//!    functions are rejected, negative-unate inputs are complemented.
//! 2. **ILP formulation** ([`threshold::formulate`]): irredundant covers ([`isop`]) of the
//!    function and its complement become linear constraints on the weights.
//! 3. **Solving and translation** ([`lp`], [`simplex`], [`threshold::translate`]): the integer
//!    program is solved and the flips of stage 1 are undone on the resulting linear form.
//!
//! ## Basic Usage
//!
//! ```rust
//! use threshold_rs::threshold::identify_threshold;
//! use threshold_rs::truth_table::TruthTable;
//!
//! # fn main() -> threshold_rs::error::Result<()> {
//! // f = x₀ ∧ ¬x₁
//! let f = TruthTable::from_fn(2, |x| x[0] && !x[1]);
//!
//! let form = identify_threshold(&f)?.into_linear_form().unwrap();
//! assert_eq!(form.weights(), &[1, -1]);
//! assert_eq!(form.threshold(), 1);
//! assert!(form.realizes(&f));
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom solvers
//!
//! The integer program is handed to any [`lp::Solver`]. The built-in
//! [`simplex::ExactSolver`] uses exact rational arithmetic; other solvers can be
//! plugged in through [`threshold::identify_threshold_with`].
//!
//! ## Core Components
//!
//! - **[`truth_table`]**: Bit-packed truth tables with cofactors, flips and bitwise operators.
//! - **[`isop`]**: Irredundant sum-of-products covers.
//! - **[`threshold`]**: The identification pipeline.
//! - **[`linear_form`]**: Weight vectors and their evaluation.

pub mod config;
pub mod cube;
pub mod error;
pub mod isop;
pub mod linear_form;
pub mod lp;
pub mod simplex;
pub mod threshold;
pub mod truth_table;
pub mod unate;
