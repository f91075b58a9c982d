//! Threshold logic function identification.
//!
//! A Boolean function is a threshold function (TF) if it can be written as
//!
//! ```text
//! f(x₀, ..., xₙ₋₁) = [ Σ wᵢxᵢ >= T ]
//! ```
//!
//! for integer weights `wᵢ` and threshold `T`. The vector `[w₀, ..., wₙ₋₁; T]`
//! is a *linear form* of `f`.
//!
//! ## Pipeline
//!
//! 1. [`normalize`][crate::unate::normalize] rejects binate functions and
//!    flips negative-unate inputs, giving a positive-unate function `f⁺`.
//! 2. [`formulate`] covers `f⁺` and `¬f⁺` with ISOPs and turns every cube into
//!    one ILP row over columns `w₀..wₙ₋₁, T`:
//!    - on-set cube: `Σ{wᵢ : cube has xᵢ} - T >= 0`
//!    - off-set cube: `Σ{wᵢ : cube does not have ¬xᵢ} - T <= -1`
//!
//!    The objective minimizes the sum of all columns.
//! 3. The [`Solver`] optimizes the model.
//! 4. [`translate`] reads the solution back and undoes the input flips so
//!    the form is valid for the original function.
//!
//! ```
//! use threshold_rs::threshold::{identify_threshold, Identification};
//! use threshold_rs::truth_table::TruthTable;
//!
//! # fn main() -> threshold_rs::error::Result<()> {
//! let maj = TruthTable::from_hex_str(3, "e8")?;
//! match identify_threshold(&maj)? {
//!     Identification::Threshold(form) => assert_eq!(form.to_string(), "[1, 1, 1; 2]"),
//!     Identification::NotThreshold => unreachable!(),
//! }
//!
//! let xor = TruthTable::from_binary_str(2, "0110")?;
//! assert_eq!(identify_threshold(&xor)?, Identification::NotThreshold);
//! # Ok(())
//! # }
//! ```

use log::{debug, trace};

use crate::cube::Cube;
use crate::error::{Error, Result};
use crate::isop::isop;
use crate::linear_form::LinearForm;
use crate::lp::{Model, Relation, Sense, SolveStatus, Solver};
use crate::simplex::ExactSolver;
use crate::truth_table::TruthTable;
use crate::unate::{normalize, Normalization, PositiveUnate, Unateness};

/// Result of identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    /// The function is not a threshold function.
    NotThreshold,
    /// The function is a threshold function realized by the given form.
    Threshold(LinearForm),
}

impl Identification {
    /// Returns `true` for [`Identification::Threshold`].
    pub fn is_threshold(&self) -> bool {
        matches!(self, Identification::Threshold(_))
    }

    /// The realizing form, if any.
    pub fn linear_form(&self) -> Option<&LinearForm> {
        match self {
            Identification::Threshold(form) => Some(form),
            Identification::NotThreshold => None,
        }
    }

    /// Consumes the result and returns the realizing form, if any.
    pub fn into_linear_form(self) -> Option<LinearForm> {
        match self {
            Identification::Threshold(form) => Some(form),
            Identification::NotThreshold => None,
        }
    }
}

/// A model built by [`formulate`], ready to be optimized.
#[derive(Debug)]
pub struct Formulation<M> {
    pub model: M,
    /// Rows coming from the on-set cover.
    pub on_rows: usize,
    /// Rows coming from the off-set cover.
    pub off_rows: usize,
}

/// Identifies `tt` with the built-in [`ExactSolver`].
pub fn identify_threshold(tt: &TruthTable) -> Result<Identification> {
    identify_threshold_with(tt, &mut ExactSolver::default())
}

/// Returns `true` iff `tt` is a threshold function.
pub fn is_threshold(tt: &TruthTable) -> Result<bool> {
    Ok(identify_threshold(tt)?.is_threshold())
}

/// Identifies `tt` using `solver` for the integer program.
///
/// The model is owned by this call and dropped on every return path,
/// including faults while rows are being added.
pub fn identify_threshold_with<S: Solver>(
    tt: &TruthTable,
    solver: &mut S,
) -> Result<Identification> {
    let positive = match normalize(tt) {
        Normalization::Binate { var } => {
            debug!("identify: {:?} is binate in x{}", tt, var);
            return Ok(Identification::NotThreshold);
        }
        Normalization::Unate(positive) => positive,
    };

    let Formulation {
        mut model,
        on_rows,
        off_rows,
    } = formulate(solver, &positive)?;
    debug!(
        "identify: {:?} formulated with {} on-set and {} off-set rows",
        tt, on_rows, off_rows
    );

    let status = model.optimize();
    let result = translate(&model, status, &positive)?;
    debug!("identify: {:?} -> {:?}", tt, result);
    Ok(result)
}

/// Builds the ILP for the positive-unate function `positive.table`.
///
/// Columns `0..n` are the weights, column `n` is the threshold. Variables
/// classified [`Unateness::Independent`] never appear in any row.
pub fn formulate<S: Solver>(
    solver: &mut S,
    positive: &PositiveUnate,
) -> Result<Formulation<S::Model>> {
    let num_vars = positive.table.num_vars();
    let threshold = num_vars;
    let on_cubes = isop(&positive.table);
    let off_cubes = isop(&!&positive.table);

    let mut model = solver.create_model(num_vars + 1)?;
    let mut row = Vec::with_capacity(num_vars + 1);

    for cube in &on_cubes {
        on_set_row(cube, num_vars, &mut row);
        row.push((threshold, -1));
        trace!("on-set cube {} -> {:?} >= 0", cube.to_string_with(num_vars), row);
        model.add_constraint(&row, Relation::GreaterEq, 0)?;
    }

    for cube in &off_cubes {
        off_set_row(cube, &positive.classes, &mut row);
        row.push((threshold, -1));
        trace!("off-set cube {} -> {:?} <= -1", cube.to_string_with(num_vars), row);
        model.add_constraint(&row, Relation::LessEq, -1)?;
    }

    row.clear();
    row.extend((0..=num_vars).map(|column| (column, 1)));
    model.set_objective(&row, Sense::Minimize)?;

    Ok(Formulation {
        model,
        on_rows: on_cubes.len(),
        off_rows: off_cubes.len(),
    })
}

/// Weights of the positive literals of an on-set cube.
fn on_set_row(cube: &Cube, num_vars: usize, row: &mut Vec<(usize, i64)>) {
    row.clear();
    row.extend(
        (0..num_vars)
            .filter(|&i| cube.get_mask(i) && cube.get_bit(i))
            .map(|i| (i, 1)),
    );
}

/// Weights of every influential variable an off-set cube does not fix to 0.
///
/// Free variables range over both values, so they count with the worst
/// case `xᵢ = 1`.
fn off_set_row(cube: &Cube, classes: &[Unateness], row: &mut Vec<(usize, i64)>) {
    row.clear();
    row.extend(
        classes
            .iter()
            .enumerate()
            .filter(|&(i, class)| {
                *class != Unateness::Independent && (!cube.get_mask(i) || cube.get_bit(i))
            })
            .map(|(i, _)| (i, 1)),
    );
}

/// Turns the solver outcome into an [`Identification`] for the original function.
///
/// Any status without a solution means the function is not a threshold
/// function. The solution is a form of the positive-unate function; each
/// flipped input is undone with [`LinearForm::flip_inplace`]. The result is
/// not re-simulated against the truth table; see [`LinearForm::realizes`].
pub fn translate<M: Model>(
    model: &M,
    status: SolveStatus,
    positive: &PositiveUnate,
) -> Result<Identification> {
    if !status.has_solution() {
        debug!("translate: solver status {:?}", status);
        return Ok(Identification::NotThreshold);
    }

    let mut values = model.solution()?;
    let num_vars = positive.table.num_vars();
    if values.len() != num_vars + 1 {
        return Err(Error::Solution {
            reason: format!("expected {} values, got {}", num_vars + 1, values.len()),
        });
    }
    let threshold = values.pop().unwrap_or_default();
    // Inputs the function ignores keep weight 0 whatever the solver returned.
    for (weight, class) in values.iter_mut().zip(&positive.classes) {
        if *class == Unateness::Independent {
            *weight = 0;
        }
    }
    let mut form = LinearForm::new(values, threshold);
    trace!("translate: positive-unate form {}", form);

    for &var in &positive.flipped {
        form.flip_inplace(var);
    }
    Ok(Identification::Threshold(form))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::config::SolverConfig;
    use crate::truth_table::named;

    fn identify(tt: &TruthTable) -> Option<LinearForm> {
        identify_threshold(tt).unwrap().into_linear_form()
    }

    #[test]
    fn test_majority3() {
        let form = identify(&named::majority(3)).unwrap();
        assert_eq!(form, LinearForm::new(vec![1, 1, 1], 2));
    }

    #[test]
    fn test_xor() {
        let xor = TruthTable::from_binary_str(2, "0110").unwrap();
        assert_eq!(identify_threshold(&xor).unwrap(), Identification::NotThreshold);
        assert!(!is_threshold(&xor).unwrap());
    }

    #[test]
    fn test_unate_non_threshold() {
        // x₀x₁ + x₂x₃ is positive unate but not linearly separable.
        let f = TruthTable::from_fn(4, |x| (x[0] && x[1]) || (x[2] && x[3]));
        assert!(matches!(normalize(&f), Normalization::Unate(_)));
        assert_eq!(identify(&f), None);
    }

    #[test]
    fn test_constants() {
        let zero = identify(&TruthTable::zero(3)).unwrap();
        assert_eq!(zero, LinearForm::new(vec![0, 0, 0], 1));

        let one = identify(&TruthTable::one(3)).unwrap();
        assert_eq!(one, LinearForm::new(vec![0, 0, 0], 0));

        assert_eq!(identify(&TruthTable::zero(0)).unwrap(), LinearForm::new(vec![], 1));
        assert_eq!(identify(&TruthTable::one(0)).unwrap(), LinearForm::new(vec![], 0));
    }

    #[test]
    fn test_negative_unate() {
        // x₀ ∧ ¬x₁
        let f = TruthTable::from_fn(2, |x| x[0] && !x[1]);
        let form = identify(&f).unwrap();
        assert_eq!(form, LinearForm::new(vec![1, -1], 1));
        assert!(form.realizes(&f));

        // NOR(x₀, x₁, x₂)
        let nor = !named::or_all(3);
        let form = identify(&nor).unwrap();
        assert_eq!(form, LinearForm::new(vec![-1, -1, -1], 0));
        assert!(form.realizes(&nor));
    }

    #[test]
    fn test_independent_variable_weight_is_zero() {
        // x₀ ∨ x₂ over three variables; x₁ has no influence.
        let f = TruthTable::from_fn(3, |x| x[0] || x[2]);
        let form = identify(&f).unwrap();
        assert_eq!(form.weights()[1], 0);
        assert_eq!(form, LinearForm::new(vec![1, 0, 1], 1));
    }

    #[test]
    fn test_formulation_rows() {
        let Normalization::Unate(positive) = normalize(&named::majority(3)) else {
            panic!("majority is unate");
        };
        let mut solver = ExactSolver::default();
        let formulation = formulate(&mut solver, &positive).unwrap();
        assert_eq!(formulation.on_rows, 3);
        assert_eq!(formulation.off_rows, 3);
        assert_eq!(formulation.model.num_rows(), 6);
        assert_eq!(formulation.model.num_columns(), 4);
    }

    #[test]
    fn test_row_construction() {
        let classes = vec![Unateness::Positive, Unateness::Independent, Unateness::Positive];
        let mut row = Vec::new();

        // x₀ x₂
        let cube = Cube::from_literals(&[Some(true), None, Some(true)]);
        on_set_row(&cube, 3, &mut row);
        assert_eq!(row, vec![(0, 1), (2, 1)]);

        // ¬x₀: x₂ is free and counts, x₁ is independent and does not.
        let cube = Cube::from_literals(&[Some(false), None, None]);
        off_set_row(&cube, &classes, &mut row);
        assert_eq!(row, vec![(2, 1)]);
    }

    #[test]
    fn test_translate_status() {
        let Normalization::Unate(positive) = normalize(&named::and_all(2)) else {
            panic!("AND is unate");
        };
        let mut solver = ExactSolver::default();
        let formulation = formulate(&mut solver, &positive).unwrap();
        for status in [SolveStatus::Infeasible, SolveStatus::Unbounded, SolveStatus::Aborted] {
            assert_eq!(
                translate(&formulation.model, status, &positive).unwrap(),
                Identification::NotThreshold
            );
        }
        // Claiming success without a solution is a fault, not a classification.
        assert!(matches!(
            translate(&formulation.model, SolveStatus::Optimal, &positive),
            Err(Error::Solution { .. })
        ));
    }

    #[test]
    fn test_translate_suboptimal() {
        // x₀ ∧ ¬x₁: the flip of x₁ is undone on a feasible but unproven solution.
        let f = TruthTable::from_fn(2, |x| x[0] && !x[1]);
        let Normalization::Unate(positive) = normalize(&f) else {
            panic!("x₀ ∧ ¬x₁ is unate");
        };
        assert_eq!(positive.flipped, vec![1]);

        let mut solver = ExactSolver::default();
        let mut formulation = formulate(&mut solver, &positive).unwrap();
        assert!(formulation.model.optimize().has_solution());

        match translate(&formulation.model, SolveStatus::Suboptimal, &positive).unwrap() {
            Identification::Threshold(form) => assert!(form.realizes(&f), "{} for {}", form, f),
            Identification::NotThreshold => panic!("suboptimal solutions must be extracted"),
        }
    }

    #[test]
    fn test_allocation_failure() {
        let mut solver = ExactSolver::new(SolverConfig::default().with_max_columns(2));
        let result = identify_threshold_with(&named::majority(3), &mut solver);
        assert!(matches!(result, Err(Error::ModelAllocation { columns: 4, .. })));

        // Binate functions never reach the solver.
        let result = identify_threshold_with(&named::parity(3), &mut solver);
        assert_eq!(result.unwrap(), Identification::NotThreshold);
    }

    #[test]
    fn test_row_limit() {
        let mut solver = ExactSolver::new(SolverConfig::default().with_max_rows(4));
        let result = identify_threshold_with(&named::majority(3), &mut solver);
        assert!(matches!(result, Err(Error::Constraint { row: 4, .. })));
    }

    #[test]
    fn test_wide_function() {
        // 2x₀ + x₁ + ... + x₇ >= 3 across several words.
        let f = TruthTable::from_fn(8, |x| {
            2 * x[0] as i64 + x[1..].iter().filter(|&&b| b).count() as i64 >= 3
        });
        let form = identify(&f).unwrap();
        assert!(form.realizes(&f));
    }
}
