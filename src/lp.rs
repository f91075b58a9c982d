//! Integer linear programming interface.
//!
//! Identification does not depend on a particular solver: it talks to a
//! [`Solver`] that hands out [`Model`]s. A model owns all solver-side state
//! for one problem and releases it when dropped, so every exit path of a
//! caller (including `?` on a failed row) cleans up.
//!
//! Columns are indexed from 0, are integer and bounded below by 0.

use std::fmt;

use crate::error::Result;

/// Relation between a constraint row and its right-hand side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Relation {
    /// `row >= rhs`
    GreaterEq,
    /// `row <= rhs`
    LessEq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::GreaterEq => write!(f, ">="),
            Relation::LessEq => write!(f, "<="),
        }
    }
}

/// Optimization direction of the objective.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

/// Outcome of [`Model::optimize`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SolveStatus {
    /// A proven optimal integer solution is available.
    Optimal,
    /// A feasible integer solution is available, optimality not proven.
    Suboptimal,
    /// No integer point satisfies the constraints.
    Infeasible,
    /// The objective is unbounded over the feasible set.
    Unbounded,
    /// The solver gave up (e.g. a search budget expired) without a solution.
    Aborted,
}

impl SolveStatus {
    /// Whether [`Model::solution`] is meaningful after this status.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Suboptimal)
    }
}

/// A sparse row: `(column, coefficient)` pairs.
pub type SparseRow = [(usize, i64)];

/// One problem instance inside a solver.
///
/// Dropping the model releases it.
pub trait Model {
    /// Number of columns the model was created with.
    fn num_columns(&self) -> usize;

    /// Number of constraint rows added so far.
    fn num_rows(&self) -> usize;

    /// Adds the constraint `sum(coeff * column) <relation> rhs`.
    fn add_constraint(&mut self, row: &SparseRow, relation: Relation, rhs: i64) -> Result<()>;

    /// Replaces the objective function.
    fn set_objective(&mut self, row: &SparseRow, sense: Sense) -> Result<()>;

    /// Solves the model. Blocks until the solver finishes.
    fn optimize(&mut self) -> SolveStatus;

    /// Column values of the last solution, in column order.
    fn solution(&self) -> Result<Vec<i64>>;
}

/// A factory of [`Model`]s.
pub trait Solver {
    type Model: Model;

    /// Allocates a fresh model with `num_columns` integer columns and no rows.
    fn create_model(&mut self, num_columns: usize) -> Result<Self::Model>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert!(SolveStatus::Optimal.has_solution());
        assert!(SolveStatus::Suboptimal.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
        assert!(!SolveStatus::Unbounded.has_solution());
        assert!(!SolveStatus::Aborted.has_solution());
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::GreaterEq.to_string(), ">=");
        assert_eq!(Relation::LessEq.to_string(), "<=");
        assert_eq!(Sense::default(), Sense::Minimize);
    }
}
