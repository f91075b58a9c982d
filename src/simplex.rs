//! Exact integer linear programming solver.
//!
//! [`ExactSolver`] is the default [`Solver`] used by identification. It solves
//! LP relaxations with a dense two-phase simplex over arbitrary-precision
//! rationals, and finds integer solutions by depth-first branch-and-bound on
//! the most fractional column.
//!
//! ## Algorithm Overview
//!
//! 1. Rows are normalized to a non-negative right-hand side. `<=` rows get a
//!    slack column, `>=` rows a surplus and an artificial column.
//! 2. Phase 1 minimizes the sum of artificials. A positive optimum means the
//!    relaxation is infeasible.
//! 3. Phase 2 minimizes the real objective with artificial columns barred.
//! 4. Branch-and-bound splits on a fractional column `x = v` into
//!    `x <= floor(v)` and `x >= ceil(v)`. Costs are integers, so a node whose
//!    relaxation bound rounded up cannot beat the incumbent is pruned.
//!
//! Pivoting follows Bland's rule (smallest entering index, ties in the ratio
//! test broken by smallest basic index), so the simplex never cycles.

use log::{debug, trace};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::lp::{Model, Relation, Sense, SolveStatus, Solver, SparseRow};

/// The built-in exact solver.
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: SolverConfig,
}

impl ExactSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Solver for ExactSolver {
    type Model = ExactModel;

    fn create_model(&mut self, num_columns: usize) -> Result<ExactModel> {
        if num_columns > self.config.max_columns {
            return Err(Error::ModelAllocation {
                columns: num_columns,
                reason: format!("column limit of {} exceeded", self.config.max_columns),
            });
        }
        debug!("create_model(num_columns = {})", num_columns);
        Ok(ExactModel {
            config: self.config,
            num_columns,
            constraints: Vec::new(),
            objective: vec![BigRational::zero(); num_columns],
            solution: None,
            nodes: 0,
        })
    }
}

/// A dense constraint row.
#[derive(Debug, Clone)]
struct Constraint {
    coeffs: Vec<BigRational>,
    relation: Relation,
    rhs: BigRational,
}

impl Constraint {
    /// Single-column bound `x[column] <relation> value`, used for branching.
    fn bound(num_columns: usize, column: usize, relation: Relation, value: BigInt) -> Self {
        let mut coeffs = vec![BigRational::zero(); num_columns];
        coeffs[column] = BigRational::from_integer(BigInt::from(1));
        Self {
            coeffs,
            relation,
            rhs: BigRational::from_integer(value),
        }
    }
}

/// A model of [`ExactSolver`].
#[derive(Debug)]
pub struct ExactModel {
    config: SolverConfig,
    num_columns: usize,
    constraints: Vec<Constraint>,
    /// Objective in minimization form (negated for [`Sense::Maximize`]).
    objective: Vec<BigRational>,
    solution: Option<Vec<BigInt>>,
    nodes: usize,
}

impl ExactModel {
    /// Number of branch-and-bound nodes explored by the last [`Model::optimize`].
    pub fn nodes_explored(&self) -> usize {
        self.nodes
    }

    fn dense(&self, row: &SparseRow) -> std::result::Result<Vec<BigRational>, String> {
        let mut coeffs = vec![BigRational::zero(); self.num_columns];
        for &(column, coeff) in row {
            if column >= self.num_columns {
                return Err(format!(
                    "column {} out of range for {} columns",
                    column, self.num_columns
                ));
            }
            coeffs[column] += BigRational::from_integer(BigInt::from(coeff));
        }
        Ok(coeffs)
    }
}

impl Model for ExactModel {
    fn num_columns(&self) -> usize {
        self.num_columns
    }

    fn num_rows(&self) -> usize {
        self.constraints.len()
    }

    fn add_constraint(&mut self, row: &SparseRow, relation: Relation, rhs: i64) -> Result<()> {
        let index = self.constraints.len();
        if index >= self.config.max_rows {
            return Err(Error::Constraint {
                row: index,
                reason: format!("row limit of {} exceeded", self.config.max_rows),
            });
        }
        let coeffs = self
            .dense(row)
            .map_err(|reason| Error::Constraint { row: index, reason })?;
        trace!("add_constraint #{}: {:?} {} {}", index, row, relation, rhs);
        self.constraints.push(Constraint {
            coeffs,
            relation,
            rhs: BigRational::from_integer(BigInt::from(rhs)),
        });
        self.solution = None;
        Ok(())
    }

    fn set_objective(&mut self, row: &SparseRow, sense: Sense) -> Result<()> {
        let mut coeffs = self.dense(row).map_err(|reason| Error::Objective { reason })?;
        if sense == Sense::Maximize {
            for c in coeffs.iter_mut() {
                *c = -c.clone();
            }
        }
        trace!("set_objective: {:?} ({:?})", row, sense);
        self.objective = coeffs;
        self.solution = None;
        Ok(())
    }

    fn optimize(&mut self) -> SolveStatus {
        self.solution = None;

        let mut stack: Vec<Vec<Constraint>> = vec![Vec::new()];
        let mut incumbent: Option<(BigInt, Vec<BigInt>)> = None;
        let mut nodes = 0;
        let mut exhausted = false;

        while let Some(bounds) = stack.pop() {
            if let Some(limit) = self.config.max_nodes {
                if nodes >= limit {
                    exhausted = true;
                    break;
                }
            }
            nodes += 1;

            let rows = self.constraints.iter().chain(bounds.iter());
            match solve_relaxation(self.num_columns, rows, &self.objective) {
                Relaxation::Infeasible => {
                    trace!("node {}: infeasible", nodes);
                }
                Relaxation::Unbounded => {
                    debug!("node {}: unbounded relaxation", nodes);
                    self.nodes = nodes;
                    return SolveStatus::Unbounded;
                }
                Relaxation::Optimal { values, objective } => {
                    let bound = objective.ceil().to_integer();
                    if let Some((best, _)) = &incumbent {
                        if bound >= *best {
                            trace!("node {}: pruned (bound {} >= {})", nodes, bound, best);
                            continue;
                        }
                    }
                    match most_fractional(&values) {
                        None => {
                            trace!("node {}: new incumbent with objective {}", nodes, objective);
                            let point = values.iter().map(|v| v.to_integer()).collect();
                            incumbent = Some((objective.to_integer(), point));
                        }
                        Some(column) => {
                            let value = &values[column];
                            trace!("node {}: branching on x{} = {}", nodes, column, value);
                            let mut up = bounds.clone();
                            up.push(Constraint::bound(
                                self.num_columns,
                                column,
                                Relation::GreaterEq,
                                value.ceil().to_integer(),
                            ));
                            let mut down = bounds;
                            down.push(Constraint::bound(
                                self.num_columns,
                                column,
                                Relation::LessEq,
                                value.floor().to_integer(),
                            ));
                            stack.push(up);
                            stack.push(down);
                        }
                    }
                }
            }
        }

        self.nodes = nodes;
        let status = match (&incumbent, exhausted) {
            (Some(_), false) => SolveStatus::Optimal,
            (Some(_), true) => SolveStatus::Suboptimal,
            (None, false) => SolveStatus::Infeasible,
            (None, true) => SolveStatus::Aborted,
        };
        debug!(
            "optimize: {:?} after {} nodes ({} rows, {} columns)",
            status,
            nodes,
            self.constraints.len(),
            self.num_columns
        );
        self.solution = incumbent.map(|(_, point)| point);
        status
    }

    fn solution(&self) -> Result<Vec<i64>> {
        let point = self.solution.as_ref().ok_or_else(|| Error::Solution {
            reason: "no feasible solution available".to_string(),
        })?;
        point
            .iter()
            .enumerate()
            .map(|(column, v)| {
                v.to_i64().ok_or_else(|| Error::Solution {
                    reason: format!("value {} of column {} does not fit in i64", v, column),
                })
            })
            .collect()
    }
}

/// Picks the column whose value is farthest from an integer. Ties go to the smallest column.
fn most_fractional(values: &[BigRational]) -> Option<usize> {
    let half = BigRational::new(BigInt::from(1), BigInt::from(2));
    let mut best: Option<(usize, BigRational)> = None;
    for (column, v) in values.iter().enumerate() {
        if v.is_integer() {
            continue;
        }
        let frac = v - v.floor();
        let score = &half - (&frac - &half).abs();
        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((column, score));
        }
    }
    best.map(|(column, _)| column)
}

/// Result of solving one LP relaxation.
enum Relaxation {
    Optimal {
        values: Vec<BigRational>,
        objective: BigRational,
    },
    Infeasible,
    Unbounded,
}

/// Dense simplex tableau. Each row holds `width` coefficients followed by the right-hand side.
struct Tableau {
    rows: Vec<Vec<BigRational>>,
    basis: Vec<usize>,
    width: usize,
}

impl Tableau {
    fn rhs(&self, row: usize) -> &BigRational {
        &self.rows[row][self.width]
    }

    fn reduced_cost(&self, cost: &[BigRational], column: usize) -> BigRational {
        let mut d = cost[column].clone();
        for (row, &basic) in self.rows.iter().zip(&self.basis) {
            let cb = &cost[basic];
            if !cb.is_zero() && !row[column].is_zero() {
                d -= cb * &row[column];
            }
        }
        d
    }

    fn pivot(&mut self, r: usize, c: usize) {
        let p = self.rows[r][c].clone();
        for v in self.rows[r].iter_mut() {
            *v = &*v / &p;
        }
        let pivot_row = self.rows[r].clone();
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == r || row[c].is_zero() {
                continue;
            }
            let factor = row[c].clone();
            for (v, pv) in row.iter_mut().zip(&pivot_row) {
                if !pv.is_zero() {
                    *v -= &factor * pv;
                }
            }
        }
        self.basis[r] = c;
    }

    /// Minimizes `cost` letting only columns `< allowed` enter the basis.
    ///
    /// Returns `false` if the objective is unbounded.
    fn minimize(&mut self, cost: &[BigRational], allowed: usize) -> bool {
        loop {
            let entering = (0..allowed)
                .find(|&j| !self.basis.contains(&j) && self.reduced_cost(cost, j).is_negative());
            let Some(e) = entering else {
                return true;
            };

            let mut leaving: Option<(usize, BigRational)> = None;
            for (i, row) in self.rows.iter().enumerate() {
                if !row[e].is_positive() {
                    continue;
                }
                let ratio = &row[self.width] / &row[e];
                let better = match &leaving {
                    None => true,
                    Some((l, best)) => {
                        ratio < *best || (ratio == *best && self.basis[i] < self.basis[*l])
                    }
                };
                if better {
                    leaving = Some((i, ratio));
                }
            }
            let Some((r, _)) = leaving else {
                return false;
            };

            trace!("pivot: x{} enters, x{} leaves", e, self.basis[r]);
            self.pivot(r, e);
        }
    }
}

/// Solves the relaxation `min objective·x` over the given rows with `x >= 0`.
fn solve_relaxation<'a>(
    num_columns: usize,
    constraints: impl Iterator<Item = &'a Constraint>,
    objective: &[BigRational],
) -> Relaxation {
    // Normalize to non-negative right-hand sides.
    let normalized: Vec<(Vec<BigRational>, Relation, BigRational)> = constraints
        .map(|c| {
            if c.rhs.is_negative() {
                let relation = match c.relation {
                    Relation::GreaterEq => Relation::LessEq,
                    Relation::LessEq => Relation::GreaterEq,
                };
                (c.coeffs.iter().map(|v| -v).collect(), relation, -&c.rhs)
            } else {
                (c.coeffs.clone(), c.relation, c.rhs.clone())
            }
        })
        .collect();

    let m = normalized.len();
    let num_artificial = normalized
        .iter()
        .filter(|(_, relation, _)| *relation == Relation::GreaterEq)
        .count();
    let slack_start = num_columns;
    let artificial_start = num_columns + m;
    let width = artificial_start + num_artificial;

    let one = BigRational::from_integer(BigInt::from(1));
    let mut rows = Vec::with_capacity(m);
    let mut basis = Vec::with_capacity(m);
    let mut next_artificial = artificial_start;
    for (i, (coeffs, relation, rhs)) in normalized.into_iter().enumerate() {
        let mut row = coeffs;
        row.resize(width + 1, BigRational::zero());
        row[width] = rhs;
        match relation {
            Relation::LessEq => {
                row[slack_start + i] = one.clone();
                basis.push(slack_start + i);
            }
            Relation::GreaterEq => {
                row[slack_start + i] = -one.clone();
                row[next_artificial] = one.clone();
                basis.push(next_artificial);
                next_artificial += 1;
            }
        }
        rows.push(row);
    }
    let mut tableau = Tableau { rows, basis, width };

    if num_artificial > 0 {
        let mut cost = vec![BigRational::zero(); width];
        for c in cost.iter_mut().skip(artificial_start) {
            *c = one.clone();
        }
        // Phase 1 is bounded below by zero.
        tableau.minimize(&cost, width);

        let infeasibility: BigRational = (0..m)
            .filter(|&i| tableau.basis[i] >= artificial_start)
            .map(|i| tableau.rhs(i).clone())
            .sum();
        if infeasibility.is_positive() {
            return Relaxation::Infeasible;
        }

        // Drive zero-valued artificials out of the basis where possible.
        for i in 0..m {
            if tableau.basis[i] >= artificial_start {
                if let Some(j) = (0..artificial_start).find(|&j| !tableau.rows[i][j].is_zero()) {
                    tableau.pivot(i, j);
                }
            }
        }
    }

    let mut cost = vec![BigRational::zero(); width];
    cost[..num_columns].clone_from_slice(objective);
    if !tableau.minimize(&cost, artificial_start) {
        return Relaxation::Unbounded;
    }

    let mut values = vec![BigRational::zero(); num_columns];
    for (i, &basic) in tableau.basis.iter().enumerate() {
        if basic < num_columns {
            values[basic] = tableau.rhs(i).clone();
        }
    }
    let objective = values
        .iter()
        .zip(objective)
        .map(|(v, c)| v * c)
        .sum();
    Relaxation::Optimal { values, objective }
}
