//! Irredundant sum-of-products (ISOP) covers.
//!
//! Implements the Minato–Morreale recursion on truth tables. Given an
//! interval `on ⊆ f ⊆ upper`, it returns a set of cubes whose union `f`
//! lies inside the interval, such that no cube and no literal can be
//! dropped without leaving it. For a completely specified function both
//! bounds coincide and the cover computes the function exactly.

use log::{debug, trace};

use crate::cube::Cube;
use crate::truth_table::TruthTable;

/// Computes an irredundant cover of the completely specified function `tt`.
///
/// ```
/// use threshold_rs::isop::isop;
/// use threshold_rs::truth_table::named;
///
/// // MAJ-3 = x₀x₁ + x₀x₂ + x₁x₂
/// let cubes = isop(&named::majority(3));
/// assert_eq!(cubes.len(), 3);
/// assert!(cubes.iter().all(|c| c.num_literals() == 2));
/// ```
pub fn isop(tt: &TruthTable) -> Vec<Cube> {
    isop_with_dc(tt, tt)
}

/// Computes an irredundant cover of some function between `on` and `upper`.
///
/// # Panics
///
/// Panics if the arities differ or if `on` does not imply `upper`.
pub fn isop_with_dc(on: &TruthTable, upper: &TruthTable) -> Vec<Cube> {
    assert!(on.implies(upper), "Lower bound must imply the upper bound");
    let mut cubes = Vec::new();
    isop_rec(on, upper, on.num_vars(), &mut cubes);
    debug!(
        "isop: {} cubes for {}-variable function with {} minterms",
        cubes.len(),
        on.num_vars(),
        on.count_ones()
    );
    cubes
}

/// Recursive step. Neither bound depends on variables `>= num_vars`.
///
/// Appends the cubes of the cover to `cubes` and returns the function they compute.
fn isop_rec(
    on: &TruthTable,
    upper: &TruthTable,
    num_vars: usize,
    cubes: &mut Vec<Cube>,
) -> TruthTable {
    if on.is_const0() {
        return TruthTable::zero(on.num_vars());
    }
    if upper.is_const1() {
        cubes.push(Cube::tautology());
        return TruthTable::one(on.num_vars());
    }

    // Invariant: `on` is not 0 and `upper` is not 1 here, and `on` implies
    // `upper`, so at least one bound is not constant and depends on a variable.
    let var = (0..num_vars)
        .rev()
        .find(|&v| on.has_var(v) || upper.has_var(v))
        .expect("non-constant bounds depend on some variable");
    trace!("isop_rec: splitting on x{}", var);

    let on0 = on.cofactor0(var);
    let on1 = on.cofactor1(var);
    let upper0 = upper.cofactor0(var);
    let upper1 = upper.cofactor1(var);

    let beg0 = cubes.len();
    let res0 = isop_rec(&(&on0 & &!&upper1), &upper0, var, cubes);
    let end0 = cubes.len();
    let res1 = isop_rec(&(&on1 & &!&upper0), &upper1, var, cubes);
    let end1 = cubes.len();
    let rest = (&on0 & &!&res0) | (&on1 & &!&res1);
    let res2 = isop_rec(&rest, &(&upper0 & &upper1), var, cubes);

    for cube in &mut cubes[beg0..end0] {
        cube.add_literal(var, false);
    }
    for cube in &mut cubes[end0..end1] {
        cube.add_literal(var, true);
    }

    let x = TruthTable::nth_var(on.num_vars(), var);
    (&res0 & &!&x) | (&res1 & &x) | res2
}

/// Computes the function covered by `cubes` over `num_vars` variables.
pub fn cover_to_table(cubes: &[Cube], num_vars: usize) -> TruthTable {
    let mut tt = TruthTable::zero(num_vars);
    for index in 0..tt.num_bits() {
        if cubes.iter().any(|c| c.contains(index)) {
            tt.set_bit(index, true);
        }
    }
    tt
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::truth_table::named;

    fn is_irredundant(cubes: &[Cube], tt: &TruthTable) -> bool {
        let n = tt.num_vars();
        // Dropping any cube loses coverage.
        let cubes_needed = (0..cubes.len()).all(|i| {
            let rest: Vec<Cube> = cubes
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, c)| *c)
                .collect();
            cover_to_table(&rest, n) != *tt
        });
        // Dropping any literal covers a zero of the function.
        let literals_needed = cubes.iter().all(|cube| {
            cube.literals().all(|(var, _)| {
                let mut larger = *cube;
                larger.remove_literal(var);
                !cover_to_table(&[larger], n).implies(tt)
            })
        });
        cubes_needed && literals_needed
    }

    #[test]
    fn test_constants() {
        assert!(isop(&TruthTable::zero(3)).is_empty());
        assert_eq!(isop(&TruthTable::one(3)), vec![Cube::tautology()]);
        assert_eq!(isop(&TruthTable::one(0)), vec![Cube::tautology()]);
        assert!(isop(&TruthTable::zero(0)).is_empty());
    }

    #[test]
    fn test_xor() {
        let cubes = isop(&named::parity(2));
        assert_eq!(cubes.len(), 2);
        assert_eq!(cover_to_table(&cubes, 2), named::parity(2));
    }

    #[test]
    fn test_all_three_input_functions() {
        for value in 0u32..256 {
            let tt = TruthTable::from_fn(3, |x| {
                let index = x.iter().enumerate().fold(0, |acc, (i, &b)| acc | ((b as u32) << i));
                (value >> index) & 1 == 1
            });
            let cubes = isop(&tt);
            assert_eq!(cover_to_table(&cubes, 3), tt, "cover of {}", tt);
            assert!(is_irredundant(&cubes, &tt), "cover of {} is redundant", tt);
        }
    }

    #[test]
    fn test_large_function() {
        let f = TruthTable::from_fn(8, |x| (x[7] && x[0]) || (!x[6] && x[3] && x[4]));
        let cubes = isop(&f);
        assert_eq!(cubes.len(), 2);
        assert_eq!(cover_to_table(&cubes, 8), f);
    }

    #[test]
    fn test_dont_cares() {
        // on = x₀x₁, upper = x₀: the cover may grow to the single literal x₀.
        let on = named::and_all(2);
        let upper = TruthTable::nth_var(2, 0);
        let cubes = isop_with_dc(&on, &upper);
        assert_eq!(cubes, vec![Cube::new(0b01, 0b01)]);
    }
}
