//! Cubes (product terms) over at most 32 variables.
//!
//! A cube is a partial assignment: `mask` marks the variables the cube
//! cares about and `bits` holds their values. Variables outside the mask
//! are free, so a cube with `k` literals covers 2ⁿ⁻ᵏ assignments.

use std::fmt;

/// A product term stored as a `(bits, mask)` pair.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cube {
    bits: u32,
    mask: u32,
}

impl Cube {
    /// Creates a cube from raw bits and mask. Bits outside the mask are cleared.
    pub fn new(bits: u32, mask: u32) -> Self {
        Self {
            bits: bits & mask,
            mask,
        }
    }

    /// The cube covering every assignment (no literals).
    pub fn tautology() -> Self {
        Self::default()
    }

    /// Builds a cube from one entry per variable: `Some(value)` or `None` for free.
    pub fn from_literals(literals: &[Option<bool>]) -> Self {
        let mut cube = Self::default();
        for (var, lit) in literals.iter().enumerate() {
            if let Some(value) = lit {
                cube.add_literal(var, *value);
            }
        }
        cube
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Does the cube care about `var`?
    #[inline]
    pub fn get_mask(&self, var: usize) -> bool {
        (self.mask >> var) & 1 == 1
    }

    /// Value of `var` in the cube; meaningful only when [`Cube::get_mask`] holds.
    #[inline]
    pub fn get_bit(&self, var: usize) -> bool {
        (self.bits >> var) & 1 == 1
    }

    pub fn add_literal(&mut self, var: usize, polarity: bool) {
        self.mask |= 1 << var;
        if polarity {
            self.bits |= 1 << var;
        } else {
            self.bits &= !(1 << var);
        }
    }

    pub fn remove_literal(&mut self, var: usize) {
        self.mask &= !(1 << var);
        self.bits &= !(1 << var);
    }

    pub fn num_literals(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Iterates over `(var, polarity)` pairs in increasing variable order.
    pub fn literals(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..u32::BITS as usize)
            .filter(|&var| self.get_mask(var))
            .map(|var| (var, self.get_bit(var)))
    }

    /// Checks whether the assignment with the given index lies inside the cube.
    pub fn contains(&self, assignment: usize) -> bool {
        (assignment as u32 ^ self.bits) & self.mask == 0
    }

    /// Formats the cube over `num_vars` variables: `0`, `1` or `-` per variable, x₀ first.
    pub fn to_string_with(&self, num_vars: usize) -> String {
        (0..num_vars)
            .map(|var| match (self.get_mask(var), self.get_bit(var)) {
                (false, _) => '-',
                (true, false) => '0',
                (true, true) => '1',
            })
            .collect()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (u32::BITS - self.mask.leading_zeros()) as usize;
        write!(f, "{}", self.to_string_with(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        let mut cube = Cube::tautology();
        assert_eq!(cube.num_literals(), 0);

        cube.add_literal(0, true);
        cube.add_literal(2, false);
        assert!(cube.get_mask(0) && cube.get_bit(0));
        assert!(cube.get_mask(2) && !cube.get_bit(2));
        assert!(!cube.get_mask(1));
        assert_eq!(cube.num_literals(), 2);
        assert_eq!(cube.literals().collect::<Vec<_>>(), vec![(0, true), (2, false)]);
        assert_eq!(cube.to_string(), "1-0");
        assert_eq!(cube.to_string_with(4), "1-0-");

        cube.remove_literal(0);
        assert_eq!(cube, Cube::from_literals(&[None, None, Some(false)]));
    }

    #[test]
    fn test_contains() {
        // x₀ ∧ ¬x₂
        let cube = Cube::new(0b001, 0b101);
        assert!(cube.contains(0b001));
        assert!(cube.contains(0b011));
        assert!(!cube.contains(0b101));
        assert!(!cube.contains(0b000));
        assert!((0..8).all(|a| Cube::tautology().contains(a)));
    }
}
