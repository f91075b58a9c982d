//! Truth table representation for Boolean functions.
//!
//! A Boolean function f: {0,1}ⁿ → {0,1} is represented by its truth table,
//! a vector of 2ⁿ bits packed into `u64` words.
//!
//! # Variable Ordering
//!
//! Variables are numbered `0..n`. For input index `i`, variable `j` has value
//! `(i >> j) & 1`, so variable 0 is the least significant input bit.
//!
//! For n=2:
//! - Index 0 (binary 00): x₀=0, x₁=0
//! - Index 1 (binary 01): x₀=1, x₁=0
//! - Index 2 (binary 10): x₀=0, x₁=1
//! - Index 3 (binary 11): x₀=1, x₁=1
//!
//! Textual forms (binary and hex) are written most significant bit first,
//! so `"0110"` is the 2-input XOR and `"e8"` is the 3-input majority.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::error::{Error, Result};

/// Maximum number of variables a truth table may have.
pub const MAX_VARS: usize = 32;

/// Projection masks for the variables living inside a single word.
const PROJECTIONS: [u64; 6] = [
    0xaaaa_aaaa_aaaa_aaaa,
    0xcccc_cccc_cccc_cccc,
    0xf0f0_f0f0_f0f0_f0f0,
    0xff00_ff00_ff00_ff00,
    0xffff_0000_ffff_0000,
    0xffff_ffff_0000_0000,
];

/// A complete truth table of a Boolean function on `n` variables.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    /// Number of variables.
    num_vars: usize,
    /// Storage: 2ⁿ bits, at least one word.
    words: Vec<u64>,
}

impl TruthTable {
    const BITS_PER_WORD: usize = 64;

    fn num_words(num_vars: usize) -> usize {
        if num_vars <= 6 {
            1
        } else {
            1 << (num_vars - 6)
        }
    }

    /// Clears the unused high bits of the single word of a small table.
    fn mask_tail(&mut self) {
        if self.num_vars < 6 {
            self.words[0] &= (1u64 << (1 << self.num_vars)) - 1;
        }
    }

    /// Creates the constant zero function.
    ///
    /// # Panics
    ///
    /// Panics if `num_vars > MAX_VARS`.
    pub fn zero(num_vars: usize) -> Self {
        assert!(
            num_vars <= MAX_VARS,
            "At most {} variables are supported, got {}",
            MAX_VARS,
            num_vars
        );
        Self {
            num_vars,
            words: vec![0; Self::num_words(num_vars)],
        }
    }

    /// Creates the constant one function.
    pub fn one(num_vars: usize) -> Self {
        let mut tt = Self::zero(num_vars);
        tt.words.fill(u64::MAX);
        tt.mask_tail();
        tt
    }

    /// Creates the projection function for variable `var`.
    pub fn nth_var(num_vars: usize, var: usize) -> Self {
        assert!(
            var < num_vars,
            "Variable {} out of range for {}-variable function",
            var,
            num_vars
        );
        let mut tt = Self::zero(num_vars);
        if var < 6 {
            tt.words.fill(PROJECTIONS[var]);
            tt.mask_tail();
        } else {
            let step = 1 << (var - 6);
            for (k, word) in tt.words.iter_mut().enumerate() {
                if k & step != 0 {
                    *word = u64::MAX;
                }
            }
        }
        tt
    }

    /// Creates a truth table by evaluating `f` on every assignment.
    ///
    /// The function receives a slice `[x₀, x₁, ..., xₙ₋₁]`.
    ///
    /// ```
    /// use threshold_rs::truth_table::TruthTable;
    ///
    /// let f = TruthTable::from_fn(2, |x| x[0] && x[1]);
    /// assert!(f.eval(&[true, true]));
    /// assert!(!f.eval(&[true, false]));
    /// ```
    pub fn from_fn(num_vars: usize, f: impl Fn(&[bool]) -> bool) -> Self {
        let mut tt = Self::zero(num_vars);
        let mut assignment = vec![false; num_vars];
        for index in 0..tt.num_bits() {
            for (j, value) in assignment.iter_mut().enumerate() {
                *value = (index >> j) & 1 == 1;
            }
            if f(&assignment) {
                tt.set_bit(index, true);
            }
        }
        tt
    }

    /// Parses a binary string, most significant bit first.
    ///
    /// The string must contain exactly 2ⁿ characters `0` or `1`.
    pub fn from_binary_str(num_vars: usize, s: &str) -> Result<Self> {
        let mut tt = Self::zero(num_vars);
        let num_bits = tt.num_bits();
        if s.len() != num_bits {
            return Err(Error::Parse {
                input: s.to_string(),
                reason: format!(
                    "expected {} binary digits for {} variables, got {}",
                    num_bits,
                    num_vars,
                    s.len()
                ),
            });
        }
        for (k, c) in s.chars().enumerate() {
            let value = match c {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(Error::Parse {
                        input: s.to_string(),
                        reason: format!("unexpected character {:?}", c),
                    })
                }
            };
            tt.set_bit(num_bits - 1 - k, value);
        }
        Ok(tt)
    }

    /// Parses a hexadecimal string, most significant digit first.
    ///
    /// An optional `0x` prefix is accepted. Functions of fewer than two
    /// variables use a single digit whose unused bits must be zero.
    pub fn from_hex_str(num_vars: usize, s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut tt = Self::zero(num_vars);
        let num_bits = tt.num_bits();
        let expected = (num_bits / 4).max(1);
        if digits.len() != expected {
            return Err(Error::Parse {
                input: s.to_string(),
                reason: format!(
                    "expected {} hex digits for {} variables, got {}",
                    expected,
                    num_vars,
                    digits.len()
                ),
            });
        }
        for (k, c) in digits.chars().enumerate() {
            let nibble = c.to_digit(16).ok_or_else(|| Error::Parse {
                input: s.to_string(),
                reason: format!("unexpected character {:?}", c),
            })?;
            let base = 4 * (expected - 1 - k);
            for b in 0..4 {
                if (nibble >> b) & 1 == 1 {
                    if base + b >= num_bits {
                        return Err(Error::Parse {
                            input: s.to_string(),
                            reason: format!(
                                "digit {:?} sets bits beyond the {} bits of the table",
                                c, num_bits
                            ),
                        });
                    }
                    tt.set_bit(base + b, true);
                }
            }
        }
        Ok(tt)
    }

    /// Returns the number of variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Returns the number of bits (2ⁿ).
    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    /// Returns the function value at the assignment with the given index.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.num_bits(), "Index {} out of range", index);
        let (word, bit) = Self::word_and_bit(index);
        (self.words[word] >> bit) & 1 == 1
    }

    /// Sets the function value at the assignment with the given index.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < self.num_bits(), "Index {} out of range", index);
        let (word, bit) = Self::word_and_bit(index);
        if value {
            self.words[word] |= 1 << bit;
        } else {
            self.words[word] &= !(1 << bit);
        }
    }

    /// Evaluates the function at `[x₀, x₁, ..., xₙ₋₁]`.
    pub fn eval(&self, assignment: &[bool]) -> bool {
        assert_eq!(
            assignment.len(),
            self.num_vars,
            "Expected {} inputs, got {}",
            self.num_vars,
            assignment.len()
        );
        let index = assignment
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, &b)| acc | ((b as usize) << i));
        self.bit(index)
    }

    /// Counts the satisfying assignments.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Checks if this is the constant zero function.
    pub fn is_const0(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Checks if this is the constant one function.
    pub fn is_const1(&self) -> bool {
        self.count_ones() == self.num_bits()
    }

    /// Checks whether every satisfying assignment of `self` satisfies `other`.
    pub fn implies(&self, other: &Self) -> bool {
        assert_eq!(self.num_vars, other.num_vars, "Variable count mismatch");
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }

    /// Checks whether the function depends on `var`.
    pub fn has_var(&self, var: usize) -> bool {
        assert!(var < self.num_vars, "Variable {} out of range", var);
        if var < 6 {
            let shift = 1 << var;
            self.words
                .iter()
                .any(|&w| ((w >> shift) ^ w) & !PROJECTIONS[var] != 0)
        } else {
            let step = 1 << (var - 6);
            self.words.chunks(2 * step).any(|chunk| {
                let (lo, hi) = chunk.split_at(step);
                lo != hi
            })
        }
    }

    /// Computes the negative cofactor f|_{x=0}.
    ///
    /// The result keeps the arity of `self` and no longer depends on `var`.
    pub fn cofactor0(&self, var: usize) -> Self {
        assert!(var < self.num_vars, "Variable {} out of range", var);
        let mut tt = self.clone();
        if var < 6 {
            let shift = 1 << var;
            let mask = !PROJECTIONS[var];
            for w in tt.words.iter_mut() {
                let low = *w & mask;
                *w = low | (low << shift);
            }
        } else {
            let step = 1 << (var - 6);
            for chunk in tt.words.chunks_mut(2 * step) {
                let (lo, hi) = chunk.split_at_mut(step);
                hi.copy_from_slice(lo);
            }
        }
        tt
    }

    /// Computes the positive cofactor f|_{x=1}.
    ///
    /// The result keeps the arity of `self` and no longer depends on `var`.
    pub fn cofactor1(&self, var: usize) -> Self {
        assert!(var < self.num_vars, "Variable {} out of range", var);
        let mut tt = self.clone();
        if var < 6 {
            let shift = 1 << var;
            let mask = PROJECTIONS[var];
            for w in tt.words.iter_mut() {
                let high = *w & mask;
                *w = high | (high >> shift);
            }
        } else {
            let step = 1 << (var - 6);
            for chunk in tt.words.chunks_mut(2 * step) {
                let (lo, hi) = chunk.split_at_mut(step);
                lo.copy_from_slice(hi);
            }
        }
        tt
    }

    /// Complements variable `var` in place: f(.., x, ..) becomes f(.., ¬x, ..).
    pub fn flip_inplace(&mut self, var: usize) {
        assert!(var < self.num_vars, "Variable {} out of range", var);
        if var < 6 {
            let shift = 1 << var;
            let mask = PROJECTIONS[var];
            for w in self.words.iter_mut() {
                *w = ((*w << shift) & mask) | ((*w & mask) >> shift);
            }
        } else {
            let step = 1 << (var - 6);
            for chunk in self.words.chunks_mut(2 * step) {
                let (lo, hi) = chunk.split_at_mut(step);
                lo.swap_with_slice(hi);
            }
        }
    }

    /// Returns a copy with variable `var` complemented.
    pub fn flip(&self, var: usize) -> Self {
        let mut tt = self.clone();
        tt.flip_inplace(var);
        tt
    }

    /// Formats the table as hexadecimal, most significant digit first.
    pub fn to_hex_string(&self) -> String {
        let num_digits = (self.num_bits() / 4).max(1);
        (0..num_digits)
            .rev()
            .map(|k| {
                let nibble = (0..4)
                    .filter(|&b| 4 * k + b < self.num_bits() && self.bit(4 * k + b))
                    .fold(0u32, |acc, b| acc | (1 << b));
                std::char::from_digit(nibble, 16).unwrap_or('?')
            })
            .collect()
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable({}, 0x{})", self.num_vars, self.to_hex_string())
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in (0..self.num_bits()).rev() {
            write!(f, "{}", if self.bit(index) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;

    fn not(self) -> TruthTable {
        let mut tt = TruthTable {
            num_vars: self.num_vars,
            words: self.words.iter().map(|w| !w).collect(),
        };
        tt.mask_tail();
        tt
    }
}

impl Not for TruthTable {
    type Output = TruthTable;

    fn not(self) -> TruthTable {
        !&self
    }
}

macro_rules! impl_bitwise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&TruthTable> for &TruthTable {
            type Output = TruthTable;

            fn $method(self, rhs: &TruthTable) -> TruthTable {
                assert_eq!(self.num_vars, rhs.num_vars, "Variable count mismatch");
                TruthTable {
                    num_vars: self.num_vars,
                    words: self.words.iter().zip(&rhs.words).map(|(a, b)| a $op b).collect(),
                }
            }
        }

        impl $trait<&TruthTable> for TruthTable {
            type Output = TruthTable;

            fn $method(self, rhs: &TruthTable) -> TruthTable {
                (&self).$method(rhs)
            }
        }

        impl $trait<TruthTable> for TruthTable {
            type Output = TruthTable;

            fn $method(self, rhs: TruthTable) -> TruthTable {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, &);
impl_bitwise_op!(BitOr, bitor, |);
impl_bitwise_op!(BitXor, bitxor, ^);

/// Named Boolean functions for tests, benchmarks and demos.
pub mod named {
    use super::*;

    /// Majority of `n` variables: true iff more than half of the inputs are true.
    pub fn majority(n: usize) -> TruthTable {
        TruthTable::from_fn(n, |x| 2 * x.iter().filter(|&&b| b).count() > n)
    }

    /// XOR (parity) of all variables.
    pub fn parity(n: usize) -> TruthTable {
        TruthTable::from_fn(n, |x| x.iter().filter(|&&b| b).count() % 2 == 1)
    }

    /// AND of all variables.
    pub fn and_all(n: usize) -> TruthTable {
        TruthTable::from_fn(n, |x| x.iter().all(|&b| b))
    }

    /// OR of all variables.
    pub fn or_all(n: usize) -> TruthTable {
        TruthTable::from_fn(n, |x| x.iter().any(|&b| b))
    }

    /// At least `k` of `n` inputs are true.
    pub fn at_least(n: usize, k: usize) -> TruthTable {
        TruthTable::from_fn(n, |x| x.iter().filter(|&&b| b).count() >= k)
    }
}
