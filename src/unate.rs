//! Unateness analysis and polarity normalization.
//!
//! Every threshold function is unate: raising an input either never
//! lowers the output (positive unate) or never raises it (negative unate).
//! [`normalize`] classifies each variable and complements the negative
//! ones, producing a positive-unate equivalent of the function together
//! with the list of flipped variables needed to undo the transformation.

use std::fmt;

use log::debug;

use crate::truth_table::TruthTable;

/// Influence of a single variable on a function.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Unateness {
    /// f|ₓ₌₀ ⊆ f|ₓ₌₁
    Positive,
    /// f|ₓ₌₁ ⊆ f|ₓ₌₀
    Negative,
    /// f|ₓ₌₀ = f|ₓ₌₁: the function does not depend on the variable.
    Independent,
}

impl fmt::Display for Unateness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unateness::Positive => write!(f, "+"),
            Unateness::Negative => write!(f, "-"),
            Unateness::Independent => write!(f, "0"),
        }
    }
}

/// Classifies variable `var` of `tt`, or returns `None` if it is binate.
pub fn classify(tt: &TruthTable, var: usize) -> Option<Unateness> {
    let c0 = tt.cofactor0(var);
    let c1 = tt.cofactor1(var);
    let smoothing = &c0 | &c1;

    if c0 == c1 {
        Some(Unateness::Independent)
    } else if c0 == smoothing {
        Some(Unateness::Negative)
    } else if c1 == smoothing {
        Some(Unateness::Positive)
    } else {
        None
    }
}

/// A positive-unate function obtained by complementing some inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositiveUnate {
    /// The working table, positive unate in every variable.
    pub table: TruthTable,
    /// Variables complemented to reach `table`, in increasing order.
    pub flipped: Vec<usize>,
    /// Classification of each variable of the *original* function.
    pub classes: Vec<Unateness>,
}

/// Outcome of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// Variable `var` is binate; later variables were not examined.
    Binate { var: usize },
    /// The function is unate.
    Unate(PositiveUnate),
}

/// Classifies all variables of `tt` in increasing order and flips the negative ones.
///
/// Stops at the first binate variable. The caller's table is never modified:
/// flips are applied to an owned working copy.
///
/// ```
/// use threshold_rs::truth_table::TruthTable;
/// use threshold_rs::unate::{normalize, Normalization};
///
/// // x₀ ∧ ¬x₁
/// let f = TruthTable::from_fn(2, |x| x[0] && !x[1]);
/// let Normalization::Unate(pu) = normalize(&f) else { panic!("unate") };
/// assert_eq!(pu.flipped, vec![1]);
/// assert_eq!(pu.table, TruthTable::from_fn(2, |x| x[0] && x[1]));
/// ```
pub fn normalize(tt: &TruthTable) -> Normalization {
    let mut table = tt.clone();
    let mut flipped = Vec::new();
    let mut classes = Vec::with_capacity(tt.num_vars());

    for var in 0..tt.num_vars() {
        match classify(&table, var) {
            None => {
                debug!("normalize: x{} is binate", var);
                return Normalization::Binate { var };
            }
            Some(Unateness::Negative) => {
                table.flip_inplace(var);
                flipped.push(var);
                classes.push(Unateness::Negative);
            }
            Some(class) => classes.push(class),
        }
    }

    debug!(
        "normalize: classes [{}], flipped {:?}",
        classes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
        flipped
    );
    Normalization::Unate(PositiveUnate {
        table,
        flipped,
        classes,
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::truth_table::named;

    #[test]
    fn test_classify() {
        let f = TruthTable::from_fn(3, |x| x[0] && !x[1]);
        assert_eq!(classify(&f, 0), Some(Unateness::Positive));
        assert_eq!(classify(&f, 1), Some(Unateness::Negative));
        assert_eq!(classify(&f, 2), Some(Unateness::Independent));
        assert_eq!(classify(&named::parity(2), 0), None);
    }

    #[test]
    fn test_xor_is_binate() {
        let xor = TruthTable::from_binary_str(2, "0110").unwrap();
        assert_eq!(normalize(&xor), Normalization::Binate { var: 0 });
    }

    #[test]
    fn test_binate_stops_early() {
        // x₀ is positive, x₁ and x₂ are binate: classification stops at x₁.
        let f = TruthTable::from_fn(3, |x| x[0] && (x[1] ^ x[2]));
        assert_eq!(normalize(&f), Normalization::Binate { var: 1 });
    }

    #[test]
    fn test_constant() {
        let Normalization::Unate(pu) = normalize(&TruthTable::zero(3)) else {
            panic!("constant functions are unate");
        };
        assert!(pu.flipped.is_empty());
        assert_eq!(pu.classes, vec![Unateness::Independent; 3]);
        assert_eq!(pu.table, TruthTable::zero(3));
    }

    #[test]
    fn test_negative_unate() {
        // NOR(x₀, x₁, x₂) becomes AND after flipping every input.
        let nor = !named::or_all(3);
        let Normalization::Unate(pu) = normalize(&nor) else {
            panic!("NOR is unate");
        };
        assert_eq!(pu.flipped, vec![0, 1, 2]);
        assert_eq!(pu.classes, vec![Unateness::Negative; 3]);
        assert_eq!(pu.table, named::and_all(3));
        // The input stays untouched.
        assert_eq!(nor, !named::or_all(3));
    }

    #[test]
    fn test_result_is_positive_unate() {
        for value in 0u32..256 {
            let tt = TruthTable::from_fn(3, |x| {
                let index = x.iter().enumerate().fold(0, |acc, (i, &b)| acc | ((b as u32) << i));
                (value >> index) & 1 == 1
            });
            if let Normalization::Unate(pu) = normalize(&tt) {
                for var in 0..3 {
                    assert_ne!(classify(&pu.table, var), Some(Unateness::Negative));
                    assert_ne!(classify(&pu.table, var), None);
                }
                let mut restored = pu.table.clone();
                for &var in &pu.flipped {
                    restored.flip_inplace(var);
                }
                assert_eq!(restored, tt);
            }
        }
    }
}
