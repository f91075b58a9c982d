//! Linear forms: weight vectors with a threshold.

use std::fmt;

use crate::truth_table::TruthTable;

/// A weight vector `[w₀, ..., wₙ₋₁]` with threshold `T`.
///
/// The form computes `f(x) = 1` iff `Σ wᵢxᵢ >= T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinearForm {
    weights: Vec<i64>,
    threshold: i64,
}

impl LinearForm {
    pub fn new(weights: Vec<i64>, threshold: i64) -> Self {
        Self { weights, threshold }
    }

    /// Splits `n + 1` values into `n` weights followed by the threshold.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_vec(mut values: Vec<i64>) -> Option<Self> {
        let threshold = values.pop()?;
        Some(Self {
            weights: values,
            threshold,
        })
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn num_vars(&self) -> usize {
        self.weights.len()
    }

    /// The `n + 1` values: weights followed by the threshold.
    pub fn to_vec(&self) -> Vec<i64> {
        let mut values = self.weights.clone();
        values.push(self.threshold);
        values
    }

    /// Weighted sum of the assignment with the given index (bit `i` is `xᵢ`).
    pub fn weighted_sum(&self, assignment: usize) -> i64 {
        self.weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| (assignment >> i) & 1 == 1)
            .map(|(_, w)| w)
            .sum()
    }

    /// Evaluates the form at the assignment with the given index.
    pub fn evaluate_index(&self, assignment: usize) -> bool {
        self.weighted_sum(assignment) >= self.threshold
    }

    /// Evaluates the form at `[x₀, ..., xₙ₋₁]`.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        assert_eq!(
            assignment.len(),
            self.num_vars(),
            "Expected {} inputs, got {}",
            self.num_vars(),
            assignment.len()
        );
        let sum: i64 = self
            .weights
            .iter()
            .zip(assignment)
            .filter(|&(_, &x)| x)
            .map(|(w, _)| w)
            .sum();
        sum >= self.threshold
    }

    /// Checks the form against every row of `tt`.
    ///
    /// Identification does not call this itself; it is offered for
    /// callers that want independent verification.
    pub fn realizes(&self, tt: &TruthTable) -> bool {
        tt.num_vars() == self.num_vars()
            && (0..tt.num_bits()).all(|index| tt.bit(index) == self.evaluate_index(index))
    }

    /// Rewrites the form for the function with input `var` complemented.
    ///
    /// `w·¬x = w - w·x`, so the weight changes sign and the threshold
    /// absorbs the constant: `w' = -w`, `T' = T + w'`. Applying it twice
    /// gives back the original form.
    pub fn flip_inplace(&mut self, var: usize) {
        self.weights[var] = -self.weights[var];
        self.threshold += self.weights[var];
    }

    pub fn flip(&self, var: usize) -> Self {
        let mut form = self.clone();
        form.flip_inplace(var);
        form
    }

    /// Builds the truth table computed by the form.
    pub fn to_truth_table(&self) -> TruthTable {
        let mut tt = TruthTable::zero(self.num_vars());
        for index in 0..tt.num_bits() {
            if self.evaluate_index(index) {
                tt.set_bit(index, true);
            }
        }
        tt
    }
}

impl fmt::Display for LinearForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.weights.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", w)?;
        }
        write!(f, "; {}]", self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truth_table::named;

    #[test]
    fn test_majority() {
        let form = LinearForm::new(vec![1, 1, 1], 2);
        assert!(form.realizes(&named::majority(3)));
        assert!(!form.realizes(&named::and_all(3)));
        assert!(!form.realizes(&named::majority(5)));
        assert_eq!(form.to_string(), "[1, 1, 1; 2]");
        assert_eq!(form.to_vec(), vec![1, 1, 1, 2]);
        assert_eq!(LinearForm::from_vec(vec![1, 1, 1, 2]), Some(form));
        assert_eq!(LinearForm::from_vec(Vec::new()), None);
    }

    #[test]
    fn test_evaluate() {
        let form = LinearForm::new(vec![2, -1, 1], 1);
        assert_eq!(form.weighted_sum(0b101), 3);
        assert!(form.evaluate(&[true, true, false]));
        assert!(!form.evaluate(&[false, true, true]));
        assert_eq!(form.evaluate_index(0b110), form.evaluate(&[false, true, true]));
    }

    #[test]
    fn test_flip() {
        // x₀ ∧ x₁ as [1, 1; 2]; complementing x₁ gives x₀ ∧ ¬x₁.
        let form = LinearForm::new(vec![1, 1], 2);
        let flipped = form.flip(1);
        assert_eq!(flipped, LinearForm::new(vec![1, -1], 1));
        assert!(flipped.realizes(&TruthTable::from_fn(2, |x| x[0] && !x[1])));
        assert_eq!(flipped.flip(1), form);
    }

    #[test]
    fn test_constants() {
        assert!(LinearForm::new(vec![0, 0], 1).realizes(&TruthTable::zero(2)));
        assert!(LinearForm::new(vec![0, 0], 0).realizes(&TruthTable::one(2)));
        assert!(LinearForm::new(vec![], 0).realizes(&TruthTable::one(0)));
        assert_eq!(LinearForm::new(vec![1, 1], 1).to_truth_table(), named::or_all(2));
    }
}
