//! Configuration for the built-in solver.

/// Limits applied by [`ExactSolver`][crate::simplex::ExactSolver].
///
/// Built with the `with_*` methods on top of [`SolverConfig::default`]:
///
/// ```
/// use threshold_rs::config::SolverConfig;
///
/// let config = SolverConfig::default().with_max_nodes(10_000);
/// assert_eq!(config.max_nodes, Some(10_000));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of constraint rows a single model accepts.
    pub max_rows: usize,
    /// Maximum number of columns a model may be created with.
    pub max_columns: usize,
    /// Branch-and-bound node budget. `None` means unlimited.
    pub max_nodes: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_rows: 1 << 16,
            max_columns: 1 << 12,
            max_nodes: None,
        }
    }
}

impl SolverConfig {
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn without_node_limit(mut self) -> Self {
        self.max_nodes = None;
        self
    }
}
