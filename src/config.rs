//! Order book configuration.

/// Sizing and checking options for an [`OrderBook`](crate::OrderBook).
///
/// ```
/// use lob_engine::BookConfig;
///
/// let cfg = BookConfig::default()
///     .with_order_capacity(50_000)
///     .with_invariant_checks(true);
/// assert_eq!(cfg.order_capacity, 50_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookConfig {
    /// Orders to pre-allocate in the arena and the id lookup
    pub order_capacity: usize,

    /// Fills to pre-allocate in the trade log
    pub fill_capacity: usize,

    /// Run a full structural validation after every committed command
    pub check_invariants: bool,
}

/// Default arena pre-allocation
pub const DEFAULT_ORDER_CAPACITY: usize = 1_024;

/// Default fill log pre-allocation
pub const DEFAULT_FILL_CAPACITY: usize = 1_024;

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            fill_capacity: DEFAULT_FILL_CAPACITY,
            check_invariants: false,
        }
    }
}

impl BookConfig {
    #[must_use]
    pub fn with_order_capacity(mut self, capacity: usize) -> Self {
        self.order_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_fill_capacity(mut self, capacity: usize) -> Self {
        self.fill_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BookConfig::default();
        assert_eq!(cfg.order_capacity, DEFAULT_ORDER_CAPACITY);
        assert_eq!(cfg.fill_capacity, DEFAULT_FILL_CAPACITY);
        assert!(!cfg.check_invariants);
    }

    #[test]
    fn test_builder() {
        let cfg = BookConfig::default()
            .with_order_capacity(10)
            .with_fill_capacity(20)
            .with_invariant_checks(true);
        assert_eq!(cfg.order_capacity, 10);
        assert_eq!(cfg.fill_capacity, 20);
        assert!(cfg.check_invariants);
    }
}
