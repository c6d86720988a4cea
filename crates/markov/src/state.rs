//! Transient and absorbing states of a block-ordered chain.

/// Whether a state can be left.
///
/// States are ordered transient first: with `n` transient states, indices
/// `0..n` are transient and every index `>= n` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// A state that the chain can leave.
    Transient,
    /// A state that, once entered, is never left.
    Absorbing,
}

impl StateKind {
    /// Classifies `state` in a chain with `n_transient` transient states.
    pub fn classify(state: usize, n_transient: usize) -> Self {
        if is_absorbing(state, n_transient) {
            Self::Absorbing
        } else {
            Self::Transient
        }
    }

    /// Returns `true` for [`StateKind::Absorbing`].
    pub fn is_absorbing(self) -> bool {
        self == Self::Absorbing
    }
}

/// Returns `true` if `state` is absorbing, i.e. `state >= n_transient`.
pub fn is_absorbing(state: usize, n_transient: usize) -> bool {
    state >= n_transient
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_transient_count() {
        assert!(!is_absorbing(0, 2));
        assert!(!is_absorbing(1, 2));
        assert!(is_absorbing(2, 2));
        assert!(is_absorbing(7, 2));
    }

    #[test]
    fn zero_transient_states() {
        assert!(is_absorbing(0, 0));
    }

    #[test]
    fn classify() {
        assert_eq!(StateKind::classify(0, 1), StateKind::Transient);
        assert_eq!(StateKind::classify(1, 1), StateKind::Absorbing);
        assert!(StateKind::classify(3, 1).is_absorbing());
        assert!(!StateKind::classify(0, 1).is_absorbing());
    }
}
