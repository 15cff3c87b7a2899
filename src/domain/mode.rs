// ============================================================
// Layer 3 — Forward Mode
// ============================================================
// Training and evaluation differ in exactly one place: whether
// the feed-forward blocks randomly zero a fraction of their
// input units. The mode is passed explicitly into every forward
// call instead of living in global state, so two evaluation
// calls on the same input always give the same score.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Dropout active
    Train,
    /// Dropout disabled, output is a pure function of the parameters
    #[default]
    Eval,
}

impl Mode {
    pub fn is_train(self) -> bool {
        matches!(self, Mode::Train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_eval() {
        assert_eq!(Mode::default(), Mode::Eval);
        assert!(!Mode::default().is_train());
        assert!(Mode::Train.is_train());
    }
}
