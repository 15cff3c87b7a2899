// ============================================================
// Layer 3 — SentencePair Domain Type
// ============================================================
// One scored example: two token-index sequences plus the label
// the harness trains against. The label travels with the pair
// so batches stay aligned with their targets, but the model
// itself never reads it.
//
// Token indices are already vocabulary ids. Padding to a
// common length inside a batch is the caller's job.
//
// Example:
//   sentence1: [1, 2]      ("a dog")
//   sentence2: [3, 4, 5]   ("an animal runs")
//   label:     1.0         (entailment)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentencePair {
    /// Target score for the pair; ignored by the forward pass
    pub label: f32,

    /// Token ids of the first sentence (premise / query)
    pub sentence1: Vec<u32>,

    /// Token ids of the second sentence (hypothesis / candidate)
    pub sentence2: Vec<u32>,
}

impl SentencePair {
    pub fn new(label: f32, sentence1: Vec<u32>, sentence2: Vec<u32>) -> Self {
        Self { label, sentence1, sentence2 }
    }

    /// Lengths of both sentences as (L1, L2)
    pub fn lengths(&self) -> (usize, usize) {
        (self.sentence1.len(), self.sentence2.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        let pair = SentencePair::new(0.0, vec![1, 2], vec![3, 4, 5]);
        assert_eq!(pair.lengths(), (2, 3));
    }
}
