// ============================================================
// Layer 5 — Soft Alignment
// ============================================================
// Given the projected token vectors of both sentences,
//
//   F1: [batch, len1, d]    F2: [batch, len2, d]
//
// build the raw score matrix once and normalise it both ways:
//
//   S  = F1 · F2ᵀ              [batch, len1, len2]
//   P1 = softmax(S,  over len2)
//   S2 = Sᵀ (last two axes)    [batch, len2, len1]
//   P2 = softmax(S2, over len1)
//
// Row i of P1 is a distribution over sentence-2 positions for
// token i of sentence 1, and symmetrically for P2. S2 is taken
// from S rather than recomputed, so the two directions always
// agree on the raw similarities.

use burn::{prelude::*, tensor::activation::softmax};

#[derive(Debug, Clone)]
pub struct Alignment<B: Backend> {
    /// Raw similarities S — shape: [batch, len1, len2]
    pub scores: Tensor<B, 3>,

    /// Sᵀ — shape: [batch, len2, len1]
    pub scores_transposed: Tensor<B, 3>,

    /// Sentence 1 → sentence 2 weights — shape: [batch, len1, len2]
    pub prob1: Tensor<B, 3>,

    /// Sentence 2 → sentence 1 weights — shape: [batch, len2, len1]
    pub prob2: Tensor<B, 3>,
}

impl<B: Backend> Alignment<B> {
    pub fn from_projections(f1: Tensor<B, 3>, f2: Tensor<B, 3>) -> Self {
        let scores            = f1.matmul(f2.swap_dims(1, 2));
        let scores_transposed = scores.clone().swap_dims(1, 2);

        let prob1 = softmax(scores.clone(), 2);
        let prob2 = softmax(scores_transposed.clone(), 2);

        Self { scores, scores_transposed, prob1, prob2 }
    }

    /// Weighted sums of the other sentence's embeddings:
    /// (P1 · E2, P2 · E1), shapes [batch, len1, d] and [batch, len2, d].
    pub fn attend(&self, embed1: Tensor<B, 3>, embed2: Tensor<B, 3>) -> (Tensor<B, 3>, Tensor<B, 3>) {
        let attended1 = self.prob1.clone().matmul(embed2);
        let attended2 = self.prob2.clone().matmul(embed1);
        (attended1, attended2)
    }
}
