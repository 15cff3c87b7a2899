// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Turns domain SentencePairs into the tensors the model reads:
//
//   Vec<SentencePair>   (Layer 3, plain Rust)
//       │
//       ▼
//   PairBatch<B>        → labels [B], sentence1 [B, L1],
//                         sentence2 [B, L2]
//       │
//       ▼
//   DecomposableAttention::forward   (Layer 5)
//
// Loading, shuffling and padding stay with the caller.

/// Batch tensors for one forward call
pub mod batch;
