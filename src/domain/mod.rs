// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe what the model consumes,
// with no Burn tensors in sight:
//
//   sentence_pair.rs — one labelled pair of token sequences
//   mode.rs          — train / eval switch threaded through
//                      every forward call
//
// Keeping these framework-free means a harness can build,
// serialise and filter its examples without touching a backend.

/// A labelled pair of token-index sequences
pub mod sentence_pair;

/// Training / evaluation mode flag
pub mod mode;
