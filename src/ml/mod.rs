// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn module code lives here. The forward computation is
// a straight line:
//
//   ids ──► TokenEmbedding ──► Attend ──► Compare ──► Aggregate ──► score
//
//   embedding.rs — token id → vector lookup, optionally frozen
//                  from a pretrained matrix
//
//   block.rs     — dropout → Linear → ReLU, the only learnable
//                  transform in the model
//
//   alignment.rs — score matrix and its two softmax
//                  normalisations
//
//   model.rs     — config, the full model and its three stages
//
// Reference: Parikh et al. (2016) A Decomposable Attention
//            Model for Natural Language Inference
//            Burn Book §3 (Building Blocks)

/// Token embedding table
pub mod embedding;

/// Feed-forward block builder
pub mod block;

/// Soft alignment between two sentences
pub mod alignment;

/// Decomposable attention model and config
pub mod model;
