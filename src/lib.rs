//! Decomposable Attention sentence-pair scorer.
//!
//! Two token-index matrices go in, one unnormalised score per pair
//! comes out:
//!
//! ```ignore
//! let model = DecomposableAttentionConfig::new(vocab_size).init::<B>(&device)?;
//! let batch = PairBatch::from_pairs(&pairs, &device)?;
//! let score = model.forward(batch, Mode::Eval)?; // [batch, 1]
//! ```
//!
//! Training loops, losses and data loading belong to the caller.

pub mod data;
pub mod domain;
pub mod error;
pub mod ml;

pub use data::batch::{PairBatch, PairBatcher};
pub use domain::{mode::Mode, sentence_pair::SentencePair};
pub use error::{ModelError, Result};
pub use ml::{
    alignment::Alignment,
    block::{seed_dropout, FeedForwardBlock, FeedForwardBlockConfig},
    embedding::TokenEmbedding,
    model::{DecomposableAttention, DecomposableAttentionConfig, PairScoreOutput},
};
