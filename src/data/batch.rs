// ============================================================
// Layer 4 — Sentence-Pair Batch
// ============================================================
// The call interface of the model: one label per pair plus two
// integer index matrices.
//
//   labels:    [batch]       float targets, ignored by forward
//   sentence1: [batch, L1]   token ids of the first sentences
//   sentence2: [batch, L2]   token ids of the second sentences
//
// L1 and L2 are fixed per batch. Rows arrive already padded by
// the caller; a ragged row is rejected rather than padded here,
// because choosing a padding id is a vocabulary decision.
//
// B is the Burn Backend so the same batch type works on any
// device.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::domain::sentence_pair::SentencePair;
use crate::error::{ModelError, Result};

#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// Targets — shape: [batch_size]
    pub labels: Tensor<B, 1>,

    /// First sentences — shape: [batch_size, len1]
    pub sentence1: Tensor<B, 2, Int>,

    /// Second sentences — shape: [batch_size, len2]
    pub sentence2: Tensor<B, 2, Int>,
}

impl<B: Backend> PairBatch<B> {
    /// Wrap existing tensors, checking that they describe the same
    /// number of pairs and that neither sentence is empty.
    pub fn new(
        labels:    Tensor<B, 1>,
        sentence1: Tensor<B, 2, Int>,
        sentence2: Tensor<B, 2, Int>,
    ) -> Result<Self> {
        let [batch1, len1] = sentence1.dims();
        let [batch2, len2] = sentence2.dims();
        let [n_labels]     = labels.dims();

        if batch1 == 0 {
            return Err(ModelError::EmptyBatch);
        }
        if batch2 != batch1 {
            return Err(ModelError::shape("sentence2 batch size", batch1, batch2));
        }
        if n_labels != batch1 {
            return Err(ModelError::shape("label count", batch1, n_labels));
        }
        if len1 == 0 {
            return Err(ModelError::EmptySentence { sentence: 1 });
        }
        if len2 == 0 {
            return Err(ModelError::EmptySentence { sentence: 2 });
        }

        Ok(Self { labels, sentence1, sentence2 })
    }

    /// Stack caller-padded pairs into tensors on `device`.
    ///
    /// Every `sentence1` must have the same length, and likewise every
    /// `sentence2`; the two lengths may differ from each other.
    pub fn from_pairs(pairs: &[SentencePair], device: &B::Device) -> Result<Self> {
        let first = pairs.first().ok_or(ModelError::EmptyBatch)?;
        let (len1, len2) = first.lengths();
        let batch_size   = pairs.len();

        // reshape treats a 0 as "keep this dim", so empty rows never reach it
        if len1 == 0 {
            return Err(ModelError::EmptySentence { sentence: 1 });
        }
        if len2 == 0 {
            return Err(ModelError::EmptySentence { sentence: 2 });
        }

        let sent1_flat = flatten_rows(pairs.iter().map(|p| &p.sentence1), len1, "sentence1 row length")?;
        let sent2_flat = flatten_rows(pairs.iter().map(|p| &p.sentence2), len2, "sentence2 row length")?;
        let labels: Vec<f32> = pairs.iter().map(|p| p.label).collect();

        // Int tensors are built flat then reshaped to [batch, len]
        let sentence1 = Tensor::<B, 1, Int>::from_ints(sent1_flat.as_slice(), device)
            .reshape([batch_size, len1]);
        let sentence2 = Tensor::<B, 1, Int>::from_ints(sent2_flat.as_slice(), device)
            .reshape([batch_size, len2]);
        let labels = Tensor::<B, 1>::from_floats(labels.as_slice(), device);

        tracing::debug!(
            "Stacked {} pairs into batch: len1={}, len2={}",
            batch_size, len1, len2
        );

        Self::new(labels, sentence1, sentence2)
    }

    pub fn batch_size(&self) -> usize {
        self.sentence1.dims()[0]
    }

    /// Padded sentence lengths as (L1, L2)
    pub fn lengths(&self) -> (usize, usize) {
        (self.sentence1.dims()[1], self.sentence2.dims()[1])
    }
}

fn flatten_rows<'a>(
    rows:    impl Iterator<Item = &'a Vec<u32>>,
    len:     usize,
    context: &'static str,
) -> Result<Vec<i64>> {
    let mut flat = Vec::new();
    for row in rows {
        if row.len() != len {
            return Err(ModelError::shape(context, len, row.len()));
        }
        // i64 holds every u32; range against the vocabulary is the embedding's check
        flat.extend(row.iter().map(|&id| i64::from(id)));
    }
    Ok(flat)
}

// ─── PairBatcher ──────────────────────────────────────────────────────────────
/// Burn Batcher over SentencePairs, so a harness can hand the model
/// straight to a DataLoaderBuilder. Each batch carries its own Result:
/// a ragged or empty batch is reported, not panicked on.
#[derive(Clone, Debug, Default)]
pub struct PairBatcher;

impl PairBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, SentencePair, Result<PairBatch<B>>> for PairBatcher {
    fn batch(&self, items: Vec<SentencePair>, device: &B::Device) -> Result<PairBatch<B>> {
        PairBatch::from_pairs(&items, device)
    }
}
