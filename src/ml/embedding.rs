// ============================================================
// Layer 5 — Token Embedding
// ============================================================
// Maps [batch, len] token ids to [batch, len, embed_dim]
// vectors by table lookup.
//
// Two construction paths:
//   - random:     a fresh trainable table
//   - pretrained: the table is copied from a caller-supplied
//                 [vocab_size, embed_dim] matrix and frozen
//
// Frozen means the weight parameter does not require grad, so
// backward() produces no gradient for it and the optimizer
// step leaves it alone. The forward computation is identical
// in both cases.
//
// Indices outside [0, vocab_size) are reported as an error
// instead of being clamped into range.

use burn::{
    module::Param,
    nn::{Embedding, EmbeddingConfig},
    prelude::*,
};

use crate::error::{ModelError, Result};

#[derive(Module, Debug)]
pub struct TokenEmbedding<B: Backend> {
    pub embedding: Embedding<B>,
    frozen:        bool,
}

impl<B: Backend> TokenEmbedding<B> {
    /// A randomly initialised, trainable table.
    pub fn new(vocab_size: usize, embed_dim: usize, device: &B::Device) -> Self {
        Self {
            embedding: EmbeddingConfig::new(vocab_size, embed_dim).init(device),
            frozen:    false,
        }
    }

    /// A table initialised from `weights` ([vocab_size, embed_dim]) and
    /// excluded from gradient updates.
    pub fn pretrained(
        vocab_size: usize,
        embed_dim:  usize,
        weights:    Tensor<B, 2>,
        device:     &B::Device,
    ) -> Result<Self> {
        let dims = weights.dims();
        if dims != [vocab_size, embed_dim] {
            return Err(ModelError::shape(
                "pretrained embedding",
                format!("{:?}", [vocab_size, embed_dim]),
                format!("{:?}", dims),
            ));
        }

        let mut embedding = EmbeddingConfig::new(vocab_size, embed_dim).init(device);
        embedding.weight  = Param::from_tensor(weights.to_device(device));

        tracing::info!(
            "Embedding table initialised from pretrained matrix [{}, {}] (frozen)",
            vocab_size, embed_dim
        );

        Ok(Self { embedding: embedding.no_grad(), frozen: true })
    }

    /// [batch, len] ids → [batch, len, embed_dim]
    pub fn forward(&self, ids: Tensor<B, 2, Int>) -> Result<Tensor<B, 3>> {
        // min/max over an empty tensor has no value to report
        let [batch, len] = ids.dims();
        if batch == 0 {
            return Err(ModelError::EmptyBatch);
        }
        if len == 0 {
            return Err(ModelError::EmptySentence { sentence: 1 });
        }
        self.check_bounds(&ids)?;
        Ok(self.embedding.forward(ids))
    }

    /// Whether the table is excluded from optimizer updates
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn vocab_size(&self) -> usize {
        self.embedding.weight.val().dims()[0]
    }

    pub fn embed_dim(&self) -> usize {
        self.embedding.weight.val().dims()[1]
    }

    /// Current table values, [vocab_size, embed_dim]
    pub fn weights(&self) -> Tensor<B, 2> {
        self.embedding.weight.val()
    }

    fn check_bounds(&self, ids: &Tensor<B, 2, Int>) -> Result<()> {
        let vocab_size = self.vocab_size();
        let max = ids.clone().max().into_scalar().elem::<i64>();
        let min = ids.clone().min().into_scalar().elem::<i64>();

        let offending = if min < 0 {
            Some(min)
        } else if max >= vocab_size as i64 {
            Some(max)
        } else {
            None
        };

        match offending {
            Some(index) => Err(ModelError::TokenOutOfRange { index, vocab_size }),
            None        => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn ids(rows: [[i32; 3]; 2], device: &<TestBackend as Backend>::Device) -> Tensor<TestBackend, 2, Int> {
        Tensor::from_ints(rows, device)
    }

    #[test]
    fn test_lookup_shape() {
        let device = Default::default();
        let table  = TokenEmbedding::<TestBackend>::new(10, 4, &device);

        let out = table.forward(ids([[1, 2, 3], [4, 5, 9]], &device)).unwrap();
        assert_eq!(out.dims(), [2, 3, 4]);
        assert!(!table.is_frozen());
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let device = Default::default();
        let table  = TokenEmbedding::<TestBackend>::new(10, 4, &device);

        let err = table.forward(ids([[1, 2, 3], [4, 10, 0]], &device)).unwrap_err();
        assert_eq!(err, ModelError::TokenOutOfRange { index: 10, vocab_size: 10 });

        let err = table.forward(ids([[-1, 2, 3], [4, 5, 0]], &device)).unwrap_err();
        assert_eq!(err, ModelError::TokenOutOfRange { index: -1, vocab_size: 10 });
    }

    #[test]
    fn test_empty_ids_are_an_error() {
        let device = Default::default();
        let table  = TokenEmbedding::<TestBackend>::new(10, 4, &device);

        let err = table.forward(Tensor::zeros([2, 0], &device)).unwrap_err();
        assert_eq!(err, ModelError::EmptySentence { sentence: 1 });

        let err = table.forward(Tensor::zeros([0, 3], &device)).unwrap_err();
        assert_eq!(err, ModelError::EmptyBatch);
    }

    #[test]
    fn test_pretrained_rows_are_looked_up() {
        let device  = Default::default();
        let values: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let weights = Tensor::<TestBackend, 1>::from_floats(values.as_slice(), &device).reshape([3, 4]);

        let table = TokenEmbedding::pretrained(3, 4, weights, &device).unwrap();
        assert!(table.is_frozen());

        let out: Vec<f32> = table
            .forward(Tensor::from_ints([[2, 0]], &device))
            .unwrap()
            .into_data().to_vec().unwrap();
        assert_eq!(out, vec![8.0, 9.0, 10.0, 11.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pretrained_shape_is_checked() {
        let device  = Default::default();
        let weights = Tensor::<TestBackend, 2>::zeros([3, 5], &device);

        let err = TokenEmbedding::pretrained(3, 4, weights, &device).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { context: "pretrained embedding", .. }));
    }
}
