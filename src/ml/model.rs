// ============================================================
// Layer 5 — Decomposable Attention Model
// ============================================================
// Config, the model and its three stages:
//
//   Attend    — f on every token, S = F1·F2ᵀ, softmax both ways
//   Compare   — [token ; attended counterpart] → g
//   Aggregate — sum over positions, [v1 ; v2] → h → hidden → out
//
// Every stage checks the widths it concatenates and returns a
// ShapeMismatch instead of letting a matmul panic.
//
// Reference: Parikh et al. (2016), §2.1–2.3

use burn::prelude::*;

use crate::data::batch::PairBatch;
use crate::domain::mode::Mode;
use crate::error::{self, ModelError};
use crate::ml::{
    alignment::Alignment,
    block::{FeedForwardBlock, FeedForwardBlockConfig},
    embedding::TokenEmbedding,
};

// #[derive(Config)] brings Clone, serde and the with_* setters; the
// harness can persist this with config.save(path).
#[derive(Config, Debug)]
pub struct DecomposableAttentionConfig {
    pub vocab_size: usize,
    #[config(default = 300)]
    pub embed_dim:  usize,
    #[config(default = 0.2)]
    pub dropout:    f64,
}

impl DecomposableAttentionConfig {
    /// Build a model with a randomly initialised, trainable embedding table.
    pub fn init<B: Backend>(&self, device: &B::Device) -> error::Result<DecomposableAttention<B>> {
        self.validate()?;
        let embedding = TokenEmbedding::new(self.vocab_size, self.embed_dim, device);
        Ok(self.assemble(embedding, device))
    }

    /// Build a model whose embedding table is copied from `weights`
    /// ([vocab_size, embed_dim]) and frozen.
    pub fn init_pretrained<B: Backend>(
        &self,
        weights: Tensor<B, 2>,
        device:  &B::Device,
    ) -> error::Result<DecomposableAttention<B>> {
        self.validate()?;
        let embedding = TokenEmbedding::pretrained(self.vocab_size, self.embed_dim, weights, device)?;
        Ok(self.assemble(embedding, device))
    }

    fn validate(&self) -> error::Result<()> {
        if self.vocab_size == 0 {
            return Err(ModelError::InvalidConfig {
                param:  "vocab_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.embed_dim == 0 {
            return Err(ModelError::InvalidConfig {
                param:  "embed_dim",
                reason: "must be positive".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(ModelError::InvalidConfig {
                param:  "dropout",
                reason: format!("{} is outside [0, 1)", self.dropout),
            });
        }
        Ok(())
    }

    fn assemble<B: Backend>(
        &self,
        embedding: TokenEmbedding<B>,
        device:    &B::Device,
    ) -> DecomposableAttention<B> {
        let d     = self.embed_dim;
        let block = |d_input: usize, d_output: usize| -> FeedForwardBlock<B> {
            FeedForwardBlockConfig::new(d_input, d_output)
                .with_dropout(self.dropout)
                .init(device)
        };

        let model = DecomposableAttention {
            embedding,
            mlp_f:        block(d, d),
            mlp_g:        block(2 * d, d),
            mlp_h:        block(2 * d, d),
            score_hidden: block(d, d),
            score_out:    block(d, 1),
            embed_dim:    d,
        };

        tracing::info!(
            "Decomposable attention ready: vocab_size={}, embed_dim={}, frozen_embedding={}",
            self.vocab_size, d, model.is_embedding_frozen()
        );
        model
    }
}

#[derive(Module, Debug)]
pub struct DecomposableAttention<B: Backend> {
    pub embedding:    TokenEmbedding<B>,
    /// Attend: d → d, applied to every token before scoring
    pub mlp_f:        FeedForwardBlock<B>,
    /// Compare: 2d → d, applied to [token ; attended counterpart]
    pub mlp_g:        FeedForwardBlock<B>,
    /// Aggregate: 2d → d, applied to [sentence1 vector ; sentence2 vector]
    pub mlp_h:        FeedForwardBlock<B>,
    pub score_hidden: FeedForwardBlock<B>,
    /// d → 1
    pub score_out:    FeedForwardBlock<B>,
    pub embed_dim:    usize,
}

/// Everything a forward call produces: the score plus the soft
/// alignments it was computed from.
#[derive(Debug, Clone)]
pub struct PairScoreOutput<B: Backend> {
    /// [batch, 1]
    pub score:     Tensor<B, 2>,
    pub alignment: Alignment<B>,
}

impl<B: Backend> DecomposableAttention<B> {
    /// batch.sentence1: [batch, len1], batch.sentence2: [batch, len2] → [batch, 1]
    pub fn forward(&self, batch: PairBatch<B>, mode: Mode) -> error::Result<Tensor<B, 2>> {
        Ok(self.forward_with_alignment(batch, mode)?.score)
    }

    pub fn forward_with_alignment(&self, batch: PairBatch<B>, mode: Mode) -> error::Result<PairScoreOutput<B>> {
        self.score_pair(batch.sentence1, batch.sentence2, mode)
    }

    /// Score raw index matrices without building a PairBatch.
    pub fn score_pair(
        &self,
        sentence1: Tensor<B, 2, Int>,
        sentence2: Tensor<B, 2, Int>,
        mode:      Mode,
    ) -> error::Result<PairScoreOutput<B>> {
        check_inputs(&sentence1, &sentence2)?;

        let embed1 = self.embedding.forward(sentence1)?; // [batch, len1, d]
        let embed2 = self.embedding.forward(sentence2)?; // [batch, len2, d]

        let alignment = self.attend(embed1.clone(), embed2.clone(), mode)?;
        let (g1, g2)  = self.compare(embed1, embed2, &alignment, mode)?;
        let score     = self.aggregate(g1, g2, mode)?;

        tracing::debug!(
            "Scored batch: scores={:?}, output={:?}, mode={:?}",
            alignment.scores.dims(), score.dims(), mode
        );

        Ok(PairScoreOutput { score, alignment })
    }

    /// Project both sentences through `f` and build the soft alignments.
    pub fn attend(&self, embed1: Tensor<B, 3>, embed2: Tensor<B, 3>, mode: Mode) -> error::Result<Alignment<B>> {
        self.check_pair("attend input", embed1.dims(), embed2.dims())?;

        let f1 = self.mlp_f.forward_tokens(embed1, mode);
        let f2 = self.mlp_f.forward_tokens(embed2, mode);
        Ok(Alignment::from_projections(f1, f2))
    }

    /// Pair each token with its attended counterpart and run `g` over the
    /// [batch, len, 2d] result → ([batch, len1, d], [batch, len2, d]).
    pub fn compare(
        &self,
        embed1:    Tensor<B, 3>,
        embed2:    Tensor<B, 3>,
        alignment: &Alignment<B>,
        mode:      Mode,
    ) -> error::Result<(Tensor<B, 3>, Tensor<B, 3>)> {
        self.check_pair("compare input", embed1.dims(), embed2.dims())?;
        let (attended1, attended2) = alignment.attend(embed1.clone(), embed2.clone());

        let combined1 = Tensor::cat(vec![embed1, attended1], 2);
        let combined2 = Tensor::cat(vec![embed2, attended2], 2);
        self.check_width("compare input", combined1.dims()[2])?;
        self.check_width("compare input", combined2.dims()[2])?;

        let g1 = self.mlp_g.forward_tokens(combined1, mode);
        let g2 = self.mlp_g.forward_tokens(combined2, mode);
        Ok((g1, g2))
    }

    /// Sum over positions, concatenate the two sentence vectors and run the
    /// scoring head `h` → hidden → out, giving [batch, 1].
    pub fn aggregate(&self, g1: Tensor<B, 3>, g2: Tensor<B, 3>, mode: Mode) -> error::Result<Tensor<B, 2>> {
        self.check_pair("aggregate input", g1.dims(), g2.dims())?;
        let [batch, _, d] = g1.dims();

        let sent1 = g1.sum_dim(1).reshape([batch, d]);
        let sent2 = g2.sum_dim(1).reshape([batch, d]);

        let combined = Tensor::cat(vec![sent1, sent2], 1);
        self.check_width("aggregate input", combined.dims()[1])?;

        let x = self.mlp_h.forward(combined, mode);
        let x = self.score_hidden.forward(x, mode);
        Ok(self.score_out.forward(x, mode))
    }

    pub fn is_embedding_frozen(&self) -> bool {
        self.embedding.is_frozen()
    }

    /// Both sentences must share the batch size and carry embed_dim features.
    fn check_pair(&self, context: &'static str, dims1: [usize; 3], dims2: [usize; 3]) -> error::Result<()> {
        if dims1[0] != dims2[0] {
            return Err(ModelError::shape(context, dims1[0], dims2[0]));
        }
        for dims in [dims1, dims2] {
            if dims[2] != self.embed_dim {
                return Err(ModelError::shape(context, self.embed_dim, dims[2]));
            }
        }
        Ok(())
    }

    fn check_width(&self, context: &'static str, width: usize) -> error::Result<()> {
        if width != 2 * self.embed_dim {
            return Err(ModelError::shape(context, 2 * self.embed_dim, width));
        }
        Ok(())
    }
}

fn check_inputs<B: Backend>(sentence1: &Tensor<B, 2, Int>, sentence2: &Tensor<B, 2, Int>) -> error::Result<()> {
    let [batch1, len1] = sentence1.dims();
    let [batch2, len2] = sentence2.dims();

    if batch1 == 0 {
        return Err(ModelError::EmptyBatch);
    }
    if batch1 != batch2 {
        return Err(ModelError::shape("sentence2 batch size", batch1, batch2));
    }
    if len1 == 0 {
        return Err(ModelError::EmptySentence { sentence: 1 });
    }
    if len2 == 0 {
        return Err(ModelError::EmptySentence { sentence: 2 });
    }
    Ok(())
}
