// ============================================================
// Layer 5 — Feed-Forward Block
// ============================================================
// The one learnable transform used at every stage:
//
//   x → dropout(p) → Linear(d_input → d_output) → ReLU
//
// The order is fixed; only the widths change between the
// instances (f, g, h and the two scoring blocks). No two
// instances share weights.
//
// Dropout is driven by the explicit Mode argument rather than
// by whether the backend tracks gradients, so an evaluation
// call on an autodiff backend is still deterministic.
//
// Reference: Parikh et al. (2016) A Decomposable Attention
//            Model for Natural Language Inference, §3

use burn::{
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
    tensor::{activation::relu, Distribution},
};

use crate::domain::mode::Mode;

#[derive(Config, Debug)]
pub struct FeedForwardBlockConfig {
    pub d_input:  usize,
    pub d_output: usize,
    /// Fraction of input units zeroed in training mode
    #[config(default = 0.2)]
    pub dropout:  f64,
}

impl FeedForwardBlockConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FeedForwardBlock<B> {
        FeedForwardBlock {
            dropout: DropoutConfig::new(self.dropout).init(),
            linear:  LinearConfig::new(self.d_input, self.d_output)
                .with_bias(true)
                .init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct FeedForwardBlock<B: Backend> {
    pub dropout: Dropout,
    pub linear:  Linear<B>,
}

impl<B: Backend> FeedForwardBlock<B> {
    /// Apply the block to a [rows, d_input] matrix → [rows, d_output].
    pub fn forward(&self, x: Tensor<B, 2>, mode: Mode) -> Tensor<B, 2> {
        let x = drop_units(&self.dropout, x, mode);
        relu(self.linear.forward(x))
    }

    /// Apply the block independently to every token of a
    /// [batch, len, d_input] tensor → [batch, len, d_output].
    ///
    /// Positions are folded into the row axis so each token vector
    /// goes through the exact same 2D computation.
    pub fn forward_tokens(&self, x: Tensor<B, 3>, mode: Mode) -> Tensor<B, 3> {
        let [batch, len, d_input] = x.dims();
        let out = self.forward(x.reshape([batch * len, d_input]), mode);
        out.reshape([batch, len, self.d_output()])
    }

    pub fn d_input(&self) -> usize {
        self.linear.weight.val().dims()[0]
    }

    pub fn d_output(&self) -> usize {
        self.linear.weight.val().dims()[1]
    }
}

/// Inverted dropout: in training mode each unit survives with
/// probability 1 - p and survivors are scaled by 1 / (1 - p).
/// Evaluation mode returns the input untouched.
pub fn drop_units<B: Backend, const D: usize>(
    dropout: &Dropout,
    x:       Tensor<B, D>,
    mode:    Mode,
) -> Tensor<B, D> {
    if !mode.is_train() || dropout.prob == 0.0 {
        return x;
    }
    let keep = 1.0 - dropout.prob;
    let mask = x.random_like(Distribution::Bernoulli(keep));
    (x * mask).mul_scalar(1.0 / keep)
}

/// Seed the backend RNG that drives dropout masks.
pub fn seed_dropout<B: Backend>(device: &B::Device, seed: u64) {
    tracing::debug!("Seeding dropout RNG with {}", seed);
    B::seed(device, seed);
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_block_widths() {
        let device = Default::default();
        let block: FeedForwardBlock<TestBackend> = FeedForwardBlockConfig::new(8, 4).init(&device);
        assert_eq!(block.d_input(), 8);
        assert_eq!(block.d_output(), 4);

        let out = block.forward(Tensor::ones([5, 8], &device), Mode::Eval);
        assert_eq!(out.dims(), [5, 4]);
    }

    #[test]
    fn test_forward_tokens_keeps_positions() {
        let device = Default::default();
        let block: FeedForwardBlock<TestBackend> = FeedForwardBlockConfig::new(6, 3).init(&device);

        let out = block.forward_tokens(Tensor::ones([2, 7, 6], &device), Mode::Eval);
        assert_eq!(out.dims(), [2, 7, 3]);
    }

    #[test]
    fn test_forward_tokens_matches_row_wise_forward() {
        let device = Default::default();
        let block: FeedForwardBlock<TestBackend> = FeedForwardBlockConfig::new(4, 4).init(&device);
        let x = Tensor::<TestBackend, 3>::random([2, 3, 4], Distribution::Default, &device);

        let tokens: Vec<f32> = block
            .forward_tokens(x.clone(), Mode::Eval)
            .into_data().to_vec().unwrap();
        let rows: Vec<f32> = block
            .forward(x.reshape([6, 4]), Mode::Eval)
            .into_data().to_vec().unwrap();
        assert_eq!(tokens, rows);
    }

    #[test]
    fn test_output_is_non_negative() {
        let device = Default::default();
        let block: FeedForwardBlock<TestBackend> = FeedForwardBlockConfig::new(4, 16).init(&device);
        let x = Tensor::<TestBackend, 2>::random([10, 4], Distribution::Normal(0.0, 3.0), &device);

        let out: Vec<f32> = block.forward(x, Mode::Eval).into_data().to_vec().unwrap();
        assert!(out.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_eval_mode_skips_dropout() {
        let device  = Default::default();
        let dropout = DropoutConfig::new(0.2).init();
        let x = Tensor::<TestBackend, 2>::ones([10, 100], &device);

        let out: Vec<f32> = drop_units(&dropout, x, Mode::Eval).into_data().to_vec().unwrap();
        assert!(out.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_train_mode_zeroes_about_a_fifth() {
        let device  = Default::default();
        seed_dropout::<TestBackend>(&device, 42);
        let dropout = DropoutConfig::new(0.2).init();
        let x = Tensor::<TestBackend, 2>::ones([10, 100], &device);

        let out: Vec<f32> = drop_units(&dropout, x, Mode::Train).into_data().to_vec().unwrap();
        let zeros = out.iter().filter(|&&v| v == 0.0).count();
        // Expected 200 of 1000, standard deviation ~12.6
        assert!((120..=280).contains(&zeros), "zeroed {zeros} of 1000");

        // Survivors are rescaled by 1 / 0.8
        assert!(out.iter().all(|&v| v == 0.0 || (v - 1.25).abs() < 1e-6));
    }
}
