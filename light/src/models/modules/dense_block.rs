//! # Dense-Connection Residual Block
//!
//! The building block the Light encoder and decoder stages are assembled
//! from. Inside the block, every evaluated sub-layer consumes the running
//! sum of the block input and all earlier sub-layer outputs, so late layers
//! see the accumulated features rather than only their direct predecessor.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        Initializer, LeakyRelu, LeakyReluConfig, PaddingConfig2d,
    },
    prelude::*,
};

/// A 3×3 channel-preserving convolution followed by a leaky rectifier.
#[derive(Module, Debug)]
struct DenseUnit<B: Backend> {
    conv: Conv2d<B>,
    act: LeakyRelu,
}

impl<B: Backend> DenseUnit<B> {
    fn init(channels: usize, initializer: &Initializer, device: &Device<B>) -> Self {
        let conv = Conv2dConfig::new([channels, channels], [3, 3])
            .with_stride([1, 1])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_initializer(initializer.clone())
            .init(device);

        Self {
            conv,
            act: LeakyReluConfig::new().init(),
        }
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        self.act.forward(self.conv.forward(x))
    }
}

/// Configuration for the [`DenseBlock`] module.
#[derive(Config, Debug)]
pub struct DenseBlockConfig {
    /// Number of feature channels, preserved through the block.
    channels: usize,
    /// Residual weighting applied to the fused branch.
    #[config(default = "0.5")]
    beta: f64,
    /// Parameter initializer for every convolution in the block.
    #[config(
        default = "Initializer::KaimingUniform { gain: 1.0 / 3.0_f64.sqrt(), fan_out_only: false }"
    )]
    initializer: Initializer,
}

impl DenseBlockConfig {
    /// Initializes a new [`DenseBlock`] module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> DenseBlock<B> {
        DenseBlock {
            unit1: DenseUnit::init(self.channels, &self.initializer, device),
            unit2: DenseUnit::init(self.channels, &self.initializer, device),
            unit3: DenseUnit::init(self.channels, &self.initializer, device),
            unit4: DenseUnit::init(self.channels, &self.initializer, device),
            fuse: Conv2dConfig::new([self.channels, self.channels], [3, 3])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .with_initializer(self.initializer.clone())
                .init(device),
            beta: self.beta,
        }
    }
}

/// A dense-connection residual block.
///
/// The fused feature sum passes through a final 3×3 convolution without
/// activation, is scaled by `beta`, and is added back onto the block input.
/// Output shape always equals input shape `[N, C, H, W]`.
#[derive(Module, Debug)]
pub struct DenseBlock<B: Backend> {
    unit1: DenseUnit<B>,
    unit2: DenseUnit<B>,
    // Units 3 and 4 hold parameters but take no part in the fused sum; the
    // four-unit weight layout is kept so records stay interchangeable.
    unit3: DenseUnit<B>,
    unit4: DenseUnit<B>,
    fuse: Conv2d<B>,
    beta: f64,
}

impl<B: Backend> DenseBlock<B> {
    /// Applies the block to `x` of shape `[N, C, H, W]`, returning the same shape.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let out1 = self.unit1.forward(x.clone());
        let sum1 = x.clone() + out1;
        let out2 = self.unit2.forward(sum1.clone());
        let sum2 = x.clone() + sum1.clone() + out2;
        let fused = x.clone() + sum1 + sum2;

        x + self.fuse.forward(fused) * self.beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{ndarray::NdArrayDevice, NdArray},
        tensor::Distribution,
    };

    type TestBackend = NdArray;
    type TestDevice = NdArrayDevice;

    #[test]
    fn dense_block_preserves_shape() {
        let device = TestDevice::default();

        for channels in [1, 4, 16] {
            let block = DenseBlockConfig::new(channels).init::<TestBackend>(&device);
            let x = Tensor::<TestBackend, 4>::random(
                [2, channels, 8, 8],
                Distribution::Normal(0.0, 1.0),
                &device,
            );
            let y = block.forward(x.clone());
            assert_eq!(y.dims(), x.dims());
        }
    }

    #[test]
    fn zero_initialized_block_is_identity() {
        let device = TestDevice::default();

        for beta in [0.5, 2.0] {
            let block = DenseBlockConfig::new(4)
                .with_beta(beta)
                .with_initializer(Initializer::Zeros)
                .init::<TestBackend>(&device);
            let x = Tensor::<TestBackend, 4>::random(
                [1, 4, 6, 6],
                Distribution::Normal(0.0, 1.0),
                &device,
            );
            let y = block.forward(x.clone());

            let diff = (y - x).abs().sum().into_scalar();
            assert_eq!(
                diff, 0.0,
                "With zero weights only the identity path remains"
            );
        }
    }

    #[test]
    fn beta_scales_only_the_fused_branch() {
        let device = TestDevice::default();

        // Constant weights make both blocks compute the same fused branch,
        // so the residuals must differ exactly by the beta ratio.
        let block_half = DenseBlockConfig::new(2)
            .with_beta(0.5)
            .with_initializer(Initializer::Ones)
            .init::<TestBackend>(&device);
        let block_full = DenseBlockConfig::new(2)
            .with_beta(1.0)
            .with_initializer(Initializer::Ones)
            .init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::ones([1, 2, 4, 4], &device);
        let residual_half = block_half.forward(x.clone()) - x.clone();
        let residual_full = block_full.forward(x.clone()) - x;

        let diff = (residual_full - residual_half * 2.0)
            .abs()
            .max()
            .into_scalar();
        assert!(
            diff < 1e-3,
            "Doubling beta must double the residual contribution, diff {diff}"
        );
    }
}
