//! # Light Model Implementation
//!
//! This module defines the main `Light` model, a multi-scale encoder-decoder
//! network assembled from dense-connection residual blocks.
//!
//! ## Core Components
//!
//! - `LightConfig`: a configuration struct to initialize the `Light` model.
//! - `Light`: the main model struct, which orchestrates the forward pass
//!   through the stem, the encoder stages, the bottleneck, and the decoder
//!   stages with their skip connections.
//!
//! Data flow is strictly feed-forward: the input passes through a large
//! 9×9 stem convolution, three encoder stages with 2× average pooling
//! between them, a bottleneck at the lowest resolution, and three decoder
//! stages that each upsample and concatenate the matching encoder features.
//! The output projection maps through a rescaled hyperbolic tangent, so
//! every output value lies in `[0, 1]`.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AvgPool2d, AvgPool2dConfig},
        PRelu, PReluConfig, PaddingConfig2d,
    },
    prelude::*,
    tensor::{
        activation::tanh,
        module::interpolate,
        ops::{InterpolateMode, InterpolateOptions},
    },
};

use super::modules::{DenseBlock, DenseBlockConfig};
use crate::{
    config::{ModelConfig, UpsampleMode},
    error::LightResult,
    special::Identity,
};

const STEM_CHANNELS: usize = 64;

/// Configuration for an encoder stage.
#[derive(Config, Debug)]
pub struct EncoderStageConfig {
    /// Number of input channels.
    in_channels: usize,
    /// Number of output channels, also the width of the dense blocks.
    out_channels: usize,
    /// Residual weighting forwarded to the dense blocks.
    #[config(default = "0.5")]
    residual_beta: f64,
}

impl EncoderStageConfig {
    /// Initializes a new `EncoderStage` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> EncoderStage<B> {
        EncoderStage {
            conv: Conv2dConfig::new([self.in_channels, self.out_channels], [3, 3])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            act: PReluConfig::new().init(device),
            dense1: DenseBlockConfig::new(self.out_channels)
                .with_beta(self.residual_beta)
                .init(device),
            dense2: DenseBlockConfig::new(self.out_channels)
                .with_beta(self.residual_beta)
                .init(device),
        }
    }
}

/// One encoder stage: a 3×3 convolution, a parametric activation, and two
/// dense blocks at the stage's channel width.
#[derive(Module, Debug)]
pub struct EncoderStage<B: Backend> {
    conv: Conv2d<B>,
    act: PRelu<B>,
    dense1: DenseBlock<B>,
    dense2: DenseBlock<B>,
}

impl<B: Backend> EncoderStage<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.act.forward(self.conv.forward(x));
        let x = self.dense1.forward(x);
        self.dense2.forward(x)
    }
}

/// Configuration for the `Bottleneck` module.
#[derive(Config, Debug)]
pub struct BottleneckConfig {
    /// Number of channels entering and leaving the bottleneck.
    channels: usize,
    /// Expanded channel width of the two inner convolutions.
    #[config(default = "512")]
    inner_channels: usize,
}

impl BottleneckConfig {
    /// Initializes a new `Bottleneck` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> Bottleneck<B> {
        let conv = |in_channels: usize, out_channels: usize| {
            Conv2dConfig::new([in_channels, out_channels], [3, 3])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device)
        };

        Bottleneck {
            conv1: conv(self.channels, self.inner_channels),
            act1: PReluConfig::new().init(device),
            conv2: conv(self.inner_channels, self.inner_channels),
            act2: PReluConfig::new().init(device),
            conv3: conv(self.inner_channels, self.channels),
            act3: PReluConfig::new().init(device),
        }
    }
}

/// The lowest-resolution stage: three 3×3 convolutions that expand and then
/// collapse the channel width, each followed by a parametric activation.
#[derive(Module, Debug)]
pub struct Bottleneck<B: Backend> {
    conv1: Conv2d<B>,
    act1: PRelu<B>,
    conv2: Conv2d<B>,
    act2: PRelu<B>,
    conv3: Conv2d<B>,
    act3: PRelu<B>,
}

impl<B: Backend> Bottleneck<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.act1.forward(self.conv1.forward(x));
        let x = self.act2.forward(self.conv2.forward(x));
        self.act3.forward(self.conv3.forward(x))
    }
}

/// Configuration for a decoder stage.
#[derive(Config, Debug)]
pub struct DecoderStageConfig {
    /// Number of input channels after skip concatenation.
    in_channels: usize,
    /// Width of the dense blocks, half of `in_channels`.
    mid_channels: usize,
    /// Number of output channels.
    out_channels: usize,
    /// Residual weighting forwarded to the dense blocks.
    #[config(default = "0.5")]
    residual_beta: f64,
}

impl DecoderStageConfig {
    /// Initializes a new `DecoderStage` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> DecoderStage<B> {
        DecoderStage {
            conv_in: Conv2dConfig::new([self.in_channels, self.mid_channels], [3, 3])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            act_in: PReluConfig::new().init(device),
            dense1: DenseBlockConfig::new(self.mid_channels)
                .with_beta(self.residual_beta)
                .init(device),
            dense2: DenseBlockConfig::new(self.mid_channels)
                .with_beta(self.residual_beta)
                .init(device),
            conv_out: Conv2dConfig::new([self.mid_channels, self.out_channels], [3, 3])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            act_out: PReluConfig::new().init(device),
        }
    }
}

/// One decoder stage, mirroring an encoder stage: a 3×3 convolution that
/// halves the concatenated channels, two dense blocks, and a further 3×3
/// convolution, each convolution followed by a parametric activation.
#[derive(Module, Debug)]
pub struct DecoderStage<B: Backend> {
    conv_in: Conv2d<B>,
    act_in: PRelu<B>,
    dense1: DenseBlock<B>,
    dense2: DenseBlock<B>,
    conv_out: Conv2d<B>,
    act_out: PRelu<B>,
}

impl<B: Backend> DecoderStage<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.act_in.forward(self.conv_in.forward(x));
        let x = self.dense1.forward(x);
        let x = self.dense2.forward(x);
        self.act_out.forward(self.conv_out.forward(x))
    }
}

/// An enum to dispatch the decoder's upsampling interpolation mode.
#[derive(Module, Debug, Clone)]
enum Upsample2x {
    Nearest(Identity),
    Bilinear(Identity),
}

/// Configuration for the `Light` model.
#[derive(Config, Debug)]
pub struct LightConfig {
    /// The detailed model configuration.
    config: ModelConfig,
}

impl LightConfig {
    /// Initializes a `Light` model with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `device` - The device to create the model on.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> LightResult<Light<B>> {
        self.config.validate()?;

        let beta = self.config.residual_beta;
        let upsample = match self.config.upsample {
            UpsampleMode::Nearest => Upsample2x::Nearest(Identity::new()),
            UpsampleMode::Bilinear => Upsample2x::Bilinear(Identity::new()),
        };

        Ok(Light {
            stem_conv: Conv2dConfig::new([self.config.in_channels, STEM_CHANNELS], [9, 9])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(4, 4))
                .init(device),
            stem_act: PReluConfig::new().init(device),
            down1: EncoderStageConfig::new(64, 64)
                .with_residual_beta(beta)
                .init(device),
            down2: EncoderStageConfig::new(64, 128)
                .with_residual_beta(beta)
                .init(device),
            down3: EncoderStageConfig::new(128, 256)
                .with_residual_beta(beta)
                .init(device),
            downsample: AvgPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            bottleneck: BottleneckConfig::new(256).init(device),
            up1: DecoderStageConfig::new(512, 256, 128)
                .with_residual_beta(beta)
                .init(device),
            up2: DecoderStageConfig::new(256, 128, 64)
                .with_residual_beta(beta)
                .init(device),
            up3: DecoderStageConfig::new(128, 64, 64)
                .with_residual_beta(beta)
                .init(device),
            out_conv: Conv2dConfig::new([STEM_CHANNELS, self.config.out_channels], [9, 9])
                .with_stride([1, 1])
                .with_padding(PaddingConfig2d::Explicit(4, 4))
                .init(device),
            upsample,
        })
    }
}

/// The main Light model.
#[derive(Module, Debug)]
pub struct Light<B: Backend> {
    /// The 9×9 input stem.
    stem_conv: Conv2d<B>,
    stem_act: PRelu<B>,
    /// The three encoder stages, shallowest first.
    down1: EncoderStage<B>,
    down2: EncoderStage<B>,
    down3: EncoderStage<B>,
    /// The 2× average pooling applied between encoder stages.
    downsample: AvgPool2d,
    /// The lowest-resolution stage.
    bottleneck: Bottleneck<B>,
    /// The three decoder stages, deepest first.
    up1: DecoderStage<B>,
    up2: DecoderStage<B>,
    up3: DecoderStage<B>,
    /// The 9×9 output projection.
    out_conv: Conv2d<B>,
    /// The decoder's upsampling interpolation mode.
    upsample: Upsample2x,
}

impl<B: Backend> Light<B> {
    /// The main forward pass for the `Light` model.
    ///
    /// # Arguments
    ///
    /// * `x` - The input tensor of shape `[N, in_channels, H, W]`, with `H`
    ///   and `W` divisible by 8.
    ///
    /// # Returns
    ///
    /// The restored image of shape `[N, out_channels, H, W]`, every element
    /// in `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Spatial sizes not divisible by 8 fail inside the framework at the
    /// first skip concatenation whose encoder and decoder sizes disagree.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let stem = self.stem_act.forward(self.stem_conv.forward(x));

        // ########## Encoder ##########
        let d1 = self.down1.forward(stem);
        let d2 = self.down2.forward(self.downsample.forward(d1.clone()));
        let d3 = self.down3.forward(self.downsample.forward(d2.clone()));

        let bottom = self.bottleneck.forward(self.downsample.forward(d3.clone()));

        // ########## Decoder ##########
        let u1 = self
            .up1
            .forward(Tensor::cat(vec![d3, self.upsample_2x(bottom)], 1));
        let u2 = self
            .up2
            .forward(Tensor::cat(vec![d2, self.upsample_2x(u1)], 1));
        let u3 = self
            .up3
            .forward(Tensor::cat(vec![d1, self.upsample_2x(u2)], 1));

        (tanh(self.out_conv.forward(u3)) + 1.0) / 2.0
    }

    fn upsample_2x(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let [_, _, h, w] = x.dims();
        let mode = match &self.upsample {
            Upsample2x::Nearest(_) => InterpolateMode::Nearest,
            Upsample2x::Bilinear(_) => InterpolateMode::Bilinear,
        };

        interpolate(x, [h * 2, w * 2], InterpolateOptions::new(mode))
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

    fn init_model(config: ModelConfig) -> Light<TestBackend> {
        LightConfig::new(config)
            .init(&TestDevice::default())
            .unwrap()
    }

    #[test]
    fn output_shape_matches_input_resolution() {
        let device = TestDevice::default();
        let model = init_model(ModelConfig::new());

        let x = Tensor::<TestBackend, 4>::random(
            [2, 3, 16, 16],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        let y = model.forward(x);

        assert_eq!(y.dims(), [2, 3, 16, 16]);
    }

    #[test]
    fn output_channels_follow_configuration() {
        let device = TestDevice::default();
        let model = init_model(ModelConfig::new().with_in_channels(1).with_out_channels(3));

        let x = Tensor::<TestBackend, 4>::random(
            [1, 1, 8, 8],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        let y = model.forward(x);

        assert_eq!(y.dims(), [1, 3, 8, 8]);
    }

    #[test]
    fn output_stays_in_unit_interval() {
        let device = TestDevice::default();
        let model = init_model(ModelConfig::new());

        let x = Tensor::<TestBackend, 4>::random(
            [1, 3, 8, 8],
            Distribution::Uniform(-100.0, 100.0),
            &device,
        );
        let y = model.forward(x);

        let min = y.clone().min().into_scalar();
        let max = y.max().into_scalar();
        assert!(min >= 0.0, "minimum {min} below the unit interval");
        assert!(max <= 1.0, "maximum {max} above the unit interval");
    }

    #[test]
    fn forward_is_deterministic() {
        let device = TestDevice::default();
        let model = init_model(ModelConfig::new());

        let x = Tensor::<TestBackend, 4>::random(
            [1, 3, 8, 8],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        let first = model.forward(x.clone());
        let second = model.forward(x);

        assert_eq!(first.into_data(), second.into_data());
    }

    #[test]
    fn bilinear_upsampling_preserves_shape() {
        let device = TestDevice::default();
        let model = init_model(ModelConfig::new().with_upsample(UpsampleMode::Bilinear));

        let x = Tensor::<TestBackend, 4>::random(
            [1, 3, 8, 8],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        let y = model.forward(x);

        assert_eq!(y.dims(), [1, 3, 8, 8]);
    }

    #[test]
    #[should_panic]
    fn indivisible_input_fails_at_first_skip_concatenation() {
        let device = TestDevice::default();
        let model = init_model(ModelConfig::new());

        // 12 is divisible by 4 but not by 8: the upsampled bottleneck
        // output is 2x2 while the matching encoder features are 3x3.
        let x = Tensor::<TestBackend, 4>::zeros([1, 3, 12, 12], &device);
        let _ = model.forward(x);
    }
}
