//! Runnable utilities for the Light network.
//!
//! The tensor backend is selected at compile time through feature flags:
//! `ndarray` (default, CPU), `wgpu`, or `cuda`.
//!
//! ```bash
//! # Print the module tree
//! cargo run --bin print
//!
//! # Benchmark the forward pass
//! cargo run --bin bench -- --size 256 --iters 10
//! ```

cfg_if::cfg_if! {
    if #[cfg(feature = "cuda")] {
        /// The tensor backend selected at compile time.
        pub type SelectedBackend = burn::backend::Cuda;
        /// The device type matching [`SelectedBackend`].
        pub type SelectedDevice = burn::backend::cuda::CudaDevice;
    } else if #[cfg(feature = "wgpu")] {
        /// The tensor backend selected at compile time.
        pub type SelectedBackend = burn::backend::Wgpu;
        /// The device type matching [`SelectedBackend`].
        pub type SelectedDevice = burn::backend::wgpu::WgpuDevice;
    } else {
        /// The tensor backend selected at compile time.
        pub type SelectedBackend = burn::backend::NdArray;
        /// The device type matching [`SelectedBackend`].
        pub type SelectedDevice = burn::backend::ndarray::NdArrayDevice;
    }
}

/// Creates the default device for the selected backend.
pub fn create_device() -> SelectedDevice {
    SelectedDevice::default()
}

/// Returns a human-readable name for the selected backend.
pub fn backend_name() -> &'static str {
    if cfg!(feature = "cuda") {
        "cuda"
    } else if cfg!(feature = "wgpu") {
        "wgpu"
    } else {
        "ndarray"
    }
}
