//! Times repeated forward passes of the Light model on synthetic input.

use anyhow::{ensure, Result};
use burn::prelude::*;
use clap::Parser;
use light_burn::{LightConfig, ModelConfig};
use light_demos::{backend_name, create_device, SelectedBackend};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Batch size of the synthetic input
    #[arg(long, default_value_t = 1)]
    batch_size: usize,

    /// Square input resolution, must be divisible by 8
    #[arg(long, default_value_t = 256)]
    size: usize,

    /// Number of timed forward passes
    #[arg(long, default_value_t = 10)]
    iters: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.size % 8 == 0, "--size must be divisible by 8");
    ensure!(args.iters > 0, "--iters must be at least 1");

    let device = create_device();
    let model = LightConfig::new(ModelConfig::new()).init::<SelectedBackend>(&device)?;

    println!(
        "Benchmarking Light on {}: {} iterations of [{}, 3, {}, {}]",
        backend_name(),
        args.iters,
        args.batch_size,
        args.size,
        args.size
    );

    // One untimed pass to absorb startup cost.
    let x = Tensor::<SelectedBackend, 4>::zeros(
        [args.batch_size, 3, args.size, args.size],
        &device,
    );
    let _ = model.forward(x);

    let start = std::time::Instant::now();
    let mut laps = Vec::with_capacity(args.iters);
    for _ in 0..args.iters {
        let lap = std::time::Instant::now();
        let x = Tensor::<SelectedBackend, 4>::zeros(
            [args.batch_size, 3, args.size, args.size],
            &device,
        );
        let _y = model.forward(x);
        laps.push(lap.elapsed());
    }

    println!(
        "Total time: {:?}, Speed: {:?} it/s",
        start.elapsed(),
        args.iters as f32 / start.elapsed().as_secs_f32()
    );
    println!("{:?}", laps);

    Ok(())
}
