//! Prints the module tree of a freshly initialized Light model.

use clap::Parser;
use light_burn::{LightConfig, ModelConfig};
use light_demos::{create_device, SelectedBackend};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of input channels
    #[arg(long, default_value_t = 3)]
    in_channels: usize,

    /// Number of output channels
    #[arg(long, default_value_t = 3)]
    out_channels: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let device = create_device();
    let model = LightConfig::new(
        ModelConfig::new()
            .with_in_channels(args.in_channels)
            .with_out_channels(args.out_channels),
    )
    .init::<SelectedBackend>(&device)?;

    println!("{}", model);

    Ok(())
}
