use clap::{Parser, Subcommand};
use cropkit::imaging::{Rect, load_croppable_with};
use cropkit::{config, output};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cropkit")]
#[command(about = "Crop PNG, GIF and TIFF images without changing their format")]
#[command(long_about = "\
Crop PNG, GIF and TIFF images without changing their format

The input's extension picks the codec; the cropped result is written back
with the same encoder. Without --output the result lands next to the source:

  photos/dawn.png  ->  photos/dawn-cropped.png

Run 'cropkit gen-config' to generate a documented cropkit.toml.
Set RUST_LOG=debug to trace loading and saving.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = defaults)
    #[arg(long, default_value = "cropkit.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop a rectangle out of an image and save it in the same format
    Crop(CropArgs),
    /// List the file extensions that can be loaded
    Formats,
    /// Print a stock cropkit.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct CropArgs {
    /// Source image
    input: PathBuf,
    /// Left edge of the crop rectangle
    #[arg(long, default_value_t = 0)]
    x: u32,
    /// Top edge of the crop rectangle
    #[arg(long, default_value_t = 0)]
    y: u32,
    /// Crop width in pixels
    #[arg(long)]
    width: u32,
    /// Crop height in pixels
    #[arg(long)]
    height: u32,
    /// Destination (defaults to <dir>/<name><output_suffix>.<format>)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Crop(args) => {
            let crop_config = config::load_config(&cli.config)?;
            let registry = crop_config.registry();

            let mut handle = load_croppable_with(&args.input, &registry)?;
            println!("{}", output::loaded_line(&handle));

            let rect = Rect {
                x: args.x,
                y: args.y,
                width: args.width,
                height: args.height,
            };
            handle.crop(rect)?;
            println!("{}", output::crop_line(rect));

            let destination = args
                .output
                .unwrap_or_else(|| handle.output_path(&crop_config.output_suffix));
            handle.save_to(&destination)?;
            println!("{}", output::saved_line(&destination));
        }
        Command::Formats => {
            let crop_config = config::load_config(&cli.config)?;
            for line in output::format_list(&crop_config.registry()) {
                println!("{line}");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
