// greyform/src/cli.rs
use crate::core::{ColorMode, OutputFormat, OverwritePolicy, ResizeAlgorithm, Resolution, Rotation};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "greyform", version, about = "Batch greyscale and black-and-white image transformer")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert images, zip archives of images or directories of images
    Transform {
        /// Image files, .zip archives or directories
        inputs: Vec<PathBuf>,

        /// Directory the converted images are written to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML job manifest; flags given here override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        color: Option<ColorMode>,

        #[arg(short, long, value_enum)]
        resolution: Option<Resolution>,

        /// Clockwise rotation in degrees
        #[arg(long, value_enum)]
        rotate: Option<Rotation>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// What to do when an output file already exists
        #[arg(long, value_enum)]
        on_conflict: Option<OverwritePolicy>,

        /// JPEG quality (1-100)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Run PNG output through oxipng
        #[arg(long)]
        optimize_png: bool,

        /// Resampling filter for greyscale resizes
        #[arg(long, value_enum, default_value_t = ResizeAlgorithm::Bicubic)]
        filter: ResizeAlgorithm,

        /// Descend into subdirectories of directory inputs
        #[arg(short = 'R', long)]
        recursive: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Show dimensions and format of an image
    Info {
        input: PathBuf,
    },
}
