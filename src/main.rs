use anyhow::{bail, Context};
use clap::Parser;
use greyform::{format_file_size, get_image_info, BatchProcessor, Cli, Commands, Job, Manifest};
use log::LevelFilter;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Transform {
            inputs,
            output,
            config,
            color,
            resolution,
            rotate,
            format,
            on_conflict,
            quality,
            optimize_png,
            filter,
            recursive,
            no_progress,
        } => {
            let manifest = match config {
                Some(path) => Manifest::load(&path)
                    .with_context(|| format!("Failed to read manifest {}", path.display()))?,
                None => Manifest::default(),
            };

            let flags = Manifest {
                inputs,
                output,
                color,
                resolution,
                rotation: rotate,
                format,
                on_conflict,
                quality,
                optimize_png: optimize_png.then_some(true),
                recursive: recursive.then_some(true),
            };

            let job = manifest.merge(flags).into_job(filter)?;
            process_transform(job, !no_progress)?;
        }
        Commands::Info { input } => {
            process_info(&input)?;
        }
    }

    Ok(())
}

fn process_transform(job: Job, show_progress: bool) -> anyhow::Result<()> {
    let Job {
        inputs,
        output,
        config,
        options,
        mut policy,
        recursive,
    } = job;

    log::debug!("Transform config: {:?}, encode options: {:?}", config, options);

    let processor = BatchProcessor::new(config, options)?.with_progress(show_progress);
    let report = processor
        .run(&inputs, recursive, &output, &mut policy)
        .context("Transformation aborted")?;

    for (input, reason) in report.failures() {
        log::warn!("Not converted: {} ({})", input.display(), reason);
    }

    println!(
        "Transformation complete. {} written, {} skipped, {} failed. Saved to: {}",
        report.written_count(),
        report.skipped_count(),
        report.failures().len(),
        output.display()
    );

    Ok(())
}

fn process_info(input: &Path) -> anyhow::Result<()> {
    if !input.exists() {
        bail!("File does not exist: {}", input.display());
    }

    let file_size = std::fs::metadata(input)?.len();
    let info = get_image_info(input)?;

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(file_size));
    println!("Dimensions: {} x {} pixels", info.width, info.height);
    println!("Format: {}", info.format);
    println!("Color: {:?}", info.color);

    Ok(())
}
