use std::{fs, path::PathBuf, time::Instant};

use anyhow::Context;
use log::info;
use stencil::{apply_filters, logger, FilterBank, LocalSettings};
use structopt::StructOpt;

use crate::image::{read_image, write_image};

#[derive(StructOpt)]
pub struct ConvolveOptions {
    #[structopt(required = true, short, long)]
    image: PathBuf,
    #[structopt(required = true, short, long)]
    filters: PathBuf,
    #[structopt(short, long, default_value = "1")]
    threads: usize,
    #[structopt(short, long, default_value = "1")]
    stride: usize,
    /// Export raw outputs without clamping negatives to zero.
    #[structopt(long)]
    no_rectify: bool,
    /// Directory to write `filter_<i>.png` into.
    #[structopt(short, long)]
    output: Option<PathBuf>,
    /// Disable ansi colours.
    #[structopt(long)]
    plain: bool,
}

impl ConvolveOptions {
    fn settings(&self) -> LocalSettings {
        LocalSettings {
            threads: self.threads,
            stride: self.stride,
            rectify: !self.no_rectify,
            output_directory: self.output.clone(),
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        logger::set_plain(self.plain);

        let settings = self.settings();
        let pool = settings.pool().with_context(|| "Invalid thread count.")?;

        logger::banner("Settings");
        settings.display();

        let channels = read_image(&self.image)?;
        logger::banner("Image");
        logger::report_image(self.image.display(), channels.shape());

        let bank = FilterBank::from_file(&self.filters)
            .with_context(|| format!("Failed to load filters from {}", self.filters.display()))?;

        logger::banner("Do convolution");
        let timer = Instant::now();
        let outputs = apply_filters(&pool, &channels, &bank, settings.stride).with_context(|| "Convolution failed.")?;
        let elapsed = timer.elapsed();

        if let Some(dir) = &settings.output_directory {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        for (idx, (filter, output)) in bank.iter().zip(outputs).enumerate() {
            logger::report_filter(idx, filter);

            let output = if settings.rectify { output.rectify() } else { output };

            if let Some(path) = settings.output_path(idx) {
                write_image(&path, &output)?;
                info!("wrote {}", path.display());
            }
        }

        logger::report_finished(bank.len(), elapsed);

        Ok(())
    }
}
