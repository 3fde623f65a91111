use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{bail, Context};
use rand::{rngs::StdRng, SeedableRng};
use stencil::{logger, FilterBank};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct RandomFiltersOptions {
    #[structopt(required = true, short, long)]
    output: PathBuf,
    #[structopt(short, long, default_value = "4")]
    count: usize,
    #[structopt(short, long, default_value = "3")]
    size: usize,
    #[structopt(long, default_value = "-4", allow_hyphen_values = true)]
    low: i32,
    #[structopt(long, default_value = "4", allow_hyphen_values = true)]
    high: i32,
    #[structopt(long, default_value = "0")]
    seed: u64,
}

impl RandomFiltersOptions {
    pub fn run(&self) -> anyhow::Result<()> {
        if self.low > self.high {
            bail!("Invalid range: low {} > high {}", self.low, self.high);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let bank = FilterBank::random(&mut rng, self.count, self.size, self.low, self.high)
            .with_context(|| "Failed to generate filters.")?;

        let mut output = BufWriter::new(File::create(&self.output).with_context(|| "Provide a correct path!")?);
        bank.write_text(&mut output).with_context(|| "Failed to write filters into output.")?;
        output.flush()?;

        println!("Written {} filters to [{}]", logger::ansi(bank.len(), 36), self.output.display());

        Ok(())
    }
}

#[derive(StructOpt)]
pub struct InspectOptions {
    #[structopt(required = true, short, long)]
    filters: PathBuf,
}

impl InspectOptions {
    pub fn run(&self) -> anyhow::Result<()> {
        let bank = FilterBank::from_file(&self.filters)
            .with_context(|| format!("Failed to load filters from {}", self.filters.display()))?;

        println!("Filters                : {}", logger::ansi(bank.len(), 31));

        for (idx, filter) in bank.iter().enumerate() {
            logger::report_filter(idx, filter);
        }

        Ok(())
    }
}
