mod convolve;
mod filters;
mod image;

use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(about = "Integer convolution of images with banks of filters")]
pub enum Options {
    /// Convolve an image with every filter of a filter file.
    Convolve(convolve::ConvolveOptions),
    /// Write a seeded bank of random filters.
    RandomFilters(filters::RandomFiltersOptions),
    /// Print the filters in a filter file.
    Inspect(filters::InspectOptions),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Options::from_args() {
        Options::Convolve(options) => options.run(),
        Options::RandomFilters(options) => options.run(),
        Options::Inspect(options) => options.run(),
    }
}
