/// Geometry-validated padding, windowed dot products and convolution.
pub mod conv;
/// The worker pool and the multi-filter dispatcher.
pub mod dispatch;
pub mod logger;
pub mod settings;

mod channels;
mod error;
mod filter;
mod matrix;
mod shape;

pub use channels::Channels;
pub use conv::{convolve, pad, ConvolutionDescription};
pub use dispatch::{apply_filter, apply_filters, ThreadPool};
pub use error::{ConvolutionError, ConvolutionResult};
pub use filter::{Filter, FilterBank, FilterLoadError};
pub use matrix::Matrix;
pub use settings::LocalSettings;
pub use shape::Shape;
