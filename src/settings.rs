use std::path::PathBuf;

use crate::{dispatch::ThreadPool, error::ConvolutionResult, logger::ansi};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalSettings {
    /// Number of worker threads filters are spread across.
    pub threads: usize,
    /// Step between successive window placements.
    pub stride: usize,
    /// Clamp negative outputs to zero before export.
    pub rectify: bool,
    /// Directory to write filtered images to, nothing is written if `None`.
    pub output_directory: Option<PathBuf>,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self { threads: 1, stride: 1, rectify: true, output_directory: None }
    }
}

impl LocalSettings {
    pub fn pool(&self) -> ConvolutionResult<ThreadPool> {
        ThreadPool::new(self.threads)
    }

    pub fn output_path(&self, filter_idx: usize) -> Option<PathBuf> {
        self.output_directory.as_deref().map(|dir| dir.join(format!("filter_{filter_idx}.png")))
    }

    pub fn display(&self) {
        println!("Threads                : {}", ansi(self.threads, 31));
        println!("Stride                 : {}", ansi(self.stride, 31));
        println!("Rectify                : {}", ansi(self.rectify, 31));

        match &self.output_directory {
            Some(dir) => println!("Output Path            : {}", ansi(dir.display(), "32;1")),
            None => println!("Output Path            : {}", ansi("none", 31)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvolutionError;

    #[test]
    fn output_paths_are_filter_indexed() {
        let settings = LocalSettings { output_directory: Some(PathBuf::from("out")), ..Default::default() };
        assert_eq!(settings.output_path(3), Some(PathBuf::from("out").join("filter_3.png")));
        assert_eq!(LocalSettings::default().output_path(0), None);
    }

    #[test]
    fn pool_from_threads() {
        let settings = LocalSettings { threads: 4, ..Default::default() };
        assert_eq!(settings.pool().unwrap().threads(), 4);

        let settings = LocalSettings { threads: 0, ..Default::default() };
        assert_eq!(settings.pool(), Err(ConvolutionError::InvalidThreadCount));
    }
}
