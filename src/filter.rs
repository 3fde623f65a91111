use std::{
    fmt,
    fs::File,
    io::{self, BufReader, Read, Write},
    path::Path,
};

use rand::{distributions::Uniform, Rng};
use thiserror::Error;

use crate::{error::ConvolutionResult, ConvolutionError, Matrix, Shape};

/// Square convolution kernel. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    size: usize,
    matrix: Matrix,
}

impl Filter {
    pub fn new(size: usize, vals: Vec<i32>) -> ConvolutionResult<Self> {
        if size == 0 {
            return Err(ConvolutionError::EmptyFilter);
        }

        let expected = size.checked_mul(size).ok_or(ConvolutionError::GeometryOverflow(Shape::new(size, size), 0))?;
        if vals.len() != expected {
            return Err(ConvolutionError::FilterNotSquare { size, expected, len: vals.len() });
        }

        Ok(Self { size, matrix: Matrix::from_vec(size, size, vals)? })
    }

    pub fn from_matrix(matrix: Matrix) -> ConvolutionResult<Self> {
        let size = matrix.width();

        if matrix.height() != size {
            return Err(ConvolutionError::FilterNotSquare { size, expected: size * size, len: matrix.len() });
        }

        Ok(Self { size, matrix })
    }

    /// `1` at the centre, `0` elsewhere.
    pub fn identity(size: usize) -> ConvolutionResult<Self> {
        let centre = size / 2;
        Self::from_matrix(Matrix::from_fn(size, size, |r, c| i32::from(r == centre && c == centre))?)
    }

    pub fn ones(size: usize) -> ConvolutionResult<Self> {
        Self::from_matrix(Matrix::filled(size, size, 1)?)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Zero padding that keeps an odd-sized filter's output the same size as its input.
    pub fn same_padding(&self) -> usize {
        (self.size - 1) / 2
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn as_slice(&self) -> &[i32] {
        self.matrix.as_slice()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size {}", self.size)?;
        write!(f, "{}", self.matrix)
    }
}

#[derive(Debug, Error)]
pub enum FilterLoadError {
    #[error("failed to read filters: {0}")]
    Io(#[from] io::Error),
    #[error("filter file ended early, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid integer `{token}` in filter file")]
    InvalidInteger { token: String },
    #[error("filter count must not be negative, got {0}")]
    NegativeCount(i64),
    #[error(transparent)]
    Invalid(#[from] ConvolutionError),
    #[error("unexpected trailing data `{0}` after last filter")]
    TrailingData(String),
}

const MAX_PREALLOC: usize = 1 << 16;

/// Ordered collection of filters, index `i` is filter `i` everywhere downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterBank {
    filters: Vec<Filter>,
}

impl FilterBank {
    pub fn new(filters: Vec<Filter>) -> ConvolutionResult<Self> {
        if filters.is_empty() {
            return Err(ConvolutionError::EmptyFilterBank);
        }

        Ok(Self { filters })
    }

    /// Generates `count` filters of `size` with values drawn uniformly from `low..=high`.
    pub fn random<R: Rng>(rng: &mut R, count: usize, size: usize, low: i32, high: i32) -> ConvolutionResult<Self> {
        let dist = Uniform::new_inclusive(low.min(high), low.max(high));
        let cells = size.checked_mul(size).ok_or(ConvolutionError::GeometryOverflow(Shape::new(size, size), 0))?;

        let filters = (0..count)
            .map(|_| Filter::new(size, (0..cells).map(|_| rng.sample(dist)).collect()))
            .collect::<ConvolutionResult<Vec<_>>>()?;

        Self::new(filters)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FilterLoadError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Reads the text filter format:
    ///
    /// ```text
    /// <num filters>
    /// <size> <size * size row-major values>
    /// ...
    /// ```
    ///
    /// Tokens are whitespace separated, `#` comments out the rest of a line.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, FilterLoadError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut tokens = text.lines().flat_map(|line| line.split('#').next().unwrap_or("").split_whitespace());

        let mut next = |what: &'static str| -> Result<i64, FilterLoadError> {
            let token = tokens.next().ok_or(FilterLoadError::UnexpectedEof(what))?;
            token.parse().map_err(|_| FilterLoadError::InvalidInteger { token: token.to_string() })
        };

        let count = next("filter count")?;
        if count < 0 {
            return Err(FilterLoadError::NegativeCount(count));
        }

        let mut filters = Vec::new();

        for _ in 0..count {
            let size = next("filter size")?;
            let (size, cells) = usize::try_from(size)
                .ok()
                .and_then(|size| Some((size, size.checked_mul(size)?)))
                .ok_or_else(|| FilterLoadError::InvalidInteger { token: size.to_string() })?;

            let mut vals = Vec::with_capacity(cells.min(MAX_PREALLOC));
            for _ in 0..cells {
                let val = next("filter value")?;
                vals.push(i32::try_from(val).map_err(|_| FilterLoadError::InvalidInteger { token: val.to_string() })?);
            }

            filters.push(Filter::new(size, vals)?);
        }

        if let Some(token) = tokens.next() {
            return Err(FilterLoadError::TrailingData(token.to_string()));
        }

        Ok(Self::new(filters)?)
    }

    pub fn write_text(&self, mut writer: impl Write) -> io::Result<()> {
        writeln!(writer, "{}", self.filters.len())?;

        for filter in &self.filters {
            writeln!(writer, "{}", filter.size())?;

            for row in filter.matrix().rows() {
                let line = row.iter().map(i32::to_string).collect::<Vec<_>>().join(" ");
                writeln!(writer, "{line}")?;
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Filter> {
        self.filters.get(idx)
    }

    pub fn as_slice(&self) -> &[Filter] {
        &self.filters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }
}

impl<'a> IntoIterator for &'a FilterBank {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
