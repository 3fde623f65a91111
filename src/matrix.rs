use std::{fmt, ops::Index};

use crate::{error::ConvolutionResult, ConvolutionError, Shape};

/// Row-major grid of `i32`, element `(row, col)` lives at `row * width + col`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    shape: Shape,
    buf: Vec<i32>,
}

impl Matrix {
    /// Zero-filled matrix.
    pub fn new(width: usize, height: usize) -> ConvolutionResult<Self> {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: usize, height: usize, value: i32) -> ConvolutionResult<Self> {
        let shape = Self::checked_shape(width, height)?;
        Ok(Self { shape, buf: vec![value; shape.size()] })
    }

    pub fn from_vec(width: usize, height: usize, buf: Vec<i32>) -> ConvolutionResult<Self> {
        let shape = Self::checked_shape(width, height)?;

        if buf.len() != shape.size() {
            return Err(ConvolutionError::MismatchedBuffer { len: buf.len(), shape });
        }

        Ok(Self { shape, buf })
    }

    pub fn from_slice(width: usize, height: usize, vals: &[i32]) -> ConvolutionResult<Self> {
        Self::from_vec(width, height, vals.to_vec())
    }

    /// Builds a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> i32>(width: usize, height: usize, mut f: F) -> ConvolutionResult<Self> {
        let shape = Self::checked_shape(width, height)?;
        let buf = (0..height).flat_map(|row| (0..width).map(move |col| (row, col))).map(|(r, c)| f(r, c)).collect();
        Ok(Self { shape, buf })
    }

    /// Shape must be non-empty and match `buf`.
    pub(crate) fn from_raw(shape: Shape, buf: Vec<i32>) -> Self {
        debug_assert!(!shape.is_empty());
        debug_assert_eq!(shape.size(), buf.len());
        Self { shape, buf }
    }

    fn checked_shape(width: usize, height: usize) -> ConvolutionResult<Shape> {
        let shape = Shape::new(height, width);

        if shape.is_empty() {
            Err(ConvolutionError::EmptyMatrix(shape))
        } else if shape.checked_size().is_none() {
            Err(ConvolutionError::GeometryOverflow(shape, 0))
        } else {
            Ok(shape)
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> usize {
        self.shape.cols()
    }

    pub fn height(&self) -> usize {
        self.shape.rows()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.height() && col < self.width() {
            Some(self.buf[row * self.width() + col])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.buf
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, i32> {
        self.buf.chunks_exact(self.width())
    }

    pub fn row(&self, row: usize) -> Option<&[i32]> {
        self.rows().nth(row)
    }

    /// Clamps every negative element to zero.
    pub fn rectify(&mut self) {
        for elem in &mut self.buf {
            *elem = (*elem).max(0);
        }
    }

    pub fn rectified(mut self) -> Self {
        self.rectify();
        self
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.height() && col < self.width(), "({row}, {col}) is out of bounds for {}", self.shape);
        &self.buf[row * self.width() + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for val in row {
                write!(f, "{val:5}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
