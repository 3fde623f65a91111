use std::borrow::Cow;

use log::debug;

use crate::{error::ConvolutionResult, ConvolutionError, Filter, Matrix, Shape};

/// Geometry of a single convolution, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvolutionDescription {
    input_shape: Shape,
    padded_shape: Shape,
    output_shape: Shape,
    filter_size: usize,
    /// Can be 0, in which case the input is convolved in place of a padded copy.
    padding: usize,
    stride: usize,
}

impl ConvolutionDescription {
    /// Output dimensions are floored, a stride that does not evenly divide
    /// `padded - filter_size` drops the trailing partial window.
    pub fn new(input_shape: Shape, filter_size: usize, padding: usize, stride: usize) -> ConvolutionResult<Self> {
        if stride == 0 {
            return Err(ConvolutionError::ZeroStride);
        }

        if filter_size == 0 {
            return Err(ConvolutionError::EmptyFilter);
        }

        if input_shape.is_empty() {
            return Err(ConvolutionError::EmptyMatrix(input_shape));
        }

        let padded_shape = input_shape
            .padded(padding)
            .filter(|shape| shape.checked_size().is_some())
            .ok_or(ConvolutionError::GeometryOverflow(input_shape, padding))?;

        if filter_size > padded_shape.rows() || filter_size > padded_shape.cols() {
            return Err(ConvolutionError::FilterTooLarge { filter: filter_size, padded: padded_shape });
        }

        let hout = (padded_shape.rows() - filter_size) / stride + 1;
        let wout = (padded_shape.cols() - filter_size) / stride + 1;

        Ok(Self {
            input_shape,
            padded_shape,
            output_shape: Shape::new(hout, wout),
            filter_size,
            padding,
            stride,
        })
    }

    /// Same-size padding for `filter`, as used by the multi-filter dispatcher.
    pub fn same(input_shape: Shape, filter: &Filter, stride: usize) -> ConvolutionResult<Self> {
        Self::new(input_shape, filter.size(), filter.same_padding(), stride)
    }

    pub fn input_shape(&self) -> Shape {
        self.input_shape
    }

    pub fn padded_shape(&self) -> Shape {
        self.padded_shape
    }

    pub fn output_shape(&self) -> Shape {
        self.output_shape
    }

    pub fn filter_size(&self) -> usize {
        self.filter_size
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Zero-bordered copy of `input`, or `input` itself when `padding == 0`.
///
/// The padded dimensions must fit in `usize`, `ConvolutionDescription::new`
/// rejects paddings that do not.
pub fn pad(input: &Matrix, padding: usize) -> Cow<'_, Matrix> {
    if padding == 0 {
        return Cow::Borrowed(input);
    }

    let new_width = input.width() + 2 * padding;
    let new_height = input.height() + 2 * padding;

    let mut buf = vec![0; new_width * new_height];

    for (src, dst) in input.rows().zip(buf.chunks_exact_mut(new_width).skip(padding)) {
        dst[padding..padding + input.width()].copy_from_slice(src);
    }

    Cow::Owned(Matrix::from_raw(Shape::new(new_height, new_width), buf))
}

/// Sum of element-wise products of `kernel` with the `size x size` window of
/// `a` whose top-left corner is `(origin_x, origin_y)`, `a` having row stride
/// `a_width`.
///
/// The window is not checked against the bounds of `a` beyond slice
/// indexing, callers derive valid origins from a `ConvolutionDescription`.
/// The accumulator is a plain `i32` with no overflow guard. An empty
/// window (`size == 0`) sums to 0.
pub fn dot_product(a: &[i32], kernel: &[i32], size: usize, origin_x: usize, origin_y: usize, a_width: usize) -> i32 {
    let mut sum = 0;

    if size == 0 {
        return sum;
    }

    for (i, krow) in kernel.chunks_exact(size).take(size).enumerate() {
        let start = (origin_y + i) * a_width + origin_x;
        let arow = &a[start..start + size];

        for (&x, &k) in arow.iter().zip(krow) {
            sum += x * k;
        }
    }

    sum
}

/// Single convolutional layer over one channel.
pub fn convolve(input: &Matrix, filter: &Filter, padding: usize, stride: usize) -> ConvolutionResult<Matrix> {
    let desc = ConvolutionDescription::new(input.shape(), filter.size(), padding, stride)?;
    convolve_with(&desc, input, filter)
}

pub fn convolve_with(desc: &ConvolutionDescription, input: &Matrix, filter: &Filter) -> ConvolutionResult<Matrix> {
    if desc.input_shape != input.shape() {
        return Err(ConvolutionError::MismatchedInput { expected: desc.input_shape, got: input.shape() });
    }

    if desc.filter_size != filter.size() {
        return Err(ConvolutionError::MismatchedFilter { expected: desc.filter_size, got: filter.size() });
    }

    debug!(
        "convolving {} with {}x{} filter, padding {}, stride {} -> {}",
        desc.input_shape, desc.filter_size, desc.filter_size, desc.padding, desc.stride, desc.output_shape
    );

    let padded = pad(input, desc.padding);
    let (src, width) = (padded.as_slice(), padded.width());
    let (size, step) = (desc.filter_size, desc.stride);
    let (ans_height, ans_width) = (desc.output_shape.rows(), desc.output_shape.cols());

    let mut answer = Vec::with_capacity(desc.output_shape.size());

    for i in 0..ans_height {
        for j in 0..ans_width {
            answer.push(dot_product(src, filter.as_slice(), size, j * step, i * step, width));
        }
    }

    Ok(Matrix::from_raw(desc.output_shape, answer))
}
