use crate::{error::ConvolutionResult, ConvolutionError, Matrix, Shape};

/// Red, green and blue planes of one image, all of the same shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channels {
    r: Matrix,
    g: Matrix,
    b: Matrix,
}

impl Channels {
    pub fn new(r: Matrix, g: Matrix, b: Matrix) -> ConvolutionResult<Self> {
        for other in [&g, &b] {
            if other.shape() != r.shape() {
                return Err(ConvolutionError::MismatchedChannels(r.shape(), other.shape()));
            }
        }

        Ok(Self { r, g, b })
    }

    /// Same matrix copied into all three channels.
    pub fn grey(m: Matrix) -> Self {
        Self { r: m.clone(), g: m.clone(), b: m }
    }

    pub fn shape(&self) -> Shape {
        self.r.shape()
    }

    pub fn width(&self) -> usize {
        self.r.width()
    }

    pub fn height(&self) -> usize {
        self.r.height()
    }

    pub fn red(&self) -> &Matrix {
        &self.r
    }

    pub fn green(&self) -> &Matrix {
        &self.g
    }

    pub fn blue(&self) -> &Matrix {
        &self.b
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matrix> {
        [&self.r, &self.g, &self.b].into_iter()
    }

    /// Applies `f` to each channel independently.
    pub fn try_map<F>(&self, mut f: F) -> ConvolutionResult<Self>
    where
        F: FnMut(&Matrix) -> ConvolutionResult<Matrix>,
    {
        Self::new(f(&self.r)?, f(&self.g)?, f(&self.b)?)
    }

    /// Clamps negative values to zero in every channel, ready for display.
    pub fn rectify(mut self) -> Self {
        self.r.rectify();
        self.g.rectify();
        self.b.rectify();
        self
    }

    pub fn into_parts(self) -> (Matrix, Matrix, Matrix) {
        (self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_must_agree() {
        let a = Matrix::new(3, 2).unwrap();
        let b = Matrix::new(2, 3).unwrap();

        assert_eq!(
            Channels::new(a.clone(), a.clone(), b),
            Err(ConvolutionError::MismatchedChannels(Shape::new(2, 3), Shape::new(3, 2)))
        );
        assert_eq!(Channels::new(a.clone(), a.clone(), a).unwrap().shape(), Shape::new(2, 3));
    }

    #[test]
    fn rectify_per_channel() {
        let r = Matrix::from_slice(2, 1, &[-1, 1]).unwrap();
        let g = Matrix::from_slice(2, 1, &[2, -2]).unwrap();
        let b = Matrix::from_slice(2, 1, &[-3, -3]).unwrap();

        let (r, g, b) = Channels::new(r, g, b).unwrap().rectify().into_parts();
        assert_eq!(r.as_slice(), &[0, 1]);
        assert_eq!(g.as_slice(), &[2, 0]);
        assert_eq!(b.as_slice(), &[0, 0]);
    }
}
