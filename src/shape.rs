#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.rows, self.cols)
    }
}

impl Shape {
    /// Geometry is not validated here, `Matrix` constructors reject
    /// zero-sized shapes.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape after adding `padding` zero rows/cols on every side, `None` on overflow.
    pub fn padded(&self, padding: usize) -> Option<Self> {
        let border = padding.checked_mul(2)?;
        Some(Self { rows: self.rows.checked_add(border)?, cols: self.cols.checked_add(border)? })
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn size(&self) -> usize {
        self.rows * self.cols
    }

    pub fn checked_size(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_grows_both_axes() {
        let shape = Shape::new(3, 5).padded(2).unwrap();
        assert_eq!(shape, Shape::new(7, 9));
        assert_eq!(shape.size(), 63);
    }

    #[test]
    fn overflow_is_detected() {
        assert_eq!(Shape::new(1, 1).padded(usize::MAX / 2 + 1), None);
        assert_eq!(Shape::new(usize::MAX, 1).padded(1), None);
        assert_eq!(Shape::new(usize::MAX, 2).checked_size(), None);
        assert_eq!(Shape::new(4, 5).checked_size(), Some(20));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Shape::new(10, 12)), "10 x 12");
        assert!(Shape::new(0, 12).is_empty());
    }
}
