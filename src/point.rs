use crate::error::MinimizerError;
use std::ops::{Index, IndexMut};

/// An owned vector of coordinates with a dimension fixed at construction.
///
/// Arithmetic is done in place and returns the receiver so operations chain:
///
/// ```
/// use nmsimplex::point::Point;
/// # fn main() -> Result<(), nmsimplex::error::MinimizerError> {
/// let high = Point::from(vec![2.0, 4.0]);
/// let centroid = Point::from(vec![1.0, 1.0]);
///
/// // centroid + 0.5 * (high - centroid)
/// let mut trial = high.clone();
/// trial.subtract(&centroid)?.scale(0.5).add(&centroid)?;
///
/// assert_eq!(trial.as_slice(), &[1.5, 2.5]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point(Vec<f64>);

impl Point {
    /// Create a point of dimension `n` at the origin
    pub fn zeros(n: usize) -> Self {
        Point(vec![0.0; n])
    }

    /// Create the unit vector along `axis` in `n` dimensions.
    ///
    /// An `axis` outside `0..n` yields the origin.
    pub fn unit(n: usize, axis: usize) -> Self {
        let mut p = Point::zeros(n);
        if let Some(x) = p.0.get_mut(axis) {
            *x = 1.0;
        }
        p
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    fn check_dim(&self, other: &Point) -> Result<(), MinimizerError> {
        if self.dim() != other.dim() {
            return Err(MinimizerError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(())
    }

    /// Add `other` to this point coordinate-wise
    pub fn add(&mut self, other: &Point) -> Result<&mut Self, MinimizerError> {
        self.check_dim(other)?;
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(x, y)| *x += y);
        Ok(self)
    }

    /// Subtract `other` from this point coordinate-wise
    pub fn subtract(&mut self, other: &Point) -> Result<&mut Self, MinimizerError> {
        self.check_dim(other)?;
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(x, y)| *x -= y);
        Ok(self)
    }

    /// Multiply every coordinate by `k`
    pub fn scale(&mut self, k: f64) -> &mut Self {
        self.0.iter_mut().for_each(|x| *x *= k);
        self
    }
}

impl From<Vec<f64>> for Point {
    fn from(v: Vec<f64>) -> Self {
        Point(v)
    }
}

impl From<&[f64]> for Point {
    fn from(v: &[f64]) -> Self {
        Point(v.to_vec())
    }
}

impl FromIterator<f64> for Point {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Point(iter.into_iter().collect())
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}
