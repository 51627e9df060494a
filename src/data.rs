use crate::errors::CartError;
use hashbrown::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Label trait used throughout the package
/// to control for class labels.
///
/// `Ord` is needed so that ties between equally frequent
/// classes are always resolved to the smallest label.
pub trait Label: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> Label for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// Dense matrix data container.
///
/// This structure borrows a dense matrix of values stored in a single contiguous memory block.
/// By default, it follows column-major order (Fortran-style), which allows for efficient
/// column slicing. Row-major buffers are supported through [`Matrix::new_row_major`].
///
/// # Type Parameters
/// * `T` - The type of the data (e.g. `f64`).
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Indices into the data row-wise.
    pub index: Vec<usize>,
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
    stride1: usize,
    stride2: usize,
}

impl<'a, T> Matrix<'a, T> {
    // Defaults to column major
    /// Create a new column major Matrix.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix {
            data,
            index: (0..rows).collect(),
            rows,
            cols,
            stride1: rows,
            stride2: 1,
        }
    }

    /// Create a new Matrix over a row major buffer,
    /// where each consecutive run of `cols` values is one sample.
    pub fn new_row_major(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix {
            data,
            index: (0..rows).collect(),
            rows,
            cols,
            stride1: 1,
            stride2: cols,
        }
    }

    /// Whether consecutive values of a column are contiguous in memory.
    pub fn is_column_major(&self) -> bool {
        self.stride2 == 1 && self.stride1 == self.rows
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[self.item_index(i, j)]
    }

    fn item_index(&self, i: usize, j: usize) -> usize {
        let mut idx = self.stride2 * i;
        idx += j * self.stride1;
        idx
    }

    /// Get an entire column of a column major matrix as a slice.
    /// Returns `None` for row major matrices.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> Option<&[T]> {
        if !self.is_column_major() {
            return None;
        }
        let i = self.item_index(0, col);
        let j = self.item_index(self.rows, col);
        Some(&self.data[i..j])
    }

    /// Check that the buffer holds exactly `rows * cols` values,
    /// and that every entry of `index` is a valid row.
    pub fn validate_shape(&self) -> Result<(), CartError> {
        let expected = self.rows.checked_mul(self.cols).ok_or(CartError::DataShape {
            expected: usize::MAX,
            found: self.data.len(),
        })?;
        if self.data.len() != expected {
            return Err(CartError::DataShape {
                expected,
                found: self.data.len(),
            });
        }
        if let Some(&index) = self.index.iter().find(|&&i| i >= self.rows) {
            return Err(CartError::RowIndexOutOfBounds { index, rows: self.rows });
        }
        Ok(())
    }
}

impl<'a, T> Matrix<'a, T>
where
    T: Copy,
{
    /// Get a row of the data as a vector.
    pub fn get_row(&self, row: usize) -> Vec<T> {
        (0..self.cols).map(|j| *self.get(row, j)).collect()
    }
}

/// Flatten a set of feature vectors into a row major buffer.
///
/// Returns the buffer together with the number of rows and columns,
/// ready to be wrapped with [`Matrix::new_row_major`]. Every row must
/// have the same length as the first one.
pub fn flatten_rows(rows: &[Vec<f64>]) -> Result<(Vec<f64>, usize, usize), CartError> {
    let cols = rows.first().map_or(0, |r| r.len());
    let mut data = Vec::with_capacity(rows.len() * cols);
    for (i, r) in rows.iter().enumerate() {
        if r.len() != cols {
            return Err(CartError::RaggedRow {
                row: i,
                expected: cols,
                found: r.len(),
            });
        }
        data.extend_from_slice(r);
    }
    Ok((data, rows.len(), cols))
}

/// A set of labeled samples, selected by row index
/// out of a shared feature matrix.
///
/// Sub-datasets produced by [`Dataset::partition`] borrow the same matrix
/// and labels, and only own the index of the rows that reached them.
#[derive(Clone)]
pub struct Dataset<'a, L> {
    data: &'a Matrix<'a, f64>,
    y: &'a [L],
    index: Vec<usize>,
}

impl<'a, L: Label> Dataset<'a, L> {
    /// Create a dataset over all the indexed rows of `data`.
    ///
    /// * `data` - Feature matrix, NaN values are rejected.
    /// * `y` - One label per row of `data`.
    pub fn new(data: &'a Matrix<'a, f64>, y: &'a [L]) -> Result<Self, CartError> {
        data.validate_shape()?;
        if data.rows != y.len() {
            return Err(CartError::LabelLengthMismatch {
                rows: data.rows,
                labels: y.len(),
            });
        }
        for &i in data.index.iter() {
            for j in 0..data.cols {
                if data.get(i, j).is_nan() {
                    return Err(CartError::NanValueFound { row: i, feature: j });
                }
            }
        }
        Ok(Dataset {
            data,
            y,
            index: data.index.to_owned(),
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Dimension of the feature vectors.
    pub fn n_features(&self) -> usize {
        self.data.cols
    }

    /// Row indices of the samples, in order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Feature `feature` of the row `row` of the underlying matrix.
    #[inline]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        *self.data.get(row, feature)
    }

    /// Label of the row `row` of the underlying matrix.
    #[inline]
    pub fn label(&self, row: usize) -> &'a L {
        let y = self.y;
        &y[row]
    }

    /// Labels of the samples, in order.
    pub fn labels(&self) -> impl Iterator<Item = &'a L> + '_ {
        let y = self.y;
        self.index.iter().map(move |&i| &y[i])
    }

    /// Number of samples per class.
    pub fn class_counts(&self) -> HashMap<&'a L, usize> {
        class_counts(self.labels())
    }

    /// Whether all the labels are identical.
    pub fn is_pure(&self) -> bool {
        let mut labels = self.labels();
        match labels.next() {
            Some(first) => labels.all(|l| l == first),
            None => true,
        }
    }

    /// Split the samples on `feature <= threshold`.
    ///
    /// The left side holds the samples where the feature is less than or equal
    /// to the threshold, the right side holds the rest. Relative order
    /// is preserved on both sides.
    pub fn partition(&self, feature: usize, threshold: f64) -> (Dataset<'a, L>, Dataset<'a, L>) {
        let (left, right): (Vec<usize>, Vec<usize>) = self
            .index
            .iter()
            .partition(|&&i| self.value(i, feature) <= threshold);
        (self.with_index(left), self.with_index(right))
    }

    fn with_index(&self, index: Vec<usize>) -> Dataset<'a, L> {
        Dataset {
            data: self.data,
            y: self.y,
            index,
        }
    }
}

/// Count how many times each label occurs.
pub fn class_counts<'a, L, I>(labels: I) -> HashMap<&'a L, usize>
where
    L: Label + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let mut counts = HashMap::new();
    for l in labels {
        *counts.entry(l).or_insert(0) += 1;
    }
    counts
}

/// Class counts in ascending order.
///
/// Impurity is always accumulated in this order so that it
/// only depends on the multiset of counts.
pub fn sorted_counts<L>(counts: &HashMap<&L, usize>) -> Vec<usize> {
    let mut v: Vec<usize> = counts.values().copied().filter(|c| *c > 0).collect();
    v.sort_unstable();
    v
}

/// The most frequent label, ties go to the smallest label.
pub fn majority_label<'a, L: Label>(counts: &HashMap<&'a L, usize>) -> Option<&'a L> {
    counts
        .iter()
        .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then_with(|| lb.cmp(la)))
        .map(|(l, _)| *l)
}
