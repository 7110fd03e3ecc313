//! Square similarity matrix storage.

/// Dense, square, symmetric N x N matrix stored row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build from row-major values; `values.len()` must be `size * size`.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        let size = rows.len();
        debug_assert!(rows.iter().all(|r| r.len() == size));
        Self {
            size,
            values: rows.into_iter().flatten().collect(),
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.size + j]
    }

    /// Row `i`: similarity of item `i` with every item
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        assert_eq!(m.size(), 2);
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.row(1), &[0.5, 1.0]);
    }

    #[test]
    fn test_empty() {
        let m = SimilarityMatrix::from_rows(vec![]);
        assert!(m.is_empty());
    }
}
