use std::fmt;

use num::Num;
use serde::{Deserialize, Serialize};

use crate::utils::sort::radix_sort_u32_soa;

/// SparseVec is a sparse vector that treats zero elements as implicit.
/// It keeps `inds` (element indices) and `vals` (element values)
/// as a structure of arrays.
///
/// Elements are guaranteed to be sorted by ascending index, every index is
/// below `len`, and no stored value is zero. `len` is the dense-equivalent
/// length. Deserialization rejects data breaking any of these.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SparseVecData<N>",
    bound(deserialize = "N: Num + Copy + Deserialize<'de>")
)]
pub struct SparseVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

#[derive(Deserialize)]
struct SparseVecData<N> {
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> TryFrom<SparseVecData<N>> for SparseVec<N>
where
    N: Num + Copy,
{
    type Error = String;

    fn try_from(data: SparseVecData<N>) -> Result<Self, String> {
        let SparseVecData { inds, vals, len } = data;
        if inds.len() != vals.len() {
            return Err(format!("{} indices for {} values", inds.len(), vals.len()));
        }
        if let Some(pair) = inds.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(format!("indices not strictly ascending: {} then {}", pair[0], pair[1]));
        }
        if let Some(&last) = inds.last() {
            if last as usize >= len {
                return Err(format!("index {last} out of range for length {len}"));
            }
        }
        if vals.iter().any(|v| v.is_zero()) {
            return Err("stored zero value".to_string());
        }
        Ok(SparseVec { inds, vals, len })
    }
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// Create an all-zero vector of dense length `len`
    #[inline]
    pub fn zeros(len: usize) -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from `(index, value)` entries in any order.
    /// Zero values are dropped. Indices must be unique.
    ///
    /// # Panics
    /// If an index is `>= len` or does not fit in a `u32`.
    pub fn from_entries<I>(len: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = entries
            .into_iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, v)| {
                assert!(i < len, "index {i} out of range for length {len}");
                let i = u32::try_from(i).unwrap_or_else(|_| panic!("index {i} exceeds u32"));
                (i, v)
            })
            .unzip();
        radix_sort_u32_soa(&mut inds, &mut vals);
        SparseVec { inds, vals, len }
    }

    /// Build from a dense slice
    pub fn from_dense(dense: &[N]) -> Self {
        Self::from_entries(dense.len(), dense.iter().copied().enumerate())
    }

    /// dense-equivalent length
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Value at `index`, zero when not stored.
    /// Returns `None` when `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate over the stored `(index, value)` pairs in index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    /// stored indices
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    /// stored values, aligned with `indices`
    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (i, v) in self.raw_iter() {
            dense[i] = v;
        }
        dense
    }

    /// Apply `f` to every stored value, keeping the sparsity pattern.
    /// Values mapped to zero are dropped.
    pub fn map<M, F>(&self, mut f: F) -> SparseVec<M>
    where
        M: Num + Copy,
        F: FnMut(usize, N) -> M,
    {
        let mut inds = Vec::with_capacity(self.nnz());
        let mut vals = Vec::with_capacity(self.nnz());
        for (i, v) in self.raw_iter() {
            let m = f(i, v);
            if !m.is_zero() {
                inds.push(i as u32);
                vals.push(m);
            }
        }
        SparseVec {
            inds,
            vals,
            len: self.len,
        }
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}

impl SparseVec<f64> {
    /// sum of absolute values
    pub fn l1_norm(&self) -> f64 {
        self.vals.iter().map(|v| v.abs()).sum()
    }

    /// euclidean norm
    pub fn l2_norm(&self) -> f64 {
        self.vals.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Divide every value by `divisor`. A zero divisor leaves the vector untouched.
    pub fn scale_down(&mut self, divisor: f64) {
        if divisor == 0.0 {
            return;
        }
        for v in self.vals.iter_mut() {
            *v /= divisor;
        }
    }
}

impl<N> fmt::Debug for SparseVec<N>
where
    N: Num + Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseVec")
            .field("len", &self.len)
            .field("entries", &self.raw_iter().collect::<Vec<_>>())
            .finish()
    }
}
