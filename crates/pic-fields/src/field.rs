//! Dense staggered field arrays.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use nalgebra::Complex;

use crate::layout::GridLayout;

/// Scalar stored in a field: real for cartesian grids, complex for
/// azimuthal modes.
pub trait FieldValue:
    Copy
    + Default
    + PartialEq
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
{
    /// Squared magnitude.
    fn norm_sq(self) -> f64;
}

impl FieldValue for f64 {
    fn norm_sq(self) -> f64 {
        self * self
    }
}

impl FieldValue for Complex<f64> {
    fn norm_sq(self) -> f64 {
        self.norm_sqr()
    }
}

/// One field component on a 3-index grid, x-index slowest.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<T> {
    name: &'static str,
    dims: [usize; 3],
    dual: [bool; 3],
    data: Vec<T>,
}

impl<T: FieldValue> Field<T> {
    /// Allocate a zeroed field staggered as `dual` on `layout`.
    pub fn new(name: &'static str, layout: &GridLayout, dual: [bool; 3]) -> Self {
        Self::zeros(name, layout.dims(dual), dual)
    }

    pub fn zeros(name: &'static str, dims: [usize; 3], dual: [bool; 3]) -> Self {
        Self {
            name,
            dims,
            dual,
            data: vec![T::default(); dims[0] * dims[1] * dims[2]],
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn is_dual(&self, axis: usize) -> bool {
        self.dual[axis]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, idx: [usize; 3]) -> usize {
        debug_assert!(
            idx[0] < self.dims[0] && idx[1] < self.dims[1] && idx[2] < self.dims[2],
            "{} index {:?} outside {:?}",
            self.name,
            idx,
            self.dims
        );
        (idx[0] * self.dims[1] + idx[1]) * self.dims[2] + idx[2]
    }

    #[inline]
    pub fn get(&self, idx: [usize; 3]) -> T {
        self.data[self.offset(idx)]
    }

    #[inline]
    pub fn set(&mut self, idx: [usize; 3], value: T) {
        let o = self.offset(idx);
        self.data[o] = value;
    }

    /// Bounds-checked read.
    pub fn try_get(&self, idx: [usize; 3]) -> Option<T> {
        if idx.iter().zip(self.dims.iter()).all(|(i, n)| i < n) {
            Some(self.get(idx))
        } else {
            None
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    /// Fill by evaluating `f` at every index.
    pub fn fill_with(&mut self, mut f: impl FnMut([usize; 3]) -> T) {
        for i in 0..self.dims[0] {
            for j in 0..self.dims[1] {
                for k in 0..self.dims[2] {
                    let idx = [i, j, k];
                    let o = self.offset(idx);
                    self.data[o] = f(idx);
                }
            }
        }
    }

    /// Move data toward index 0 along `axis` by `cells`; the last `cells`
    /// layers become zero.
    pub fn shift_along(&mut self, axis: usize, cells: usize) {
        if cells == 0 {
            return;
        }
        let n = self.dims[axis];
        for i in 0..n {
            for mut idx in face_indices(self.dims, axis, i) {
                let value = if i + cells < n {
                    idx[axis] = i + cells;
                    let v = self.get(idx);
                    idx[axis] = i;
                    v
                } else {
                    T::default()
                };
                self.set(idx, value);
            }
        }
    }

    pub fn energy(&self) -> f64 {
        self.data.iter().map(|v| v.norm_sq()).sum()
    }
}

/// Mutable access to component `target` alongside shared access to
/// component `source` of the same vector field.
pub fn pair_mut<T>(
    fields: &mut [Field<T>; 3],
    target: usize,
    source: usize,
) -> (&mut Field<T>, &Field<T>) {
    assert_ne!(target, source, "a component cannot be its own source");
    if target < source {
        let (lo, hi) = fields.split_at_mut(source);
        (&mut lo[target], &hi[0])
    } else {
        let (lo, hi) = fields.split_at_mut(target);
        (&mut hi[0], &lo[source])
    }
}

/// Every index of a `dims`-shaped array whose `axis` coordinate is `at`.
pub fn face_indices(
    dims: [usize; 3],
    axis: usize,
    at: usize,
) -> impl Iterator<Item = [usize; 3]> {
    let t1 = (axis + 1) % 3;
    let t2 = (axis + 2) % 3;
    (0..dims[t1]).flat_map(move |j| {
        (0..dims[t2]).map(move |k| {
            let mut idx = [0; 3];
            idx[axis] = at;
            idx[t1] = j;
            idx[t2] = k;
            idx
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_covers_transverse_plane() {
        let faces: Vec<_> = face_indices([4, 3, 2], 0, 1).collect();
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|idx| idx[0] == 1));
        let faces: Vec<_> = face_indices([4, 3, 2], 1, 2).collect();
        assert_eq!(faces.len(), 8);
        assert!(faces.iter().all(|idx| idx[1] == 2));
    }

    #[test]
    fn shift_moves_data_toward_min_and_zeroes_tail() {
        let mut f: Field<f64> = Field::zeros("Ex", [5, 2, 1], [true, false, false]);
        f.fill_with(|idx| (idx[0] * 10 + idx[1]) as f64);
        f.shift_along(0, 2);
        assert_eq!(f.get([0, 1, 0]), 21.0);
        assert_eq!(f.get([2, 0, 0]), 40.0);
        assert_eq!(f.get([3, 1, 0]), 0.0);
        assert_eq!(f.get([4, 0, 0]), 0.0);
    }

    #[test]
    fn shift_larger_than_extent_clears_everything() {
        let mut f: Field<f64> = Field::zeros("By", [3, 1, 1], [true, false, false]);
        f.fill(1.0);
        f.shift_along(0, 7);
        assert_eq!(f.energy(), 0.0);
    }

    #[test]
    fn pair_mut_splits_either_order() {
        let mut comps: [Field<f64>; 3] = [
            Field::zeros("Bx", [1, 1, 1], [false; 3]),
            Field::zeros("By", [1, 1, 1], [false; 3]),
            Field::zeros("Bz", [1, 1, 1], [false; 3]),
        ];
        comps[0].fill(2.0);
        let (t, s) = pair_mut(&mut comps, 2, 0);
        t.set([0, 0, 0], s.get([0, 0, 0]) * 3.0);
        let (t, s) = pair_mut(&mut comps, 0, 2);
        assert_eq!(s.name(), "Bz");
        t.set([0, 0, 0], -s.get([0, 0, 0]));
        assert_eq!(comps[0].get([0, 0, 0]), -6.0);
    }

    #[test]
    fn complex_energy_uses_modulus() {
        let mut f: Field<Complex<f64>> = Field::zeros("El", [2, 1, 1], [false; 3]);
        f.set([1, 0, 0], Complex::new(3.0, 4.0));
        assert_eq!(f.energy(), 25.0);
        assert_eq!(f.try_get([2, 0, 0]), None);
    }
}
