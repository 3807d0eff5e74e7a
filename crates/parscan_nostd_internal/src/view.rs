use ndarray::{ArrayView1, ArrayViewMut1, Axis, s};

/// A read-only view of a 1D sequence of elements.
///
/// # Note
/// There is some benefit to defining this even though it wraps ArrayView1
/// since it helps contain all references to the ndarray package to a single
/// file. It also lets callers hand us strided views (e.g. a column of a
/// larger array) without the algorithms knowing the difference.
pub struct SequenceView<'a, T> {
    data: ArrayView1<'a, T>,
}

impl<'a, T> SequenceView<'a, T> {
    pub fn from_slice(data: &'a [T]) -> Self {
        Self {
            data: ArrayView1::from(data),
        }
    }

    pub fn from_array_view(data: ArrayView1<'a, T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// borrow the sub-range `[begin, end)` as its own view
    pub fn range(&self, begin: usize, end: usize) -> SequenceView<'_, T> {
        SequenceView {
            data: self.data.slice(s![begin..end]),
        }
    }

    /// consume the view, producing disjoint views over `[0, mid)` and
    /// `[mid, len)`
    pub fn split_at(self, mid: usize) -> (Self, Self) {
        let (left, right) = self.data.split_at(Axis(0), mid);
        (Self { data: left }, Self { data: right })
    }
}

impl<T> core::ops::Index<usize> for SequenceView<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

/// A mutable view of a 1D sequence of elements.
///
/// Unlike [`SequenceView`], this view is exclusively owned: handing a tile
/// or a split unit its own `SequenceViewMut` is what makes "each output
/// index is written by exactly one worker" a fact about the types rather
/// than a convention the workers must uphold.
pub struct SequenceViewMut<'a, T> {
    data: ArrayViewMut1<'a, T>,
}

impl<'a, T> SequenceViewMut<'a, T> {
    pub fn from_slice(data: &'a mut [T]) -> Self {
        Self {
            data: ArrayViewMut1::from(data),
        }
    }

    pub fn from_array_view(data: ArrayViewMut1<'a, T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// mutably borrow the sub-range `[begin, end)` as its own view
    pub fn range_mut(&mut self, begin: usize, end: usize) -> SequenceViewMut<'_, T> {
        SequenceViewMut {
            data: self.data.slice_mut(s![begin..end]),
        }
    }

    /// consume the view, producing disjoint views over `[0, mid)` and
    /// `[mid, len)`
    pub fn split_at(self, mid: usize) -> (Self, Self) {
        let (left, right) = self.data.split_at(Axis(0), mid);
        (Self { data: left }, Self { data: right })
    }
}

impl<T> core::ops::Index<usize> for SequenceViewMut<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> core::ops::IndexMut<usize> for SequenceViewMut<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}
