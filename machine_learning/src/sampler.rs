use std::num::NonZeroUsize;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::{Rng, seq::SliceRandom};

use crate::dataset::Dataset;

/// Splits a dataset into randomly ordered, non overlapping minibatches once per epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSampler {
    batch_size: NonZeroUsize,
}

impl BatchSampler {
    /// Creates a new `BatchSampler`.
    ///
    /// # Arguments
    /// * `batch_size` - The size of every batch but possibly the last one of each epoch.
    pub fn new(batch_size: NonZeroUsize) -> Self {
        Self { batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Draws a fresh permutation of the dataset indices and returns the batches it splits into.
    ///
    /// If `dataset.len()` is not a multiple of the batch size, the last batch holds the
    /// remaining `dataset.len() % batch_size` samples.
    ///
    /// # Arguments
    /// * `dataset` - The dataset to sample from.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// A single use iterator over the epoch's batches.
    pub fn iterate<'a, R: Rng + ?Sized>(&self, dataset: &'a Dataset, rng: &mut R) -> Batches<'a> {
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        order.shuffle(rng);

        Batches {
            dataset,
            order,
            batch_size: self.batch_size.get(),
            cursor: 0,
        }
    }
}

/// The minibatches of a single epoch.
#[derive(Debug)]
pub struct Batches<'a> {
    dataset: &'a Dataset,
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl Iterator for Batches<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(self.order.len());
        let indices = self.order[self.cursor..end].to_vec();
        self.cursor = end;

        let (x, y) = self.dataset.select(&indices);
        Some(Batch { indices, x, y })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Batches<'_> {}

/// A minibatch: the sampled dataset indices and a copy of their rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    indices: Vec<usize>,
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Batch {
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The dataset positions this batch was drawn from.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn range_dataset(n: usize) -> Dataset {
        let data = (0..n).flat_map(|i| [i as f64, i as f64 + 100.]).collect();
        Dataset::from_flat(data, 1).unwrap()
    }

    fn sampler(batch_size: usize) -> BatchSampler {
        BatchSampler::new(NonZeroUsize::new(batch_size).unwrap())
    }

    #[test]
    fn remainder_goes_to_the_last_batch() {
        let ds = range_dataset(23);
        let mut rng = StdRng::seed_from_u64(0);

        let batches = sampler(10).iterate(&ds, &mut rng);
        assert_eq!(batches.len(), 3);

        let sizes: Vec<_> = batches.map(|b| b.len()).collect();
        assert_eq!(sizes, [10, 10, 3]);
    }

    #[test]
    fn batch_rows_follow_their_indices() {
        let ds = range_dataset(7);
        let mut rng = StdRng::seed_from_u64(1);

        for batch in sampler(3).iterate(&ds, &mut rng) {
            for (i, &idx) in batch.indices().iter().enumerate() {
                assert_eq!(batch.x()[[i, 0]], idx as f64);
                assert_eq!(batch.y()[i], idx as f64 + 100.);
            }
        }
    }

    #[test]
    fn batch_larger_than_dataset_yields_one_batch() {
        let ds = range_dataset(4);
        let mut rng = StdRng::seed_from_u64(2);

        let batches: Vec<_> = sampler(10).iterate(&ds, &mut rng).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 4);
    }

    #[test]
    fn every_call_reshuffles() {
        let ds = range_dataset(100);
        let mut rng = StdRng::seed_from_u64(3);
        let s = sampler(100);

        let first: Vec<_> = s.iterate(&ds, &mut rng).flat_map(|b| b.indices).collect();
        let second: Vec<_> = s.iterate(&ds, &mut rng).flat_map(|b| b.indices).collect();
        assert_ne!(first, second);
    }
}
