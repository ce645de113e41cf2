use std::ops::Range;

/// Contiguous split of the path indices `[0, n_paths)` into one block per worker.
///
/// Blocks are `n / W` or `n / W + 1` long, the first `n % W` workers taking the longer
/// ones. With more workers than paths the trailing blocks are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPartition {
    n_paths: usize,
    blocks: Vec<Range<usize>>,
}

impl PathPartition {
    pub fn contiguous(n_paths: usize, n_workers: usize) -> Self {
        let workers = n_workers.max(1);
        let base = n_paths / workers;
        let rem = n_paths % workers;

        let mut blocks = Vec::with_capacity(workers);
        let mut start = 0;
        for w in 0..workers {
            let len = if w < rem { base + 1 } else { base };
            blocks.push(start..start + len);
            start += len;
        }
        Self { n_paths, blocks }
    }

    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    pub fn n_workers(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[Range<usize>] {
        &self.blocks
    }

    /// Splits `buffer` into the disjoint slices owned by each worker, in worker order.
    ///
    /// # Panics
    ///
    /// Panics if `buffer.len()` differs from the partitioned path count.
    pub fn split_mut<'a, T>(&self, buffer: &'a mut [T]) -> Vec<&'a mut [T]> {
        assert_eq!(
            buffer.len(),
            self.n_paths,
            "buffer length does not match partition"
        );
        let mut slices = Vec::with_capacity(self.blocks.len());
        let mut rest = buffer;
        for block in &self.blocks {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(block.len());
            slices.push(head);
            rest = tail;
        }
        slices
    }
}
