//! Block-level data structures used by the engine.
//!
//! A [`Block`] is a contiguous interval [start, end) of layers. The engine
//! advances one block at a time and may keep the frontier at every block
//! boundary as a [`Checkpoint`].

/// Contiguous interval of layers [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Inclusive start layer index.
    pub start: usize,
    /// Exclusive end layer index.
    pub end: usize,
}

impl Block {
    /// Length of the block in layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the block is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `num_layers` steps into blocks of at most `block_size` layers.
///
/// # Panics
/// Panics if `block_size == 0`.
pub fn partition(num_layers: usize, block_size: usize) -> impl Iterator<Item = Block> {
    assert!(block_size > 0, "block_size must be positive");
    (0..num_layers.div_ceil(block_size)).map(move |k| Block {
        start: k * block_size,
        end: ((k + 1) * block_size).min(num_layers),
    })
}

/// Frontier snapshot taken at a block boundary.
#[derive(Debug, Clone)]
pub struct Checkpoint<F> {
    /// Layer the frontier belongs to.
    pub layer: usize,
    /// Frontier after `layer` steps.
    pub frontier: F,
}

/// Frontiers recorded at layer 0 and at the end of every block.
#[derive(Debug, Clone)]
pub struct Checkpoints<F> {
    block_size: usize,
    entries: Vec<Checkpoint<F>>, // sorted by layer, entries[0].layer == 0
}

impl<F> Checkpoints<F> {
    pub(crate) fn new(block_size: usize, entries: Vec<Checkpoint<F>>) -> Self {
        debug_assert!(
            entries.windows(2).all(|w| w[0].layer < w[1].layer),
            "checkpoints must be strictly increasing"
        );
        Self {
            block_size,
            entries,
        }
    }

    /// Spacing between consecutive checkpoints.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of stored checkpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checkpoints in increasing layer order.
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint<F>> {
        self.entries.iter()
    }

    /// The latest checkpoint at or before `layer`.
    pub fn nearest(&self, layer: usize) -> Option<&Checkpoint<F>> {
        let idx = self.entries.partition_point(|c| c.layer <= layer);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }

    /// Checkpoint for the final layer.
    pub fn last(&self) -> Option<&Checkpoint<F>> {
        self.entries.last()
    }
}
