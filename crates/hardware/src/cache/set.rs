//! Cache blocks and sets.
//!
//! A [`CacheSet`] owns a fixed array of [`CacheBlock`]s (one per way) plus the
//! circular pointer used by the round-robin style policies. Blocks are mutated only
//! by the owning level's access routine and by replacement-policy callbacks, which
//! receive a borrowed set or block and never retain it.

/// One cache block (line) and the bookkeeping the replacement policies read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheBlock {
    /// Stored tag; meaningful only while `valid` is set.
    pub tag: u64,
    /// Whether the block currently holds a tag.
    pub valid: bool,
    /// Whether the block has been written since it was installed.
    pub dirty: bool,
    /// Raw payload buffer, sized to the level's block size.
    pub data: Vec<u8>,
    /// Level clock value of the most recent access.
    pub last_access: u64,
    /// Number of accesses since installation (LFU/LFRU).
    pub access_count: u64,
    /// Level clock value at installation (FIFO/Second Chance/LFRU).
    pub inserted_at: u64,
    /// Second Chance reference bit.
    pub referenced: bool,
}

impl CacheBlock {
    /// Creates an empty block with a zeroed payload of `block_bytes`.
    pub fn new(block_bytes: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            data: vec![0; block_bytes],
            last_access: 0,
            access_count: 0,
            inserted_at: 0,
            referenced: false,
        }
    }

    /// Returns the block to its empty state, keeping the payload allocation.
    pub fn reset(&mut self) {
        self.tag = 0;
        self.valid = false;
        self.dirty = false;
        self.data.fill(0);
        self.last_access = 0;
        self.access_count = 0;
        self.inserted_at = 0;
        self.referenced = false;
    }
}

/// A set of `ways` interchangeable blocks.
#[derive(Clone, Debug)]
pub struct CacheSet {
    blocks: Vec<CacheBlock>,
    /// Circular scan pointer, always in `[0, ways)`.
    pointer: usize,
}

impl CacheSet {
    /// Creates a set of `ways` empty blocks of `block_bytes` each.
    ///
    /// Returns `None` for zero ways: the pointer and victim arithmetic need at
    /// least one way.
    pub fn new(ways: usize, block_bytes: usize) -> Option<Self> {
        (ways > 0).then(|| Self {
            blocks: vec![CacheBlock::new(block_bytes); ways],
            pointer: 0,
        })
    }

    /// Associativity of the set.
    #[inline]
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }

    /// Blocks in way order.
    #[inline]
    pub fn blocks(&self) -> &[CacheBlock] {
        &self.blocks
    }

    /// Mutable blocks in way order.
    #[inline]
    pub fn blocks_mut(&mut self) -> &mut [CacheBlock] {
        &mut self.blocks
    }

    /// Current circular pointer.
    #[inline]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Moves the circular pointer forward one way, wrapping at the associativity.
    #[inline]
    pub fn advance_pointer(&mut self) {
        self.pointer = (self.pointer + 1) % self.blocks.len();
    }

    /// Way holding a valid block tagged `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.blocks.iter().position(|b| b.valid && b.tag == tag)
    }

    /// First empty way in set order, if any.
    pub fn first_invalid(&self) -> Option<usize> {
        self.blocks.iter().position(|b| !b.valid)
    }

    /// Empties every block and rewinds the pointer.
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.reset();
        }
        self.pointer = 0;
    }
}
