//! Lexical scope-chain traversal
//!
//! Variable listing inspects the blocks from the innermost one containing
//! the frame's current code location out to the function's own block,
//! inclusive, and no further: the walk must never continue into file- or
//! global-scope blocks.

use framescope_target::{Block, BlockId, FrameHandle, ScopeSource};

/// Iterator over the blocks to inspect for one frame, innermost first.
///
/// Stops after yielding the first function-owned block. When malformed
/// debug information never marks one, the walk ends with the superblock
/// chain; an unresolvable block id ends it the same way. Derived fresh for
/// each listing request; not restartable.
pub struct ScopeChain<'a, T: ScopeSource + ?Sized> {
    source: &'a T,
    next: Option<BlockId>,
}

impl<'a, T: ScopeSource + ?Sized> ScopeChain<'a, T> {
    /// Start at the innermost block containing the frame's code location.
    pub fn for_frame(source: &'a T, frame: FrameHandle) -> Self {
        Self {
            source,
            next: source.block_at(frame, false),
        }
    }
}

impl<'a, T: ScopeSource + ?Sized> Iterator for ScopeChain<'a, T> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        let block = self.source.block(id)?;
        if !block.function_owned {
            self.next = block.superblock;
        }
        Some((id, block))
    }
}
