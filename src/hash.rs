//======================================================================
// src/hash.rs
// Panama hash: absorbs 32-byte blocks, pads with a single terminator
// byte, mixes, and squeezes one 256-bit output block.
//======================================================================

use crate::consts::{DIGEST_BYTES, MIX_ROUNDS, PAD_TERMINATOR};
use crate::core::{Panama, Sink};
use crate::variant::WordOrder;
use core::fmt;
use digest::{
    block_buffer::Eager,
    consts::U32,
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper,
        CtVariableCoreWrapper, OutputSizeUser, RtVariableCoreWrapper, TruncSide, UpdateCore,
        VariableOutputCore,
    },
    HashMarker, InvalidOutputSize, Output, Reset,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Core of the Panama hash, truncatable to any length from 1 to 32 bytes.
///
/// Finalization leaves the core in its initial state, ready for a new message.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct PanamaVarCore<B: WordOrder> {
    engine: Panama<B>,
}

impl<B: WordOrder> PanamaVarCore<B> {
    #[inline]
    fn absorb(&mut self, block: &[u8]) {
        self.engine.iterate(1, Some(block), Sink::Discard);
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &Panama<B> {
        &self.engine
    }
}

impl<B: WordOrder> HashMarker for PanamaVarCore<B> {}

impl<B: WordOrder> BlockSizeUser for PanamaVarCore<B> {
    type BlockSize = U32;
}

impl<B: WordOrder> BufferKindUser for PanamaVarCore<B> {
    type BufferKind = Eager;
}

impl<B: WordOrder> OutputSizeUser for PanamaVarCore<B> {
    type OutputSize = U32;
}

impl<B: WordOrder> UpdateCore for PanamaVarCore<B> {
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for block in blocks {
            self.absorb(block);
        }
    }
}

impl<B: WordOrder> VariableOutputCore for PanamaVarCore<B> {
    const TRUNC_SIDE: TruncSide = TruncSide::Left;

    #[inline]
    fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
        if output_size == 0 || output_size > DIGEST_BYTES {
            return Err(InvalidOutputSize);
        }
        Ok(Self::default())
    }

    fn finalize_variable_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        // The eager buffer never holds a full block, so the terminator fits.
        let pending = buffer.get_data();
        let mut last = Block::<Self>::default();
        last[..pending.len()].copy_from_slice(pending);
        last[pending.len()] = PAD_TERMINATOR;
        self.absorb(&last);

        self.engine.iterate(MIX_ROUNDS, None, Sink::Discard);
        self.engine.iterate(1, None, Sink::Raw(out.as_mut_slice()));
        self.engine.reset();
    }
}

impl<B: WordOrder> Reset for PanamaVarCore<B> {
    #[inline]
    fn reset(&mut self) {
        self.engine.reset();
    }
}

impl<B: WordOrder> AlgorithmName for PanamaVarCore<B> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(B::NAME)
    }
}

impl<B: WordOrder> fmt::Debug for PanamaVarCore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PanamaVarCore<{}> {{ ... }}", B::NAME)
    }
}

/// Fixed 32-byte Panama digest implementing [`digest::Digest`].
pub type PanamaHash<B> = CoreWrapper<CtVariableCoreWrapper<PanamaVarCore<B>, U32>>;

/// Panama digest truncated to a length chosen at runtime.
pub type PanamaVarHash<B> = RtVariableCoreWrapper<PanamaVarCore<B>>;
