//======================================================================
// src/core.rs
// The Panama engine: owns the state and runs rounds in push or pull mode.
//======================================================================

use crate::backends::{self, Tokens};
use crate::consts::BLOCK_BYTES;
use crate::state::PanamaState;
use crate::variant::WordOrder;
use core::marker::PhantomData;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Destination for the eight words a round emits before mutating the state.
///
/// Every buffer covers `32 * count` bytes for an `iterate` of `count` rounds.
pub enum Sink<'a> {
    /// Round output is not produced.
    Discard,
    /// Raw state words are written out.
    Raw(&'a mut [u8]),
    /// State words XOR `mask` are written to `out`.
    Masked {
        /// Receives the masked output.
        out: &'a mut [u8],
        /// Material XORed with the output, e.g. plaintext.
        mask: &'a [u8],
    },
    /// State words are XORed into the buffer in place.
    InPlace(&'a mut [u8]),
}

impl Sink<'_> {
    #[inline(always)]
    pub(crate) fn is_active(&self) -> bool {
        !matches!(self, Sink::Discard)
    }

    /// Writes the output words of `round` through the byte order `B`.
    #[inline(always)]
    pub(crate) fn emit<B: WordOrder>(&mut self, round: usize, words: &[u32; 8]) {
        let span = round * BLOCK_BYTES..(round + 1) * BLOCK_BYTES;
        match self {
            Sink::Discard => {}
            Sink::Raw(out) => {
                for (chunk, &w) in out[span].chunks_exact_mut(4).zip(words.iter()) {
                    chunk.copy_from_slice(&B::store(w));
                }
            }
            Sink::Masked { out, mask } => {
                let mask = &mask[span.clone()];
                let out = &mut out[span];
                for ((chunk, m), &w) in out
                    .chunks_exact_mut(4)
                    .zip(mask.chunks_exact(4))
                    .zip(words.iter())
                {
                    for ((o, k), s) in chunk.iter_mut().zip(m).zip(B::store(w)) {
                        *o = k ^ s;
                    }
                }
            }
            Sink::InPlace(buf) => {
                for (chunk, &w) in buf[span].chunks_exact_mut(4).zip(words.iter()) {
                    for (o, s) in chunk.iter_mut().zip(B::store(w)) {
                        *o ^= s;
                    }
                }
            }
        }
    }

    /// Bytes available to the sink, `None` when output is discarded.
    pub(crate) fn capacity(&self) -> Option<usize> {
        match self {
            Sink::Discard => None,
            Sink::Raw(out) | Sink::InPlace(out) => Some(out.len()),
            Sink::Masked { out, mask } => Some(out.len().min(mask.len())),
        }
    }
}

/// The Panama state-transition engine for word order `B`.
///
/// The engine exclusively owns its state; independent streams need
/// independent engines.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Panama<B: WordOrder> {
    pub(crate) state: PanamaState,
    _order: PhantomData<B>,
}

impl<B: WordOrder> Panama<B> {
    /// An engine in the all-zero state.
    pub fn new() -> Self {
        Self {
            state: PanamaState::ZERO,
            _order: PhantomData,
        }
    }

    /// Returns the engine to the all-zero state.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Runs `count` rounds with the scalar round function.
    ///
    /// With `absorb` present the rounds push `32 * count` bytes into the
    /// state; without it they pull, feeding the state from its own buffer.
    /// Output goes to `sink` before each round mutates the state.
    ///
    /// # Panics
    ///
    /// If `absorb` or the sink buffers are shorter than `32 * count` bytes.
    pub fn iterate(&mut self, count: usize, absorb: Option<&[u8]>, sink: Sink<'_>) {
        check_lengths(count, absorb, &sink);
        backends::soft::iterate::<B>(&mut self.state, count, absorb, sink);
    }

    /// Runs `count` pull rounds on the fastest backend `tokens` allows.
    pub(crate) fn pull(&mut self, tokens: &Tokens, count: usize, sink: Sink<'_>) {
        check_lengths(count, None, &sink);
        backends::pull::<B>(&mut self.state, tokens, count, sink);
    }

    /// Returns `true` when every state word and the stage pointer are zero.
    pub fn is_zero(&self) -> bool {
        self.state == PanamaState::ZERO
    }
}

impl<B: WordOrder> Default for Panama<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn check_lengths(count: usize, absorb: Option<&[u8]>, sink: &Sink<'_>) {
    let needed = count * BLOCK_BYTES;
    if let Some(input) = absorb {
        assert!(input.len() >= needed, "absorb buffer shorter than {needed} bytes");
    }
    if let Some(len) = sink.capacity() {
        assert!(len >= needed, "output buffer shorter than {needed} bytes");
    }
}
