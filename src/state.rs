//======================================================================
// src/state.rs
// Persistent Panama state: the 17-word register, the 32-stage feedback
// ring and the stage pointer.
//======================================================================

use crate::consts::{A_SLOT, STAGES, STAGE_WORDS, STATE_WORDS};
use zeroize::Zeroize;

/// One buffer stage, stored in the interleaved layout of [`B_SLOT`](crate::consts::B_SLOT).
pub(crate) type Stage = [u32; STAGE_WORDS];

#[derive(Clone, PartialEq, Eq, Zeroize)]
pub(crate) struct PanamaState {
    /// Register words in physical order, see [`A_SLOT`].
    pub(crate) a: [u32; STATE_WORDS],
    pub(crate) ring: [Stage; STAGES],
    /// Monotonic stage counter; only its value modulo `STAGES` addresses the ring.
    pub(crate) stage: u32,
}

impl PanamaState {
    pub(crate) const ZERO: Self = Self {
        a: [0; STATE_WORDS],
        ring: [[0; STAGE_WORDS]; STAGES],
        stage: 0,
    };

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.zeroize();
    }

    /// Logical register word `i`.
    #[inline(always)]
    pub(crate) fn word(&self, i: usize) -> u32 {
        self.a[A_SLOT[i % STATE_WORDS]]
    }
}

impl Default for PanamaState {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Ring index of the stage `offset` stages ahead of `pointer`.
///
/// Offsets behind the pointer are passed as `STAGES - n`. The pointer wraps at
/// `2^32`, which is a multiple of `STAGES`, so wrapping keeps positions intact.
#[inline(always)]
pub(crate) fn ring_slot(pointer: u32, offset: usize) -> usize {
    (pointer as usize).wrapping_add(offset) % STAGES
}
