//======================================================================
// src/backends/soft.rs
// Portable scalar round function, push and pull modes, any word order.
//======================================================================

use crate::consts::{
    A_SLOT, BLOCK_BYTES, B_SLOT, PI, ROTATION, STAGE_WORDS, STATE_WORDS, TAP_FEED, TAP_RETURN,
    TAP_THETA,
};
use crate::core::Sink;
use crate::state::{ring_slot, PanamaState};
use crate::variant::{load_block, WordOrder};

/// Runs `count` rounds. Callers have checked the buffer lengths.
pub(crate) fn iterate<B: WordOrder>(
    state: &mut PanamaState,
    count: usize,
    absorb: Option<&[u8]>,
    mut sink: Sink<'_>,
) {
    for round in 0..count {
        let input = absorb
            .map(|p| load_block::<B>(&p[round * BLOCK_BYTES..(round + 1) * BLOCK_BYTES]));
        round_fn::<B>(state, round, input.as_ref(), &mut sink);
    }
}

#[inline(always)]
fn round_fn<B: WordOrder>(
    state: &mut PanamaState,
    round: usize,
    input: Option<&[u32; STAGE_WORDS]>,
    sink: &mut Sink<'_>,
) {
    if sink.is_active() {
        let z: [u32; 8] = core::array::from_fn(|i| state.word(i + 9));
        sink.emit::<B>(round, &z);
    }

    // Buffer update. The taps read by sigma are captured before the pointer
    // moves; none of them coincides with the two stages written here.
    let pointer = state.stage;
    let b16 = state.ring[ring_slot(pointer, TAP_THETA)];
    let b4 = state.ring[ring_slot(pointer, TAP_FEED)];
    let pointer = pointer.wrapping_add(1);
    state.stage = pointer;
    let head = ring_slot(pointer, 0);
    let tail = ring_slot(pointer, TAP_RETURN);
    for j in 0..STAGE_WORDS {
        let evicted = state.ring[head][B_SLOT[j]];
        let fresh = match input {
            Some(words) => words[j],
            None => state.word(j + 1),
        };
        state.ring[head][B_SLOT[j]] = fresh ^ evicted;
        state.ring[tail][B_SLOT[(j + 6) % STAGE_WORDS]] ^= evicted;
    }

    // Gamma and pi.
    let mut c = [0u32; STATE_WORDS];
    for i in 0..STATE_WORDS {
        let g = state.word(i) ^ (state.word(i + 1) | !state.word(i + 2));
        c[A_SLOT[PI[i]]] = g.rotate_left(ROTATION[i]);
    }
    let c = |i: usize| c[A_SLOT[i % STATE_WORDS]];

    // Theta and sigma.
    let a = &mut state.a;
    a[A_SLOT[0]] = c(0) ^ c(1) ^ c(4) ^ 1;
    for j in 0..STAGE_WORDS {
        let feed = match input {
            Some(words) => words[j],
            None => b4[B_SLOT[j]],
        };
        a[A_SLOT[j + 1]] = c(j + 1) ^ c(j + 2) ^ c(j + 5) ^ feed;
    }
    for j in 0..STAGE_WORDS {
        a[A_SLOT[j + 9]] = c(j + 9) ^ c(j + 10) ^ c(j + 13) ^ b16[B_SLOT[j]];
    }
}
