//======================================================================
// src/backends/simd.rs
// SSE2 pull round for little-endian Panama.
//
// Register vectors follow the physical layout of `A_SLOT`:
//   x0 = a4 a8 a12 a16 | x1 = a3 a7 a11 a15 | x2 = a2 a6 a10 a14
//   x3 = a1 a5 a9 a13  | slot 16 = a0
// so `a(i + 4)` is the next lane and the rotated operands of gamma and
// theta are plain unaligned loads at slots 1, 5, 9 and 13.
//======================================================================

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::consts::{A_SLOT, PI, ROTATION, STAGE_WORDS, STATE_WORDS, TAP_FEED, TAP_RETURN, TAP_THETA};
use crate::core::Sink;
use crate::state::{ring_slot, PanamaState};
use crate::variant::LittleEndian;

/// Runs `count` pull rounds.
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn pull(state: &mut PanamaState, count: usize, mut sink: Sink<'_>) {
    for round in 0..count {
        pull_round(state, round, &mut sink);
    }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load(words: &[u32], at: usize) -> __m128i {
    debug_assert!(at + 4 <= words.len());
    _mm_loadu_si128(words.as_ptr().add(at).cast())
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store(words: &mut [u32], at: usize, v: __m128i) {
    debug_assert!(at + 4 <= words.len());
    _mm_storeu_si128(words.as_mut_ptr().add(at).cast(), v)
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn xor3(a: __m128i, b: __m128i, c: __m128i) -> __m128i {
    _mm_xor_si128(_mm_xor_si128(a, b), c)
}

/// `x ^ (y | !z)` lane-wise.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn gamma(x: __m128i, y: __m128i, z: __m128i) -> __m128i {
    let not_z = _mm_xor_si128(z, _mm_set1_epi32(-1));
    _mm_xor_si128(x, _mm_or_si128(y, not_z))
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn pull_round(state: &mut PanamaState, round: usize, sink: &mut Sink<'_>) {
    let x0 = load(&state.a, 0);
    let x1 = load(&state.a, 4);
    let x2 = load(&state.a, 8);
    let x3 = load(&state.a, 12);

    // Output a9..a16: a 4x4 transpose of the upper lane pairs.
    if sink.is_active() {
        let t0 = _mm_unpackhi_epi32(x3, x2);
        let t1 = _mm_unpackhi_epi32(x1, x0);
        let mut z = [0u32; 8];
        store(&mut z, 0, _mm_unpacklo_epi64(t0, t1));
        store(&mut z, 4, _mm_unpackhi_epi64(t0, t1));
        sink.emit::<LittleEndian>(round, &z);
    }

    // Buffer update. In the interleaved stage layout a1..a8 are the low lane
    // pairs of x3, x2 (first half) and x1, x0 (second half).
    let pointer = state.stage;
    let b16 = state.ring[ring_slot(pointer, TAP_THETA)];
    let b4 = state.ring[ring_slot(pointer, TAP_FEED)];
    let pointer = pointer.wrapping_add(1);
    state.stage = pointer;
    let head = ring_slot(pointer, 0);
    let tail = ring_slot(pointer, TAP_RETURN);

    let evicted_lo = load(&state.ring[head], 0);
    let evicted_hi = load(&state.ring[head], 4);
    store(&mut state.ring[head], 0, _mm_xor_si128(evicted_lo, _mm_unpacklo_epi64(x3, x2)));
    store(&mut state.ring[head], 4, _mm_xor_si128(evicted_hi, _mm_unpacklo_epi64(x1, x0)));
    // Logical word j lands on (j + 6) mod 8: the upper half moves down as is,
    // the lower half moves up with each lane pair swapped.
    let tail_lo = _mm_xor_si128(load(&state.ring[tail], 0), evicted_hi);
    let tail_hi = _mm_xor_si128(
        load(&state.ring[tail], 4),
        _mm_shuffle_epi32::<0b10_11_00_01>(evicted_lo),
    );
    store(&mut state.ring[tail], 0, tail_lo);
    store(&mut state.ring[tail], 4, tail_hi);

    // Gamma.
    let mut g = [0u32; STATE_WORDS];
    let a5 = load(&state.a, 13); // a5 a9 a13 a0
    let a6 = load(&state.a, 9); // a6 a10 a14 a1
    store(&mut g, 12, gamma(x3, x2, x1));
    store(&mut g, 8, gamma(x2, x1, x0));
    store(&mut g, 4, gamma(x1, x0, a5));
    store(&mut g, 0, gamma(x0, a5, a6));
    g[A_SLOT[0]] = state.a[A_SLOT[0]] ^ (state.a[A_SLOT[1]] | !state.a[A_SLOT[2]]);

    // Pi. Lane rotations differ, which SSE2 cannot express.
    let mut c = [0u32; STATE_WORDS];
    for i in 0..STATE_WORDS {
        c[A_SLOT[PI[i]]] = g[A_SLOT[i]].rotate_left(ROTATION[i]);
    }

    // Theta.
    let c0 = load(&c, 0);
    let c1 = load(&c, 4);
    let c2 = load(&c, 8);
    let c3 = load(&c, 12);
    let c5 = load(&c, 13); // c5 c9 c13 c0
    let mut v3 = xor3(c3, c2, c5);
    let mut v2 = xor3(c2, c1, load(&c, 9));
    let mut v1 = xor3(c1, c0, load(&c, 5));
    let mut v0 = xor3(c0, c5, load(&c, 1));
    let a0 = c[A_SLOT[0]] ^ c[A_SLOT[1]] ^ c[A_SLOT[4]] ^ 1;

    // Sigma: a1..a8 take the -4 stage, a9..a16 the +16 stage.
    let feed_lo = load(&b4, 0);
    let feed_hi = load(&b4, STAGE_WORDS / 2);
    let theta_lo = load(&b16, 0);
    let theta_hi = load(&b16, STAGE_WORDS / 2);
    v3 = _mm_xor_si128(v3, _mm_unpacklo_epi64(feed_lo, theta_lo));
    v2 = _mm_xor_si128(v2, _mm_unpackhi_epi64(feed_lo, theta_lo));
    v1 = _mm_xor_si128(v1, _mm_unpacklo_epi64(feed_hi, theta_hi));
    v0 = _mm_xor_si128(v0, _mm_unpackhi_epi64(feed_hi, theta_hi));

    store(&mut state.a, 0, v0);
    store(&mut state.a, 4, v1);
    store(&mut state.a, 8, v2);
    store(&mut state.a, 12, v3);
    state.a[A_SLOT[0]] = a0;
}
