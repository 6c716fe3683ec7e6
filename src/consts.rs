//======================================================================
// src/consts.rs
// Geometry of the Panama state and the index tables derived from it.
//======================================================================

/// Number of 32-bit words in the register `a`.
pub const STATE_WORDS: usize = 17;

/// Number of 32-bit words in one buffer stage.
pub const STAGE_WORDS: usize = 8;

/// Number of stages in the circular buffer.
pub const STAGES: usize = 32;

/// Bytes absorbed or emitted by one round.
pub const BLOCK_BYTES: usize = STAGE_WORDS * 4;

/// Cipher key size in bytes.
pub const KEY_BYTES: usize = 32;

/// Cipher IV size in bytes.
pub const IV_BYTES: usize = 32;

/// Native digest size in bytes.
pub const DIGEST_BYTES: usize = 32;

/// Blank rounds run after key/IV loading and after the final padded block.
pub const MIX_ROUNDS: usize = 32;

/// Terminator appended to the last message block.
pub const PAD_TERMINATOR: u8 = 0x01;

/// Stage read by the second half of sigma, relative to the current stage.
pub const TAP_THETA: usize = 16;

/// Stage fed back in pull mode (`-4`), relative to the current stage.
pub const TAP_FEED: usize = STAGES - 4;

/// Stage receiving the evicted words (`-25`), relative to the advanced stage.
pub const TAP_RETURN: usize = STAGES - 25;

/// Physical slot of each logical register word: `(13 * i + 16) mod 17`.
///
/// 13 is the inverse of 4 modulo 17, so logical words `4, 8, 12, 16` land in
/// slots `0..4`, `3, 7, 11, 15` in `4..8`, `2, 6, 10, 14` in `8..12`,
/// `1, 5, 9, 13` in `12..16` and word 0 in slot 16.
pub const A_SLOT: [usize; STATE_WORDS] = a_slots();

/// Physical slot of each logical stage word: `(2 * j mod 8) + j / 4`.
pub const B_SLOT: [usize; STAGE_WORDS] = b_slots();

/// Destination of gamma output `i` under pi: `5 * i mod 17`.
pub const PI: [usize; STATE_WORDS] = pi_targets();

/// Left rotation applied to gamma output `i`: `T(5i mod 17) mod 32`.
pub const ROTATION: [u32; STATE_WORDS] = rotations();

const fn a_slots() -> [usize; STATE_WORDS] {
    let mut table = [0; STATE_WORDS];
    let mut i = 0;
    while i < STATE_WORDS {
        table[i] = (13 * i + 16) % STATE_WORDS;
        i += 1;
    }
    table
}

const fn b_slots() -> [usize; STAGE_WORDS] {
    let mut table = [0; STAGE_WORDS];
    let mut j = 0;
    while j < STAGE_WORDS {
        table[j] = (2 * j) % STAGE_WORDS + j / 4;
        j += 1;
    }
    table
}

const fn pi_targets() -> [usize; STATE_WORDS] {
    let mut table = [0; STATE_WORDS];
    let mut i = 0;
    while i < STATE_WORDS {
        table[i] = (5 * i) % STATE_WORDS;
        i += 1;
    }
    table
}

const fn rotations() -> [u32; STATE_WORDS] {
    let mut table = [0; STATE_WORDS];
    let mut i = 0;
    while i < STATE_WORDS {
        let k = (5 * i) % STATE_WORDS;
        table[i] = ((k * (k + 1) / 2) % 32) as u32;
        i += 1;
    }
    table
}
