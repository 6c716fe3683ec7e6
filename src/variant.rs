//======================================================================
// src/variant.rs
// Byte-order variants. Panama is defined over 32-bit words; a variant
// fixes how external bytes map onto those words.
//======================================================================

use core::fmt::Debug;

/// Word byte-order used for every external read and write of the engine.
///
/// Internal arithmetic is order-independent; only loading of absorbed
/// material and storing of emitted words go through this trait.
pub trait WordOrder: Sized + Clone + Copy + Debug + Default + Send + Sync + 'static {
    /// `true` when words are stored least significant byte first.
    const LITTLE_ENDIAN: bool;

    /// Algorithm name reported through `AlgorithmName`.
    const NAME: &'static str;

    /// Reads one word from its external representation.
    fn load(bytes: [u8; 4]) -> u32;

    /// Writes one word to its external representation.
    fn store(word: u32) -> [u8; 4];
}

/// Little-endian Panama, the reference variant.
#[derive(Clone, Copy, Debug, Default)]
pub struct LittleEndian;

impl WordOrder for LittleEndian {
    const LITTLE_ENDIAN: bool = true;
    const NAME: &'static str = "Panama-LE";

    #[inline(always)]
    fn load(bytes: [u8; 4]) -> u32 {
        u32::from_le_bytes(bytes)
    }

    #[inline(always)]
    fn store(word: u32) -> [u8; 4] {
        word.to_le_bytes()
    }
}

/// Big-endian Panama.
#[derive(Clone, Copy, Debug, Default)]
pub struct BigEndian;

impl WordOrder for BigEndian {
    const LITTLE_ENDIAN: bool = false;
    const NAME: &'static str = "Panama-BE";

    #[inline(always)]
    fn load(bytes: [u8; 4]) -> u32 {
        u32::from_be_bytes(bytes)
    }

    #[inline(always)]
    fn store(word: u32) -> [u8; 4] {
        word.to_be_bytes()
    }
}

/// Loads the eight words of one 32-byte block.
#[inline(always)]
pub(crate) fn load_block<B: WordOrder>(block: &[u8]) -> [u32; 8] {
    core::array::from_fn(|i| {
        let at = 4 * i;
        B::load([block[at], block[at + 1], block[at + 2], block[at + 3]])
    })
}
