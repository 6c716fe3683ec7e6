//======================================================================
// src/stream.rs
// Panama stream cipher: key/IV loading, mixing, and keystream output.
//======================================================================

use crate::backends::{self, Tokens};
use crate::consts::{BLOCK_BYTES, IV_BYTES, KEY_BYTES, MIX_ROUNDS};
use crate::core::{Panama, Sink};
use crate::variant::WordOrder;
use cipher::{
    consts::{U1, U32},
    AlgorithmName, Block, BlockSizeUser, InvalidLength, Iv, IvSizeUser, Key, KeyInit, KeyIvInit,
    KeySizeUser, ParBlocksSizeUser, StreamBackend, StreamCipherCore, StreamCipherCoreWrapper,
    StreamClosure,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Core of the Panama stream cipher.
///
/// The keystream is not seekable: every block depends on the whole history
/// of the state since the last resynchronization.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PanamaCore<B: WordOrder> {
    engine: Panama<B>,
    key: [u8; KEY_BYTES],
    /// CPU capability token for the vectorized pull round.
    #[zeroize(skip)]
    tokens: Tokens,
}

impl<B: WordOrder> PanamaCore<B> {
    /// `key` is exactly `KEY_BYTES` long.
    fn with_key(key: &[u8]) -> Self {
        let mut stored = [0u8; KEY_BYTES];
        stored.copy_from_slice(key);
        Self {
            engine: Panama::new(),
            key: stored,
            tokens: backends::tokens(),
        }
    }

    /// Builds a cipher from a 32-byte key and an IV of 0 or 32 bytes.
    ///
    /// An empty IV stands for the all-zero IV.
    pub fn from_slices(key: &[u8], iv: &[u8]) -> Result<Self, InvalidLength> {
        if key.len() != KEY_BYTES {
            return Err(InvalidLength);
        }
        let mut core = Self::with_key(key);
        core.resynchronize(iv)?;
        Ok(core)
    }

    /// Replaces the stored key. Takes effect at the next [`resynchronize`].
    ///
    /// A key that is not 32 bytes long is rejected and nothing changes.
    ///
    /// [`resynchronize`]: Self::resynchronize
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), InvalidLength> {
        if key.len() != KEY_BYTES {
            return Err(InvalidLength);
        }
        self.key.copy_from_slice(key);
        Ok(())
    }

    /// Restarts the keystream from the stored key and `iv`.
    ///
    /// `iv` must be empty (all-zero IV) or 32 bytes; otherwise the state is
    /// left untouched.
    pub fn resynchronize(&mut self, iv: &[u8]) -> Result<(), InvalidLength> {
        let mut block = [0u8; IV_BYTES];
        match iv.len() {
            0 => {}
            IV_BYTES => block.copy_from_slice(iv),
            _ => return Err(InvalidLength),
        }
        self.restart(&block);
        Ok(())
    }

    fn restart(&mut self, iv: &[u8; IV_BYTES]) {
        self.engine.reset();
        self.engine.iterate(1, Some(&self.key[..]), Sink::Discard);
        self.engine.iterate(1, Some(&iv[..]), Sink::Discard);
        self.engine.pull(&self.tokens, MIX_ROUNDS, Sink::Discard);
    }

    /// Produces keystream for `output.len() / 32` blocks.
    ///
    /// With `input` present the keystream is XORed with it (encryption and
    /// decryption are the same operation); otherwise raw keystream is written.
    /// Lengths must be equal multiples of 32 bytes.
    pub fn operate_keystream(
        &mut self,
        output: &mut [u8],
        input: Option<&[u8]>,
    ) -> Result<(), InvalidLength> {
        let count = block_count(output.len())?;
        let sink = match input {
            Some(mask) if mask.len() != output.len() => return Err(InvalidLength),
            Some(mask) => Sink::Masked { out: output, mask },
            None => Sink::Raw(output),
        };
        self.engine.pull(&self.tokens, count, sink);
        Ok(())
    }

    /// XORs keystream into `buffer`, whose length must be a multiple of 32.
    pub fn apply_keystream_in_place(&mut self, buffer: &mut [u8]) -> Result<(), InvalidLength> {
        let count = block_count(buffer.len())?;
        self.engine.pull(&self.tokens, count, Sink::InPlace(buffer));
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &Panama<B> {
        &self.engine
    }
}

fn block_count(len: usize) -> Result<usize, InvalidLength> {
    if len % BLOCK_BYTES == 0 {
        Ok(len / BLOCK_BYTES)
    } else {
        Err(InvalidLength)
    }
}

impl<B: WordOrder> KeySizeUser for PanamaCore<B> {
    type KeySize = U32;
}

impl<B: WordOrder> IvSizeUser for PanamaCore<B> {
    type IvSize = U32;
}

impl<B: WordOrder> BlockSizeUser for PanamaCore<B> {
    type BlockSize = U32;
}

impl<B: WordOrder> KeyIvInit for PanamaCore<B> {
    fn new(key: &Key<Self>, iv: &Iv<Self>) -> Self {
        let mut block = [0u8; IV_BYTES];
        block.copy_from_slice(iv);
        let mut core = Self::with_key(key);
        core.restart(&block);
        core
    }
}

/// Key-only construction runs with the all-zero IV.
impl<B: WordOrder> KeyInit for PanamaCore<B> {
    fn new(key: &Key<Self>) -> Self {
        let mut core = Self::with_key(key);
        core.restart(&[0; IV_BYTES]);
        core
    }
}

impl<B: WordOrder> StreamCipherCore for PanamaCore<B> {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(self));
    }
}

impl<B: WordOrder> AlgorithmName for PanamaCore<B> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(B::NAME)
    }
}

impl<B: WordOrder> fmt::Debug for PanamaCore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PanamaCore<{}> {{ ... }}", B::NAME)
    }
}

/// Keystream backend handed to `StreamCipherCoreWrapper`; one pull round per block.
struct Backend<'a, B: WordOrder>(&'a mut PanamaCore<B>);

impl<'a, B: WordOrder> BlockSizeUser for Backend<'a, B> {
    type BlockSize = U32;
}

impl<'a, B: WordOrder> ParBlocksSizeUser for Backend<'a, B> {
    type ParBlocksSize = U1;
}

impl<'a, B: WordOrder> StreamBackend for Backend<'a, B> {
    #[inline]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let core = &mut *self.0;
        core.engine.pull(&core.tokens, 1, Sink::Raw(block.as_mut_slice()));
    }
}

/// Panama stream cipher with partial-block buffering.
pub type PanamaStreamCipher<B> = StreamCipherCoreWrapper<PanamaCore<B>>;
