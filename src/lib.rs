//======================================================================
// src/lib.rs
// Crate entry point. Declares the public API and wires up the modules.
//======================================================================
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::needless_range_loop)]

pub use cipher;
pub use digest;

// --- Module declarations ---
mod backends;
/// State geometry, index tables and algorithm constants.
pub mod consts;
mod core;
/// `digest` adapter: Panama as a hash function.
pub mod hash;
mod state;
/// `cipher` adapter: Panama as a stream cipher.
pub mod stream;
/// Word byte-order variants.
pub mod variant;

pub use crate::core::{Panama, Sink};
pub use crate::hash::{PanamaHash, PanamaVarCore, PanamaVarHash};
pub use crate::stream::{PanamaCore, PanamaStreamCipher};
pub use crate::variant::{BigEndian, LittleEndian, WordOrder};

// --- Convenience Type Aliases for Users ---

/// Little-endian Panama engine.
pub type PanamaLe = Panama<LittleEndian>;
/// Big-endian Panama engine.
pub type PanamaBe = Panama<BigEndian>;

/// Reference (little-endian) Panama hash with a 32-byte digest.
pub type PanamaLeHash = PanamaHash<LittleEndian>;
/// Big-endian Panama hash with a 32-byte digest.
pub type PanamaBeHash = PanamaHash<BigEndian>;

/// Little-endian Panama hash with a runtime-selected digest length.
pub type PanamaLeVarHash = PanamaVarHash<LittleEndian>;
/// Big-endian Panama hash with a runtime-selected digest length.
pub type PanamaBeVarHash = PanamaVarHash<BigEndian>;

/// Reference (little-endian) Panama stream cipher.
pub type PanamaLeStreamCipher = PanamaStreamCipher<LittleEndian>;
/// Big-endian Panama stream cipher.
pub type PanamaBeStreamCipher = PanamaStreamCipher<BigEndian>;
