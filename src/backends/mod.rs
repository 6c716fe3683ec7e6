//======================================================================
// src/backends/mod.rs
// Round-function backends and the runtime selection between them.
//======================================================================

use crate::core::Sink;
use crate::state::PanamaState;
use crate::variant::WordOrder;
use cfg_if::cfg_if;

pub(crate) mod soft;

cfg_if! {
    if #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(panama_force_soft)))] {
        pub(crate) mod simd;

        cpufeatures::new!(sse2_cpuid, "sse2");

        /// CPU capability token probed once per cipher instance.
        pub(crate) type Tokens = sse2_cpuid::InitToken;

        pub(crate) fn tokens() -> Tokens {
            sse2_cpuid::init()
        }
    } else {
        pub(crate) type Tokens = ();

        pub(crate) fn tokens() -> Tokens {}
    }
}

/// Runs `count` pull rounds, on the SSE2 backend when the token allows it.
///
/// The vectorized round stores words in native (little-endian) order, so it
/// only serves little-endian variants; everything else takes the scalar path.
#[inline]
pub(crate) fn pull<B: WordOrder>(
    state: &mut PanamaState,
    tokens: &Tokens,
    count: usize,
    sink: Sink<'_>,
) {
    cfg_if! {
        if #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(panama_force_soft)))] {
            if B::LITTLE_ENDIAN && tokens.get() {
                // SAFETY: the token confirmed SSE2 support at runtime.
                unsafe { simd::pull(state, count, sink) };
                return;
            }
        } else {
            let _ = tokens;
        }
    }
    soft::iterate::<B>(state, count, None, sink);
}
