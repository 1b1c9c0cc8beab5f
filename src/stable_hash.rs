//! Deterministic seed derivation for per-agent RNG streams.
//!
//! Agents are deterministic by default: when no seed is configured, each
//! agent's RNG is seeded from its id so that a re-run of the same scenario
//! reproduces the same decisions, while different agents still draw
//! independent-looking streams. Not cryptographic.

/// Seed for agent `agent_id` derived from a run-wide `base_seed`.
#[must_use]
pub fn agent_seed(base_seed: u64, agent_id: u32) -> u64 {
    splitmix64(base_seed ^ u64::from(agent_id).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Seed derived from a textual key (e.g. a WLAN code).
///
/// FNV-1a over the bytes, then a SplitMix64 finalizer for diffusion.
#[must_use]
pub fn stable_hash64(seed: u64, s: &str) -> u64 {
    let mut h: u64 = 0xCBF2_9CE4_8422_2325;
    for b in s.as_bytes() {
        h ^= u64::from(*b);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    splitmix64(seed ^ h)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
