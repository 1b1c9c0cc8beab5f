//! WLAN descriptors: the BSS an agent controls.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::frame::BssIdentity;
use crate::stable_hash::stable_hash64;

/// One WLAN: an access point, its stations and its spatial-reuse identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wlan {
    pub wlan_id: u32,
    pub wlan_code: String,
    pub ap_id: u32,
    /// Station ids, AP excluded.
    #[serde(default)]
    pub sta_ids: Vec<u32>,
    #[serde(default)]
    pub spatial_reuse_enabled: bool,
    #[serde(default)]
    pub bss: BssIdentity,
}

impl Wlan {
    pub fn num_stas(&self) -> usize {
        self.sta_ids.len()
    }

    pub fn contains_sta(&self, sta_id: u32) -> bool {
        self.sta_ids.contains(&sta_id)
    }

    /// Uniformly random station, or `None` if the WLAN has none.
    pub fn pick_random_sta<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u32> {
        if self.sta_ids.is_empty() {
            return None;
        }
        Some(self.sta_ids[rng.random_range(0..self.sta_ids.len())])
    }

    /// Reproducible RNG seed for this WLAN's agent, keyed by its code.
    pub fn agent_seed(&self, base_seed: u64) -> u64 {
        stable_hash64(base_seed, &self.wlan_code)
    }
}

impl fmt::Display for Wlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WLAN {}:", self.wlan_code)?;
        writeln!(f, "  wlan_id: {}", self.wlan_id)?;
        writeln!(f, "  num_stas: {}", self.num_stas())?;
        writeln!(f, "  ap_id: {}", self.ap_id)?;
        let stas: Vec<String> = self.sta_ids.iter().map(u32::to_string).collect();
        write!(f, "  list of STAs IDs: {}", stas.join("  "))
    }
}

/// Round-robin cursor owned by whoever is cycling through a list.
///
/// Each consumer keeps its own cursor, so independent lists never disturb
/// each other's position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobin {
    next: usize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next item in cyclic order, or `None` if `items` is empty.
    ///
    /// If the list shrank since the last call the cursor wraps.
    pub fn next_in<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let ix = self.next % items.len();
        self.next = (ix + 1) % items.len();
        items.get(ix)
    }
}
