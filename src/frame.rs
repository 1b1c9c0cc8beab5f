//! Frame origin classification.
//!
//! A received frame carries its transmitter's BSS color and spatial-reuse
//! group. Comparing those against the observer's own assignment tells whether
//! the frame is intra-BSS or comes from an overlapping BSS (OBSS), and whether
//! that OBSS shares a spatial-reuse group (SRG) with us.
//!
//! Non-positive colors and group ids mean "unassigned" and never match.

use serde::{Deserialize, Serialize};

/// Transmitter identity carried in a received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxInfo {
    pub bss_color: i32,
    pub spatial_reuse_group: i32,
}

/// Intra- vs inter-BSS origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOrigin {
    IntraBss,
    InterBss,
}

/// Intra-BSS iff the colors match and our color is assigned (> 0).
pub fn classify_origin(tx: &TxInfo, own_bss_color: i32) -> FrameOrigin {
    if own_bss_color > 0 && tx.bss_color == own_bss_color {
        FrameOrigin::IntraBss
    } else {
        FrameOrigin::InterBss
    }
}

/// Whether the frame's SRG matches ours; an unassigned group (<= 0) never does.
pub fn is_same_spatial_reuse_group(tx: &TxInfo, own_srg: i32) -> bool {
    own_srg > 0 && tx.spatial_reuse_group == own_srg
}

/// Which OBSS_PD policy governs a received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterferenceClass {
    /// Our own BSS; no OBSS_PD threshold applies.
    IntraBss,
    /// Overlapping BSS in our SRG; SRG OBSS_PD applies.
    SrgObss,
    /// Any other overlapping BSS; non-SRG OBSS_PD applies.
    NonSrgObss,
}

/// An agent's own BSS color and spatial-reuse group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BssIdentity {
    pub bss_color: i32,
    pub spatial_reuse_group: i32,
}

impl BssIdentity {
    pub fn new(bss_color: i32, spatial_reuse_group: i32) -> Self {
        Self {
            bss_color,
            spatial_reuse_group,
        }
    }

    pub fn origin_of(&self, tx: &TxInfo) -> FrameOrigin {
        classify_origin(tx, self.bss_color)
    }

    pub fn shares_srg_with(&self, tx: &TxInfo) -> bool {
        is_same_spatial_reuse_group(tx, self.spatial_reuse_group)
    }

    pub fn interference_class(&self, tx: &TxInfo) -> InterferenceClass {
        match self.origin_of(tx) {
            FrameOrigin::IntraBss => InterferenceClass::IntraBss,
            FrameOrigin::InterBss if self.shares_srg_with(tx) => InterferenceClass::SrgObss,
            FrameOrigin::InterBss => InterferenceClass::NonSrgObss,
        }
    }

    /// The transmitter info this BSS stamps on its own frames.
    pub fn tx_info(&self) -> TxInfo {
        TxInfo {
            bss_color: self.bss_color,
            spatial_reuse_group: self.spatial_reuse_group,
        }
    }
}
