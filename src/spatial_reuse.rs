//! IEEE 802.11ax spatial-reuse legality checks.
//!
//! Four independent predicates decide whether a candidate sensitivity or
//! power level is allowed. Inputs are linear powers in picowatts; unless
//! noted, comparisons happen after conversion to dBm.
//!
//! The free functions are pure. [`SpatialReuseParams`] bundles one
//! configuration of all three OBSS_PD policies and dispatches by
//! [`InterferenceClass`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::InterferenceClass;
use crate::power::pw_to_dbm;

/// Offsets are expressed relative to this level.
pub const OBSS_PD_OFFSET_BASE_DBM: f64 = -82.0;
/// No offset-derived OBSS_PD level may exceed this.
pub const OBSS_PD_CEILING_DBM: f64 = -62.0;

/// Generic OBSS_PD check with transmit-power adjustment.
///
/// The reference level is `dBm(min) + (dBm(tx_power_ref) - dBm(tx_power))`
/// clamped into `[dBm(min), dBm(max)]`; the level is legal iff
/// `dBm(current)` does not exceed it.
pub fn check_obss_pd(current: f64, min: f64, max: f64, tx_power_ref: f64, tx_power: f64) -> bool {
    let min_dbm = pw_to_dbm(min);
    let max_dbm = pw_to_dbm(max);
    let adjusted = min_dbm + (pw_to_dbm(tx_power_ref) - pw_to_dbm(tx_power));
    let ref_dbm = min_dbm.max(max_dbm.min(adjusted));
    pw_to_dbm(current) <= ref_dbm
}

/// SRG OBSS_PD check. All of the following must hold:
///
/// - `dBm(min_offset) - 82` lies in `[-82, -62]`
/// - `dBm(min_offset) <= dBm(max_offset)`
/// - `dBm(max_offset) - 82 <= -62`
/// - `dBm(current)` lies in `[dBm(min), dBm(max)]`
pub fn check_srg_obss_pd(current: f64, min: f64, max: f64, min_offset: f64, max_offset: f64) -> bool {
    let min_offset_dbm = pw_to_dbm(min_offset);
    let max_offset_dbm = pw_to_dbm(max_offset);
    let min_level = min_offset_dbm + OBSS_PD_OFFSET_BASE_DBM;
    let max_level = max_offset_dbm + OBSS_PD_OFFSET_BASE_DBM;
    let current_dbm = pw_to_dbm(current);

    (OBSS_PD_OFFSET_BASE_DBM..=OBSS_PD_CEILING_DBM).contains(&min_level)
        && min_offset_dbm <= max_offset_dbm
        && max_level <= OBSS_PD_CEILING_DBM
        && current_dbm >= pw_to_dbm(min)
        && current_dbm <= pw_to_dbm(max)
}

/// Non-SRG OBSS_PD check.
///
/// The offset ordering and the `[min, max]` range are compared in linear
/// units; only the ceiling check converts to dBm.
pub fn check_non_srg_obss_pd(
    current: f64,
    min: f64,
    max: f64,
    max_offset: f64,
    srg_max_offset: f64,
) -> bool {
    max_offset <= srg_max_offset
        && pw_to_dbm(max_offset) + OBSS_PD_OFFSET_BASE_DBM <= OBSS_PD_CEILING_DBM
        && current >= min
        && current <= max
}

/// Whether `current` is already at or below `min`, i.e. unconstrained.
///
/// `_max` is accepted for call-site symmetry with the other checks.
pub fn check_power_constraint(current: f64, min: f64, _max: f64) -> bool {
    current <= min
}

/// Parameters of the generic OBSS_PD policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObssPdParams {
    pub obss_pd_min: f64,
    pub obss_pd_max: f64,
    pub tx_power_ref: f64,
    pub tx_power: f64,
}

impl ObssPdParams {
    pub fn permits(&self, current: f64) -> bool {
        check_obss_pd(
            current,
            self.obss_pd_min,
            self.obss_pd_max,
            self.tx_power_ref,
            self.tx_power,
        )
    }
}

/// Parameters of the SRG OBSS_PD policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SrgObssPdParams {
    pub srg_obss_pd_min: f64,
    pub srg_obss_pd_max: f64,
    pub srg_obss_pd_min_offset: f64,
    pub srg_obss_pd_max_offset: f64,
}

impl SrgObssPdParams {
    pub fn permits(&self, current: f64) -> bool {
        check_srg_obss_pd(
            current,
            self.srg_obss_pd_min,
            self.srg_obss_pd_max,
            self.srg_obss_pd_min_offset,
            self.srg_obss_pd_max_offset,
        )
    }
}

/// Parameters of the non-SRG OBSS_PD policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NonSrgObssPdParams {
    pub non_srg_obss_pd_min: f64,
    pub non_srg_obss_pd_max: f64,
    pub non_srg_obss_pd_max_offset: f64,
}

impl NonSrgObssPdParams {
    /// `srg_max_offset` comes from the SRG policy of the same BSS.
    pub fn permits(&self, current: f64, srg_max_offset: f64) -> bool {
        check_non_srg_obss_pd(
            current,
            self.non_srg_obss_pd_min,
            self.non_srg_obss_pd_max,
            self.non_srg_obss_pd_max_offset,
            srg_max_offset,
        )
    }
}

/// All spatial-reuse policies configured for one BSS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialReuseParams {
    pub obss_pd: ObssPdParams,
    pub srg: SrgObssPdParams,
    pub non_srg: NonSrgObssPdParams,
}

impl SpatialReuseParams {
    /// Check `level` against the policy governing frames of `class`.
    ///
    /// Returns `None` for intra-BSS frames, which no OBSS_PD threshold covers.
    pub fn permits(&self, class: InterferenceClass, level: f64) -> Option<bool> {
        let legal = match class {
            InterferenceClass::IntraBss => return None,
            InterferenceClass::SrgObss => self.srg.permits(level),
            InterferenceClass::NonSrgObss => self
                .non_srg
                .permits(level, self.srg.srg_obss_pd_max_offset),
        };
        if !legal {
            debug!(?class, level_dbm = pw_to_dbm(level), "OBSS_PD level rejected");
        }
        Some(legal)
    }

    /// Generic OBSS_PD check with this BSS's transmit powers.
    pub fn permits_obss_pd(&self, level: f64) -> bool {
        let legal = self.obss_pd.permits(level);
        if !legal {
            debug!(level_dbm = pw_to_dbm(level), "generic OBSS_PD level rejected");
        }
        legal
    }

    /// Keep only the candidate levels legal for `class`, preserving order.
    ///
    /// Intra-BSS frames constrain nothing, so every index is kept.
    pub fn legal_indices(&self, class: InterferenceClass, levels: &[f64]) -> Vec<usize> {
        levels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| self.permits(class, l).unwrap_or(true))
            .map(|(i, _)| i)
            .collect()
    }
}
