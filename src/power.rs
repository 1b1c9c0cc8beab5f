//! Linear ⇄ logarithmic power conversions.
//!
//! Linear power in this crate is expressed in picowatts, the resolution the
//! simulator works at. `1 mW = 1e9 pW`, so `0 dBm = 1e9 pW`.
//!
//! Non-positive linear inputs follow IEEE float semantics (`-inf` for zero,
//! NaN for negatives); callers pass well-formed magnitudes.

const PW_PER_MW: f64 = 1.0e9;

/// Picowatts to dBm.
#[inline]
pub fn pw_to_dbm(pw: f64) -> f64 {
    10.0 * (pw / PW_PER_MW).log10()
}

/// dBm to picowatts.
#[inline]
pub fn dbm_to_pw(dbm: f64) -> f64 {
    PW_PER_MW * 10f64.powf(dbm / 10.0)
}

/// Milliwatts to dBm.
#[inline]
pub fn mw_to_dbm(mw: f64) -> f64 {
    10.0 * mw.log10()
}

/// dBm to milliwatts.
#[inline]
pub fn dbm_to_mw(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0)
}
