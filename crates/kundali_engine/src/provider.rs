//! The ephemeris provider seam.
//!
//! Chart scoring never evaluates an ephemeris itself; every tropical value
//! comes through [`EphemerisProvider`]. Implementations must be deterministic
//! and safe to share across scan worker threads.

use kundali_base::{
    AyanamshaSystem, Graha, KundaliError, PROVIDER_GRAHAS, RawPosition, RawPositions,
};
use log::debug;

use crate::error::ProviderError;

/// Source of tropical positions, ascendant and ayanamsha.
pub trait EphemerisProvider: Sync {
    /// Tropical longitude (deg, [0, 360)) and daily speed of a graha at
    /// `jd_ut`. Only [`PROVIDER_GRAHAS`] are asked for; Ketu is derived.
    fn position(&self, jd_ut: f64, graha: Graha) -> Result<RawPosition, ProviderError>;

    /// Tropical ascendant longitude for a geographic location, degrees.
    fn ascendant(&self, jd_ut: f64, latitude: f64, longitude: f64) -> Result<f64, ProviderError>;

    /// Ayanamsha correction for `system` at `jd_ut`, degrees.
    fn ayanamsha(&self, jd_ut: f64, system: AyanamshaSystem) -> Result<f64, ProviderError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn position(&self, jd_ut: f64, graha: Graha) -> Result<RawPosition, ProviderError> {
        (**self).position(jd_ut, graha)
    }

    fn ascendant(&self, jd_ut: f64, latitude: f64, longitude: f64) -> Result<f64, ProviderError> {
        (**self).ascendant(jd_ut, latitude, longitude)
    }

    fn ayanamsha(&self, jd_ut: f64, system: AyanamshaSystem) -> Result<f64, ProviderError> {
        (**self).ayanamsha(jd_ut, system)
    }
}

/// Everything a chart needs from the provider for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderSnapshot {
    pub positions: RawPositions,
    pub ascendant_tropical: f64,
    pub ayanamsha: f64,
}

/// Query all eight provider grahas at `jd_ut`.
pub fn raw_positions<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_ut: f64,
) -> Result<RawPositions, KundaliError> {
    let mut grahas = [RawPosition::default(); 8];
    for g in PROVIDER_GRAHAS {
        grahas[g.index() as usize] = provider.position(jd_ut, g)?;
    }
    Ok(RawPositions::new(grahas))
}

/// Query positions, ascendant and ayanamsha for one instant and place.
///
/// The first provider failure aborts the whole snapshot.
pub fn snapshot<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_ut: f64,
    latitude: f64,
    longitude: f64,
    system: AyanamshaSystem,
) -> Result<ProviderSnapshot, KundaliError> {
    let positions = raw_positions(provider, jd_ut)?;
    let ascendant_tropical = provider.ascendant(jd_ut, latitude, longitude)?;
    let ayanamsha = provider.ayanamsha(jd_ut, system)?;
    debug!("provider snapshot at JD {jd_ut}: asc={ascendant_tropical:.4}, aya={ayanamsha:.4} ({system})");
    Ok(ProviderSnapshot {
        positions,
        ascendant_tropical,
        ayanamsha,
    })
}
