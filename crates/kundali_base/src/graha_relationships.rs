//! Graha dignity and classification tables.
//!
//! Exaltation/debilitation, own signs, moolatrikona ranges, natural
//! (naisargika) friendship, benefic/malefic nature and gender.

use serde::Serialize;

use crate::graha::{Graha, sign_lord};
use crate::util::{degrees_in_sign, sign_index};

// ---------------------------------------------------------------------------
// Exaltation / debilitation
// ---------------------------------------------------------------------------

/// Exaltation rashi (0-based). Rahu is exalted in Vrishabha, Ketu in Vrischika.
pub const fn exaltation_rashi(graha: Graha) -> u8 {
    match graha {
        Graha::Surya => 0,
        Graha::Chandra => 1,
        Graha::Mangal => 9,
        Graha::Buddh => 5,
        Graha::Guru => 3,
        Graha::Shukra => 11,
        Graha::Shani => 6,
        Graha::Rahu => 1,
        Graha::Ketu => 7,
    }
}

/// Debilitation rashi: the sign opposite exaltation.
pub const fn debilitation_rashi(graha: Graha) -> u8 {
    (exaltation_rashi(graha) + 6) % 12
}

/// Deepest debilitation point in sidereal degrees. None for the nodes.
pub const fn debilitation_point(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya => Some(190.0),
        Graha::Chandra => Some(213.0),
        Graha::Mangal => Some(118.0),
        Graha::Buddh => Some(345.0),
        Graha::Guru => Some(275.0),
        Graha::Shukra => Some(177.0),
        Graha::Shani => Some(20.0),
        Graha::Rahu | Graha::Ketu => None,
    }
}

// ---------------------------------------------------------------------------
// Own signs and moolatrikona
// ---------------------------------------------------------------------------

/// Signs owned by a graha (0-based). The nodes are given Kumbha and Vrischika.
pub fn own_signs(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya => &[4],
        Graha::Chandra => &[3],
        Graha::Mangal => &[0, 7],
        Graha::Buddh => &[2, 5],
        Graha::Guru => &[8, 11],
        Graha::Shukra => &[1, 6],
        Graha::Shani => &[9, 10],
        Graha::Rahu => &[10],
        Graha::Ketu => &[7],
    }
}

/// Moolatrikona as (rashi, start_deg, end_deg), both ends inclusive.
pub const fn moolatrikona_range(graha: Graha) -> Option<(u8, f64, f64)> {
    match graha {
        Graha::Surya => Some((4, 0.0, 20.0)),
        Graha::Chandra => Some((1, 4.0, 30.0)),
        Graha::Mangal => Some((0, 0.0, 12.0)),
        Graha::Buddh => Some((5, 16.0, 20.0)),
        Graha::Guru => Some((8, 0.0, 10.0)),
        Graha::Shukra => Some((6, 0.0, 15.0)),
        Graha::Shani => Some((10, 0.0, 20.0)),
        Graha::Rahu | Graha::Ketu => None,
    }
}

pub fn is_moolatrikona(graha: Graha, sidereal_lon: f64) -> bool {
    let Some((rashi, start, end)) = moolatrikona_range(graha) else {
        return false;
    };
    if sign_index(sidereal_lon) != rashi {
        return false;
    }
    let deg = degrees_in_sign(sidereal_lon);
    deg >= start && deg <= end
}

// ---------------------------------------------------------------------------
// Natural friendship
// ---------------------------------------------------------------------------

/// Natural (permanent) relationship of one graha toward another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NaisargikaMaitri {
    Friend,
    Enemy,
    Neutral,
}

/// How `graha` regards `other`. Rahu has friends and enemies of its own;
/// Ketu regards every graha as neutral. Self-relationship is neutral.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    use Graha::*;
    use NaisargikaMaitri::*;

    match (graha, other) {
        (Surya, Chandra | Mangal | Guru) => Friend,
        (Surya, Shukra | Shani) => Enemy,

        (Chandra, Surya | Buddh) => Friend,

        (Mangal, Surya | Chandra | Guru) => Friend,
        (Mangal, Buddh) => Enemy,

        (Buddh, Surya | Shukra) => Friend,
        (Buddh, Chandra) => Enemy,

        (Guru, Surya | Chandra | Mangal) => Friend,
        (Guru, Buddh | Shukra) => Enemy,

        (Shukra, Buddh | Shani) => Friend,
        (Shukra, Surya | Chandra) => Enemy,

        (Shani, Buddh | Shukra) => Friend,
        (Shani, Surya | Chandra | Mangal) => Enemy,

        (Rahu, Buddh | Shukra | Shani) => Friend,
        (Rahu, Surya | Chandra | Mangal) => Enemy,

        _ => Neutral,
    }
}

/// Relationship of a graha to a sign, resolved through the sign's lord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignRelationship {
    Own,
    Friend,
    Neutral,
    Enemy,
}

pub fn sign_relationship(graha: Graha, rashi_index: u8) -> SignRelationship {
    if own_signs(graha).contains(&(rashi_index % 12)) {
        return SignRelationship::Own;
    }
    let lord = sign_lord(rashi_index);
    if lord == graha {
        return SignRelationship::Own;
    }
    match naisargika_maitri(graha, lord) {
        NaisargikaMaitri::Friend => SignRelationship::Friend,
        NaisargikaMaitri::Enemy => SignRelationship::Enemy,
        NaisargikaMaitri::Neutral => SignRelationship::Neutral,
    }
}

// ---------------------------------------------------------------------------
// Benefic / malefic and gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Natural nature: Jupiter, Venus, Mercury and Moon are benefic.
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Guru | Graha::Shukra | Graha::Buddh | Graha::Chandra => BeneficNature::Benefic,
        _ => BeneficNature::Malefic,
    }
}

pub const fn is_benefic(graha: Graha) -> bool {
    matches!(natural_benefic_malefic(graha), BeneficNature::Benefic)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrahaGender {
    Male,
    Neutral,
    Female,
}

/// Gender of the seven classical grahas. None for the nodes.
pub const fn graha_gender(graha: Graha) -> Option<GrahaGender> {
    match graha {
        Graha::Surya | Graha::Mangal | Graha::Guru => Some(GrahaGender::Male),
        Graha::Buddh | Graha::Shani => Some(GrahaGender::Neutral),
        Graha::Chandra | Graha::Shukra => Some(GrahaGender::Female),
        Graha::Rahu | Graha::Ketu => None,
    }
}
