//! Ashtakoota: eight-factor compatibility from two Moon placements.
//!
//! Each koota reads only the Moon's rashi and nakshatra of the two charts.
//! Maximum scores run 1 through 8, for a total of 36.

use serde::Serialize;

use crate::chart::ChartState;
use crate::graha::sign_lord;
use crate::graha_relationships::{NaisargikaMaitri, naisargika_maitri};

/// Maximum total across the eight kootas.
pub const ASHTAKOOTA_MAX_TOTAL: f64 = 36.0;

/// The eight kootas in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Koota {
    Varna,
    Vashya,
    Tara,
    Yoni,
    GrahaMaitri,
    Gana,
    Bhakoot,
    Nadi,
}

pub const ALL_KOOTAS: [Koota; 8] = [
    Koota::Varna,
    Koota::Vashya,
    Koota::Tara,
    Koota::Yoni,
    Koota::GrahaMaitri,
    Koota::Gana,
    Koota::Bhakoot,
    Koota::Nadi,
];

impl Koota {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Varna => "Varna",
            Self::Vashya => "Vashya",
            Self::Tara => "Tara",
            Self::Yoni => "Yoni",
            Self::GrahaMaitri => "Graha Maitri",
            Self::Gana => "Gana",
            Self::Bhakoot => "Bhakoot",
            Self::Nadi => "Nadi",
        }
    }

    pub const fn max_score(self) -> f64 {
        match self {
            Self::Varna => 1.0,
            Self::Vashya => 2.0,
            Self::Tara => 3.0,
            Self::Yoni => 4.0,
            Self::GrahaMaitri => 5.0,
            Self::Gana => 6.0,
            Self::Bhakoot => 7.0,
            Self::Nadi => 8.0,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Varna => "Spiritual compatibility by Moon-sign class",
            Self::Vashya => "Mutual attraction by Moon-sign group",
            Self::Tara => "Birth-star count and well-being",
            Self::Yoni => "Physical compatibility by nakshatra animal",
            Self::GrahaMaitri => "Friendship of the Moon-sign lords",
            Self::Gana => "Temperament by nakshatra class",
            Self::Bhakoot => "Moon-sign distance",
            Self::Nadi => "Constitution by nakshatra nadi",
        }
    }
}

/// One scored koota.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KootaScore {
    pub koota: Koota,
    pub category: &'static str,
    pub score: f64,
    pub max: f64,
    pub description: &'static str,
}

/// All eight kootas and their total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AshtakootaResult {
    pub items: [KootaScore; 8],
    pub total: f64,
    pub max_total: f64,
}

impl AshtakootaResult {
    pub fn get(&self, koota: Koota) -> &KootaScore {
        &self.items[koota as usize]
    }
}

/// The Moon placement a koota reads: rashi (0-11) and nakshatra (0-26).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoonPlacement {
    pub rashi: u8,
    pub nakshatra: u8,
}

impl MoonPlacement {
    pub fn new(rashi: u8, nakshatra: u8) -> Self {
        Self {
            rashi: rashi % 12,
            nakshatra: nakshatra % 27,
        }
    }

    pub fn from_chart(chart: &ChartState) -> Self {
        let moon = chart.moon();
        Self::new(moon.rashi.rashi_index, moon.nakshatra().nakshatra_index)
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Varna rank by rashi: Brahmin 4, Kshatriya 3, Vaishya 2, Shudra 1.
const VARNA_RANK: [u8; 12] = [3, 2, 1, 4, 3, 2, 1, 4, 3, 2, 1, 4];

/// Vashya group by rashi: 0 Chatushpada, 1 Manava, 2 Jalachara,
/// 3 Vanachara, 4 Keeta.
const VASHYA_GROUP: [usize; 12] = [0, 0, 1, 2, 3, 1, 1, 4, 0, 0, 1, 2];

const VASHYA_MATRIX: [[f64; 5]; 5] = [
    [2.0, 1.0, 1.0, 1.5, 1.0],
    [1.0, 2.0, 1.5, 0.0, 1.0],
    [1.0, 1.5, 2.0, 1.0, 1.0],
    [0.0, 0.0, 0.0, 2.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 2.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YoniAnimal {
    Horse,
    Elephant,
    Sheep,
    Serpent,
    Dog,
    Cat,
    Rat,
    Cow,
    Buffalo,
    Tiger,
    Deer,
    Monkey,
    Mongoose,
    Lion,
}

const YONI: [YoniAnimal; 27] = {
    use YoniAnimal::*;
    [
        Horse, Elephant, Sheep, Serpent, Serpent, Dog, Cat, Sheep, Cat, Rat, Rat, Cow, Buffalo,
        Tiger, Buffalo, Tiger, Deer, Deer, Dog, Monkey, Mongoose, Monkey, Lion, Horse, Lion, Cow,
        Elephant,
    ]
};

const YONI_ENEMIES: [(YoniAnimal, YoniAnimal); 6] = [
    (YoniAnimal::Cat, YoniAnimal::Rat),
    (YoniAnimal::Dog, YoniAnimal::Deer),
    (YoniAnimal::Lion, YoniAnimal::Elephant),
    (YoniAnimal::Serpent, YoniAnimal::Mongoose),
    (YoniAnimal::Monkey, YoniAnimal::Sheep),
    (YoniAnimal::Tiger, YoniAnimal::Cow),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gana {
    Deva,
    Manushya,
    Rakshasa,
}

const GANA: [Gana; 27] = {
    use Gana::*;
    [
        Deva, Manushya, Rakshasa, Manushya, Deva, Manushya, Deva, Deva, Rakshasa, Rakshasa,
        Manushya, Deva, Deva, Manushya, Deva, Manushya, Deva, Manushya, Rakshasa, Manushya, Deva,
        Deva, Manushya, Manushya, Manushya, Deva, Deva,
    ]
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nadi {
    Aadi,
    Madhya,
    Antya,
}

const NADI: [Nadi; 27] = {
    use Nadi::*;
    [
        Aadi, Madhya, Antya, Antya, Madhya, Aadi, Aadi, Madhya, Antya, Antya, Madhya, Aadi, Aadi,
        Madhya, Antya, Antya, Madhya, Aadi, Aadi, Madhya, Antya, Aadi, Madhya, Aadi, Madhya,
        Antya, Antya,
    ]
};

pub fn yoni_animal(nakshatra: u8) -> YoniAnimal {
    YONI[usize::from(nakshatra % 27)]
}

pub fn gana(nakshatra: u8) -> Gana {
    GANA[usize::from(nakshatra % 27)]
}

pub fn nadi(nakshatra: u8) -> Nadi {
    NADI[usize::from(nakshatra % 27)]
}

// ---------------------------------------------------------------------------
// Kootas
// ---------------------------------------------------------------------------

pub fn varna_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    let rank_a = VARNA_RANK[usize::from(a.rashi)];
    let rank_b = VARNA_RANK[usize::from(b.rashi)];
    let one_way = |x: u8, y: u8| if y >= x { 1.0 } else { 0.0 };
    (one_way(rank_a, rank_b) + one_way(rank_b, rank_a)) / 2.0
}

pub fn vashya_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    let ga = VASHYA_GROUP[usize::from(a.rashi)];
    let gb = VASHYA_GROUP[usize::from(b.rashi)];
    ((VASHYA_MATRIX[ga][gb] + VASHYA_MATRIX[gb][ga]) / 2.0).min(2.0)
}

fn tara_one_way(from: u8, to: u8) -> f64 {
    let count = (i16::from(to) - i16::from(from)).rem_euclid(27) + 1;
    if matches!(count % 9, 3 | 5 | 7) { 0.0 } else { 3.0 }
}

pub fn tara_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    (tara_one_way(a.nakshatra, b.nakshatra) + tara_one_way(b.nakshatra, a.nakshatra)) / 2.0
}

pub fn yoni_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    let ya = yoni_animal(a.nakshatra);
    let yb = yoni_animal(b.nakshatra);
    if ya == yb {
        4.0
    } else if YONI_ENEMIES
        .iter()
        .any(|&(x, y)| (x == ya && y == yb) || (x == yb && y == ya))
    {
        0.0
    } else {
        3.0
    }
}

/// No graha is its own friend, so two signs of the same lord score 3.
pub fn graha_maitri_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    let (la, lb) = (sign_lord(a.rashi), sign_lord(b.rashi));
    match (naisargika_maitri(la, lb), naisargika_maitri(lb, la)) {
        (NaisargikaMaitri::Friend, NaisargikaMaitri::Friend) => 5.0,
        (NaisargikaMaitri::Enemy, NaisargikaMaitri::Enemy) => 0.0,
        _ => 3.0,
    }
}

pub fn gana_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    use Gana::*;
    match (gana(a.nakshatra), gana(b.nakshatra)) {
        (x, y) if x == y => 6.0,
        (Deva, Manushya) | (Manushya, Deva) => 5.0,
        (Manushya, Rakshasa) | (Rakshasa, Manushya) => 3.0,
        _ => 1.0,
    }
}

pub fn bhakoot_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    let distance = (i16::from(b.rashi) - i16::from(a.rashi)).rem_euclid(12) + 1;
    if matches!(distance, 2 | 12 | 5 | 9 | 6 | 8) {
        0.0
    } else {
        7.0
    }
}

pub fn nadi_score(a: MoonPlacement, b: MoonPlacement) -> f64 {
    if nadi(a.nakshatra) == nadi(b.nakshatra) {
        0.0
    } else {
        8.0
    }
}

pub fn koota_score(koota: Koota, a: MoonPlacement, b: MoonPlacement) -> f64 {
    match koota {
        Koota::Varna => varna_score(a, b),
        Koota::Vashya => vashya_score(a, b),
        Koota::Tara => tara_score(a, b),
        Koota::Yoni => yoni_score(a, b),
        Koota::GrahaMaitri => graha_maitri_score(a, b),
        Koota::Gana => gana_score(a, b),
        Koota::Bhakoot => bhakoot_score(a, b),
        Koota::Nadi => nadi_score(a, b),
    }
}

/// Score all eight kootas for two Moon placements.
pub fn ashtakoota(a: MoonPlacement, b: MoonPlacement) -> AshtakootaResult {
    let items = ALL_KOOTAS.map(|k| KootaScore {
        koota: k,
        category: k.name(),
        score: koota_score(k, a, b),
        max: k.max_score(),
        description: k.description(),
    });
    AshtakootaResult {
        total: items.iter().map(|i| i.score).sum(),
        items,
        max_total: ASHTAKOOTA_MAX_TOTAL,
    }
}

/// Ashtakoota for two built charts.
pub fn compute_compatibility(chart_a: &ChartState, chart_b: &ChartState) -> AshtakootaResult {
    ashtakoota(MoonPlacement::from_chart(chart_a), MoonPlacement::from_chart(chart_b))
}
