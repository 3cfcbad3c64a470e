/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Morgan-Keenan-style stellar spectral type: encoding, decoding,
//! rendering, parsing, and color derivation.
//!
//! `StellarClass` is a tagged variant rather than a flat record with
//! per-field interpretation rules, so the invariants documented on each
//! variant (e.g. a `BlackHole` carries no spectral/subclass/luminosity
//! data at all) are unrepresentable-if-violated instead of merely
//! asserted.

mod color;
mod pack;
mod parse;
mod render;

use snafu::Snafu;
use std::cmp::Ordering;

/// A star's spectral subclass, 0..=9, or [`None`] for the Unknown sentinel.
pub type Subclass = Option<u8>;

/// Spectral class for a [`StellarClass::Normal`] star.
///
/// `Wo` (Wolf-Rayet oxygen) is deliberately left outside the 0..=16 range
/// covered by the canonical render table: it was appended to the
/// classification after that table was fixed, so it renders through the
/// table's fallback slot instead of getting its own letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NormalSpectral {
    O = 0,
    B = 1,
    A = 2,
    F = 3,
    G = 4,
    K = 5,
    M = 6,
    R = 7,
    S = 8,
    N = 9,
    Wc = 10,
    Wn = 11,
    /// Reserved placeholder slot in the canonical letter table.
    Unknown = 12,
    L = 13,
    T = 14,
    Y = 15,
    C = 16,
    Wo = 17,
}

/// Spectral class for a [`StellarClass::WhiteDwarf`] star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WhiteDwarfSpectral {
    D = 0,
    Da = 1,
    Db = 2,
    Dc = 3,
    Do = 4,
    Dq = 5,
    Dx = 6,
    Dz = 7,
}

pub(crate) const WD_CLASS_COUNT: u8 = 8;

/// Spectral class for a [`StellarClass::NeutronStar`] star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NeutronStarSpectral {
    Q = 0,
    Qn = 1,
    Qp = 2,
    Qm = 3,
}

pub(crate) const NEUTRON_STAR_CLASS_COUNT: u8 = 4;

/// Roman-numeral luminosity class, or Unknown for non-normal stars and
/// unclassified normal stars alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LuminosityClass {
    Ia0 = 0,
    Ia = 1,
    Ib = 2,
    Ii = 3,
    Iii = 4,
    Iv = 5,
    V = 6,
    Vi = 7,
    Unknown = 8,
}

/// A star's Morgan-Keenan-style classification.
///
/// Equality and ordering are defined by the V2 packed representation:
/// two values compare equal iff `pack_v2` agrees, which canonicalizes
/// fields that a variant forces to Unknown.
#[derive(Debug, Clone, Copy)]
pub enum StellarClass {
    Normal {
        spectral: NormalSpectral,
        subclass: Subclass,
        luminosity: LuminosityClass,
    },
    WhiteDwarf {
        spectral: WhiteDwarfSpectral,
        subclass: Subclass,
    },
    NeutronStar {
        spectral: NeutronStarSpectral,
        subclass: Subclass,
    },
    BlackHole,
}

impl PartialEq for StellarClass {
    fn eq(&self, other: &Self) -> bool {
        self.pack_v2() == other.pack_v2()
    }
}

impl Eq for StellarClass {}

impl PartialOrd for StellarClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StellarClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pack_v2().cmp(&other.pack_v2())
    }
}

impl std::hash::Hash for StellarClass {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pack_v2().hash(state);
    }
}

/// Raised when unpacking a 16-bit wire value encounters a reserved or
/// out-of-range field.
#[derive(Debug, Snafu, PartialEq, Eq, Clone, Copy)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("unpack received a reserved star type value {value}"))]
    ReservedStarType { value: u8 },
    #[snafu(display(
        "white dwarf spectral field {value} is not below the class count {count}"
    ))]
    WhiteDwarfOutOfRange { value: u8, count: u8 },
    #[snafu(display(
        "neutron star spectral field {value} is not below the class count {count}"
    ))]
    NeutronStarOutOfRange { value: u8, count: u8 },
}

pub use color::get_apparent_color;
pub use parse::parse;
