/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Packing to and from the two 16-bit wire representations: V2 (current)
//! and V1 (legacy, predates the `Y` brown-dwarf class).

use super::{
    DecodeError, LuminosityClass, NeutronStarSpectral, NeutronStarOutOfRangeSnafu,
    NormalSpectral, ReservedStarTypeSnafu, StellarClass, Subclass, WhiteDwarfOutOfRangeSnafu,
    WhiteDwarfSpectral, NEUTRON_STAR_CLASS_COUNT, WD_CLASS_COUNT,
};

const STAR_TYPE_NORMAL: u16 = 0;
const STAR_TYPE_WHITE_DWARF: u16 = 1;
const STAR_TYPE_NEUTRON_STAR: u16 = 2;
const STAR_TYPE_BLACK_HOLE: u16 = 3;

/// Subclass sentinel used in both wire forms: digits pack as themselves,
/// Unknown packs as 0xF (out of the valid 0..=9 digit range).
const SUBCLASS_UNKNOWN_FIELD: u16 = 0xF;

fn encode_subclass(subclass: Subclass) -> u16 {
    match subclass {
        Some(d) => (d as u16) & 0xF,
        None => SUBCLASS_UNKNOWN_FIELD,
    }
}

fn decode_subclass(field: u8) -> Subclass {
    if field <= 9 {
        Some(field)
    } else {
        None
    }
}

fn normal_from_ordinal(ord: u8) -> NormalSpectral {
    match ord {
        0 => NormalSpectral::O,
        1 => NormalSpectral::B,
        2 => NormalSpectral::A,
        3 => NormalSpectral::F,
        4 => NormalSpectral::G,
        5 => NormalSpectral::K,
        6 => NormalSpectral::M,
        7 => NormalSpectral::R,
        8 => NormalSpectral::S,
        9 => NormalSpectral::N,
        10 => NormalSpectral::Wc,
        11 => NormalSpectral::Wn,
        13 => NormalSpectral::L,
        14 => NormalSpectral::T,
        15 => NormalSpectral::Y,
        16 => NormalSpectral::C,
        17 => NormalSpectral::Wo,
        _ => NormalSpectral::Unknown,
    }
}

fn white_dwarf_from_ordinal(ord: u8) -> WhiteDwarfSpectral {
    match ord {
        0 => WhiteDwarfSpectral::D,
        1 => WhiteDwarfSpectral::Da,
        2 => WhiteDwarfSpectral::Db,
        3 => WhiteDwarfSpectral::Dc,
        4 => WhiteDwarfSpectral::Do,
        5 => WhiteDwarfSpectral::Dq,
        6 => WhiteDwarfSpectral::Dx,
        _ => WhiteDwarfSpectral::Dz,
    }
}

fn neutron_star_from_ordinal(ord: u8) -> NeutronStarSpectral {
    match ord {
        0 => NeutronStarSpectral::Q,
        1 => NeutronStarSpectral::Qn,
        2 => NeutronStarSpectral::Qp,
        _ => NeutronStarSpectral::Qm,
    }
}

fn luminosity_from_ordinal(ord: u8) -> LuminosityClass {
    match ord {
        0 => LuminosityClass::Ia0,
        1 => LuminosityClass::Ia,
        2 => LuminosityClass::Ib,
        3 => LuminosityClass::Ii,
        4 => LuminosityClass::Iii,
        5 => LuminosityClass::Iv,
        6 => LuminosityClass::V,
        7 => LuminosityClass::Vi,
        _ => LuminosityClass::Unknown,
    }
}

impl StellarClass {
    /// Packs this value into the current 16-bit wire representation.
    /// Infallible: every representable value has a V2 encoding.
    pub fn pack_v2(&self) -> u16 {
        let (star_type, spectral, subclass, luminosity) = match self {
            StellarClass::Normal {
                spectral,
                subclass,
                luminosity,
            } => (
                STAR_TYPE_NORMAL,
                *spectral as u16,
                encode_subclass(*subclass),
                *luminosity as u16,
            ),
            StellarClass::WhiteDwarf { spectral, subclass } => (
                STAR_TYPE_WHITE_DWARF,
                // Packed densely starting at 0; this crate's WhiteDwarf
                // discriminants are already 0-based, so no further shift
                // is needed to achieve that density.
                *spectral as u16,
                encode_subclass(*subclass),
                LuminosityClass::Unknown as u16,
            ),
            StellarClass::NeutronStar { spectral, subclass } => (
                STAR_TYPE_NEUTRON_STAR,
                *spectral as u16,
                encode_subclass(*subclass),
                LuminosityClass::Unknown as u16,
            ),
            StellarClass::BlackHole => (
                STAR_TYPE_BLACK_HOLE,
                0,
                encode_subclass(None),
                LuminosityClass::Unknown as u16,
            ),
        };

        (star_type & 0x7) << 13 | (spectral & 0x1F) << 8 | (subclass & 0xF) << 4 | (luminosity & 0xF)
    }

    /// Unpacks a current-version 16-bit wire value.
    pub fn unpack_v2(bits: u16) -> Result<Self, DecodeError> {
        let star_type = (bits >> 13) & 0x7;
        let spectral_field = ((bits >> 8) & 0x1F) as u8;
        let subclass_field = ((bits >> 4) & 0xF) as u8;
        let luminosity_field = (bits & 0xF) as u8;

        match star_type {
            STAR_TYPE_NORMAL => Ok(StellarClass::Normal {
                spectral: normal_from_ordinal(spectral_field),
                subclass: decode_subclass(subclass_field),
                luminosity: luminosity_from_ordinal(luminosity_field),
            }),
            STAR_TYPE_WHITE_DWARF => {
                if spectral_field >= WD_CLASS_COUNT {
                    return WhiteDwarfOutOfRangeSnafu {
                        value: spectral_field,
                        count: WD_CLASS_COUNT,
                    }
                    .fail();
                }
                Ok(StellarClass::WhiteDwarf {
                    spectral: white_dwarf_from_ordinal(spectral_field),
                    subclass: decode_subclass(subclass_field),
                })
            }
            STAR_TYPE_NEUTRON_STAR => {
                if spectral_field >= NEUTRON_STAR_CLASS_COUNT {
                    return NeutronStarOutOfRangeSnafu {
                        value: spectral_field,
                        count: NEUTRON_STAR_CLASS_COUNT,
                    }
                    .fail();
                }
                Ok(StellarClass::NeutronStar {
                    spectral: neutron_star_from_ordinal(spectral_field),
                    subclass: decode_subclass(subclass_field),
                })
            }
            STAR_TYPE_BLACK_HOLE => Ok(StellarClass::BlackHole),
            other => ReservedStarTypeSnafu { value: other as u8 }.fail(),
        }
    }

    /// Packs this value into the legacy 16-bit wire representation.
    /// Infallible, but lossy: both `Spectral_Y` (V1 predates brown dwarfs)
    /// and `Spectral_Wo` (V1 predates Wolf-Rayet oxygen subtypes) collapse
    /// to Unknown explicitly, rather than being left to fall through the
    /// ordinal-shift below, which would otherwise truncate `Wo`'s ordinal
    /// into `O`'s wire code and silently misdecode one real class as
    /// another.
    pub fn pack_v1(&self) -> u16 {
        let (star_type, spectral, subclass, luminosity) = match self {
            StellarClass::Normal {
                spectral,
                subclass,
                luminosity,
            } => {
                let ord = *spectral as u8;
                let field = if matches!(*spectral, NormalSpectral::Y | NormalSpectral::Wo) {
                    NormalSpectral::Unknown as u8
                } else if ord > NormalSpectral::Y as u8 {
                    ord.wrapping_sub(1)
                } else {
                    ord
                };
                (
                    STAR_TYPE_NORMAL,
                    field as u16,
                    encode_subclass(*subclass),
                    *luminosity as u16,
                )
            }
            StellarClass::WhiteDwarf { spectral, subclass } => (
                STAR_TYPE_WHITE_DWARF,
                *spectral as u16,
                encode_subclass(*subclass),
                LuminosityClass::Unknown as u16,
            ),
            StellarClass::NeutronStar { spectral, subclass } => (
                STAR_TYPE_NEUTRON_STAR,
                *spectral as u16,
                encode_subclass(*subclass),
                LuminosityClass::Unknown as u16,
            ),
            StellarClass::BlackHole => (
                STAR_TYPE_BLACK_HOLE,
                0,
                encode_subclass(None),
                LuminosityClass::Unknown as u16,
            ),
        };

        (star_type & 0xF) << 12 | (spectral & 0xF) << 8 | (subclass & 0xF) << 4 | (luminosity & 0xF)
    }

    /// Unpacks a legacy 16-bit wire value.
    pub fn unpack_v1(bits: u16) -> Result<Self, DecodeError> {
        let star_type = (bits >> 12) & 0x7;
        let spectral_field = ((bits >> 8) & 0xF) as u8;
        let subclass_field = ((bits >> 4) & 0xF) as u8;
        let luminosity_field = (bits & 0xF) as u8;

        match star_type {
            STAR_TYPE_NORMAL => {
                // Field 12 is the reserved Unknown slot (also where a
                // packed Y lands); field 15 is the slot that later became
                // Y, but V1 never stores Y there (it collapses to 12
                // instead), so 15 unambiguously means the legacy
                // Spectral_C value and is reinterpreted as such.
                let spectral = if spectral_field == 15 {
                    NormalSpectral::C
                } else {
                    normal_from_ordinal(spectral_field)
                };
                Ok(StellarClass::Normal {
                    spectral,
                    subclass: decode_subclass(subclass_field),
                    luminosity: luminosity_from_ordinal(luminosity_field),
                })
            }
            STAR_TYPE_WHITE_DWARF => {
                if spectral_field >= WD_CLASS_COUNT {
                    return WhiteDwarfOutOfRangeSnafu {
                        value: spectral_field,
                        count: WD_CLASS_COUNT,
                    }
                    .fail();
                }
                Ok(StellarClass::WhiteDwarf {
                    spectral: white_dwarf_from_ordinal(spectral_field),
                    subclass: decode_subclass(subclass_field),
                })
            }
            STAR_TYPE_NEUTRON_STAR => {
                if spectral_field >= NEUTRON_STAR_CLASS_COUNT {
                    return NeutronStarOutOfRangeSnafu {
                        value: spectral_field,
                        count: NEUTRON_STAR_CLASS_COUNT,
                    }
                    .fail();
                }
                Ok(StellarClass::NeutronStar {
                    spectral: neutron_star_from_ordinal(spectral_field),
                    subclass: decode_subclass(subclass_field),
                })
            }
            STAR_TYPE_BLACK_HOLE => Ok(StellarClass::BlackHole),
            other => ReservedStarTypeSnafu { value: other as u8 }.fail(),
        }
    }
}
