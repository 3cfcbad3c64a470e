/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Forgiving text parser for the irregular spectral-type strings found in
//! real star catalogs. Always succeeds; unmatched fields stay at their
//! Unknown sentinel, and trailing garbage is ignored.

use super::{
    LuminosityClass, NeutronStarSpectral, NormalSpectral, StellarClass, Subclass,
    WhiteDwarfSpectral,
};
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Clone, Copy)]
enum Kind {
    Normal,
    WhiteDwarf,
    NeutronStar,
    BlackHole,
}

#[derive(Clone, Copy)]
enum State {
    Begin,
    SubdwarfPrefix,
    NormalStarClass,
    WolfRayetType,
    NormalStarSubclass,
    NormalStarSubclassDecimal,
    NormalStarSubclassFinal,
    LumClassBegin,
    LumClassI,
    LumClassII,
    LumClassIdash,
    LumClassIa,
    LumClassV,
    WdType,
    WdExtendedType,
    WdSubclass,
    NeutronStarType,
    NeutronStarExtendedType,
    NeutronStarSubclass,
    End,
}

/// Parses a possibly short, possibly malformed spectral-type string.
/// Reads one character at a time (including a synthetic end-of-string
/// character) and never backtracks; excess trailing characters are
/// silently ignored.
pub fn parse(input: &str) -> StellarClass {
    let chars: Vec<char> = input.chars().collect();
    let peek = |pos: usize| chars.get(pos).copied().unwrap_or('\0');

    let mut pos = 0usize;
    let mut state = State::Begin;

    let mut kind = Kind::Normal;
    let mut normal_spectral = NormalSpectral::Unknown;
    let mut wd_spectral = WhiteDwarfSpectral::D;
    let mut ns_spectral = NeutronStarSpectral::Q;
    let mut subclass: Subclass = None;
    let mut luminosity = LuminosityClass::Unknown;

    loop {
        state = match state {
            State::Begin => match peek(pos) {
                'Q' => {
                    kind = Kind::NeutronStar;
                    pos += 1;
                    State::NeutronStarType
                }
                'X' => {
                    kind = Kind::BlackHole;
                    State::End
                }
                'D' => {
                    kind = Kind::WhiteDwarf;
                    pos += 1;
                    State::WdType
                }
                's' => {
                    pos += 1;
                    State::SubdwarfPrefix
                }
                '?' => State::End,
                _ => State::NormalStarClass,
            },
            State::SubdwarfPrefix => {
                if peek(pos) == 'd' {
                    luminosity = LuminosityClass::Vi;
                    pos += 1;
                    State::NormalStarClass
                } else {
                    State::End
                }
            }
            State::NormalStarClass => {
                let c = peek(pos);
                let next = match c {
                    'O' => {
                        normal_spectral = NormalSpectral::O;
                        State::NormalStarSubclass
                    }
                    'B' => {
                        normal_spectral = NormalSpectral::B;
                        State::NormalStarSubclass
                    }
                    'A' => {
                        normal_spectral = NormalSpectral::A;
                        State::NormalStarSubclass
                    }
                    'F' => {
                        normal_spectral = NormalSpectral::F;
                        State::NormalStarSubclass
                    }
                    'G' => {
                        normal_spectral = NormalSpectral::G;
                        State::NormalStarSubclass
                    }
                    'K' => {
                        normal_spectral = NormalSpectral::K;
                        State::NormalStarSubclass
                    }
                    'M' => {
                        normal_spectral = NormalSpectral::M;
                        State::NormalStarSubclass
                    }
                    'R' => {
                        normal_spectral = NormalSpectral::R;
                        State::NormalStarSubclass
                    }
                    'S' => {
                        normal_spectral = NormalSpectral::S;
                        State::NormalStarSubclass
                    }
                    'N' => {
                        normal_spectral = NormalSpectral::N;
                        State::NormalStarSubclass
                    }
                    'L' => {
                        normal_spectral = NormalSpectral::L;
                        State::NormalStarSubclass
                    }
                    'T' => {
                        normal_spectral = NormalSpectral::T;
                        State::NormalStarSubclass
                    }
                    'Y' => {
                        normal_spectral = NormalSpectral::Y;
                        State::NormalStarSubclass
                    }
                    'C' => {
                        normal_spectral = NormalSpectral::C;
                        State::NormalStarSubclass
                    }
                    'W' => State::WolfRayetType,
                    _ => State::End,
                };
                pos += 1;
                next
            }
            State::WolfRayetType => {
                match peek(pos) {
                    'C' => {
                        normal_spectral = NormalSpectral::Wc;
                        pos += 1;
                    }
                    'N' => {
                        normal_spectral = NormalSpectral::Wn;
                        pos += 1;
                    }
                    'O' => {
                        normal_spectral = NormalSpectral::Wo;
                        pos += 1;
                    }
                    _ => normal_spectral = NormalSpectral::Wc,
                }
                State::NormalStarSubclass
            }
            State::NormalStarSubclass => {
                let c = peek(pos);
                if let Some(d) = c.to_digit(10) {
                    subclass = Some(d as u8);
                    pos += 1;
                    State::NormalStarSubclassDecimal
                } else {
                    State::LumClassBegin
                }
            }
            State::NormalStarSubclassDecimal => {
                if peek(pos) == '.' {
                    pos += 1;
                    State::NormalStarSubclassFinal
                } else {
                    State::LumClassBegin
                }
            }
            State::NormalStarSubclassFinal => {
                let c = peek(pos);
                pos += 1;
                if c.is_ascii_digit() {
                    State::LumClassBegin
                } else {
                    State::End
                }
            }
            State::LumClassBegin => {
                let next = match peek(pos) {
                    'I' => State::LumClassI,
                    'V' => State::LumClassV,
                    _ => State::End,
                };
                pos += 1;
                next
            }
            State::LumClassI => {
                let c = peek(pos);
                let next = match c {
                    'I' => {
                        pos += 1;
                        State::LumClassII
                    }
                    'V' => {
                        luminosity = LuminosityClass::Iv;
                        pos += 1;
                        State::End
                    }
                    'a' => {
                        pos += 1;
                        State::LumClassIa
                    }
                    'b' => {
                        luminosity = LuminosityClass::Ib;
                        pos += 1;
                        State::End
                    }
                    '-' => {
                        pos += 1;
                        State::LumClassIdash
                    }
                    _ => {
                        luminosity = LuminosityClass::Ib;
                        pos += 1;
                        State::End
                    }
                };
                next
            }
            State::LumClassII => {
                if peek(pos) == 'I' {
                    luminosity = LuminosityClass::Iii;
                    pos += 1;
                } else {
                    luminosity = LuminosityClass::Ii;
                }
                State::End
            }
            State::LumClassIdash => {
                if peek(pos) == 'a' {
                    pos += 1;
                    State::LumClassIa
                } else {
                    luminosity = LuminosityClass::Ib;
                    pos += 1;
                    State::End
                }
            }
            State::LumClassIa => {
                if peek(pos) == '0' {
                    luminosity = LuminosityClass::Ia0;
                    pos += 1;
                } else {
                    luminosity = LuminosityClass::Ia;
                }
                State::End
            }
            State::LumClassV => {
                if peek(pos) == 'I' {
                    luminosity = LuminosityClass::Vi;
                    pos += 1;
                } else {
                    luminosity = LuminosityClass::V;
                }
                State::End
            }
            State::WdType => {
                match peek(pos) {
                    'A' => {
                        wd_spectral = WhiteDwarfSpectral::Da;
                        pos += 1;
                    }
                    'B' => {
                        wd_spectral = WhiteDwarfSpectral::Db;
                        pos += 1;
                    }
                    'C' => {
                        wd_spectral = WhiteDwarfSpectral::Dc;
                        pos += 1;
                    }
                    'O' => {
                        wd_spectral = WhiteDwarfSpectral::Do;
                        pos += 1;
                    }
                    'Q' => {
                        wd_spectral = WhiteDwarfSpectral::Dq;
                        pos += 1;
                    }
                    'X' => {
                        wd_spectral = WhiteDwarfSpectral::Dx;
                        pos += 1;
                    }
                    'Z' => {
                        wd_spectral = WhiteDwarfSpectral::Dz;
                        pos += 1;
                    }
                    _ => {}
                }
                State::WdExtendedType
            }
            State::WdExtendedType => {
                if matches!(
                    peek(pos),
                    'A' | 'B' | 'C' | 'O' | 'Q' | 'Z' | 'X' | 'V' | 'P' | 'H' | 'E'
                ) {
                    pos += 1;
                }
                State::WdSubclass
            }
            State::WdSubclass => {
                if let Some(d) = peek(pos).to_digit(10) {
                    subclass = Some(d as u8);
                    pos += 1;
                }
                State::End
            }
            State::NeutronStarType => {
                match peek(pos) {
                    'N' => {
                        ns_spectral = NeutronStarSpectral::Qn;
                        pos += 1;
                    }
                    'P' => {
                        ns_spectral = NeutronStarSpectral::Qp;
                        pos += 1;
                    }
                    'M' => {
                        ns_spectral = NeutronStarSpectral::Qm;
                        pos += 1;
                    }
                    _ => {}
                }
                State::NeutronStarExtendedType
            }
            State::NeutronStarExtendedType => {
                if matches!(peek(pos), 'P' | 'M' | 'N') {
                    pos += 1;
                }
                State::NeutronStarSubclass
            }
            State::NeutronStarSubclass => {
                if let Some(d) = peek(pos).to_digit(10) {
                    subclass = Some(d as u8);
                    pos += 1;
                }
                State::End
            }
            State::End => break,
        };
    }

    match kind {
        Kind::BlackHole => StellarClass::BlackHole,
        Kind::WhiteDwarf => StellarClass::WhiteDwarf {
            spectral: wd_spectral,
            subclass,
        },
        Kind::NeutronStar => StellarClass::NeutronStar {
            spectral: ns_spectral,
            subclass,
        },
        Kind::Normal => StellarClass::Normal {
            spectral: normal_spectral,
            subclass,
            luminosity,
        },
    }
}

impl FromStr for StellarClass {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}
