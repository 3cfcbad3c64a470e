/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Canonical text rendering.
//!
//! Each star type renders independently: white dwarf and neutron star
//! variants collapse their specific spectral subtype to a generic "WD" or
//! "Q" prefix plus the optional subclass digit, while normal stars render
//! a letter, optional subclass digit, and luminosity suffix.

use super::{LuminosityClass, NormalSpectral, StellarClass};
use std::fmt;

/// Letters for [`NormalSpectral`] ordinals 0..=16, indexed by ordinal.
/// Ordinal 17 (`Wo`) falls outside this table by design: it was added to
/// the classification after the table was fixed, so it (and any other
/// out-of-range ordinal) renders as the generic "any other state" `"?"`.
const NORMAL_LETTERS: &str = "OBAFGKMRSNWW?LTYC";

fn luminosity_suffix(luminosity: LuminosityClass) -> &'static str {
    match luminosity {
        LuminosityClass::Ia0 => " I-a0",
        LuminosityClass::Ia => " I-a",
        LuminosityClass::Ib => " I-b",
        LuminosityClass::Ii => " II",
        LuminosityClass::Iii => " III",
        LuminosityClass::Iv => " IV",
        LuminosityClass::V => " V",
        LuminosityClass::Vi => " VI",
        LuminosityClass::Unknown => "",
    }
}

impl fmt::Display for StellarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StellarClass::BlackHole => write!(f, "X"),
            StellarClass::WhiteDwarf { subclass, .. } => {
                write!(f, "WD")?;
                if let Some(d) = subclass {
                    write!(f, "{d}")?;
                }
                Ok(())
            }
            StellarClass::NeutronStar { subclass, .. } => {
                write!(f, "Q")?;
                if let Some(d) = subclass {
                    write!(f, "{d}")?;
                }
                Ok(())
            }
            StellarClass::Normal {
                spectral,
                subclass,
                luminosity,
            } => {
                let ordinal = *spectral as u8;
                match NORMAL_LETTERS.as_bytes().get(ordinal as usize) {
                    Some(&letter) => {
                        write!(f, "{}", letter as char)?;
                        if let Some(d) = subclass {
                            write!(f, "{d}")?;
                        }
                        write!(f, "{}", luminosity_suffix(*luminosity))
                    }
                    None => write!(f, "?"),
                }
            }
        }
    }
}
