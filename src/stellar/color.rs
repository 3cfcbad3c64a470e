/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Apparent display color derivation.

use super::{NormalSpectral, StellarClass};

/// An RGB display color triple, components in `0.0..=1.0`.
pub type Rgb = (f64, f64, f64);

const WHITE: Rgb = (1.0, 1.0, 1.0);

/// Returns the display color for this star, derived solely from its
/// spectral class for normal stars; white dwarfs, neutron stars, black
/// holes, and any normal-star spectral class with no defined color
/// default to white.
pub fn get_apparent_color(class: &StellarClass) -> Rgb {
    let StellarClass::Normal { spectral, .. } = class else {
        return WHITE;
    };

    match spectral {
        NormalSpectral::O => (0.7, 0.8, 1.0),
        NormalSpectral::B => (0.8, 0.9, 1.0),
        NormalSpectral::A => (1.0, 1.0, 1.0),
        NormalSpectral::F => (1.0, 1.0, 0.88),
        NormalSpectral::G => (1.0, 1.0, 0.75),
        NormalSpectral::K => (1.0, 0.9, 0.7),
        NormalSpectral::M => (1.0, 0.7, 0.7),
        NormalSpectral::R | NormalSpectral::S | NormalSpectral::N | NormalSpectral::C => {
            (1.0, 0.4, 0.4)
        }
        NormalSpectral::L | NormalSpectral::T => (0.75, 0.2, 0.2),
        NormalSpectral::Y => (0.5, 0.175, 0.125),
        NormalSpectral::Wc
        | NormalSpectral::Wn
        | NormalSpectral::Wo
        | NormalSpectral::Unknown => WHITE,
    }
}
