/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Stellar spectral classification and JPL/INPOP planetary ephemeris
//! evaluation.
//!
//! Two independent cores live here:
//!
//! - [`stellar`]: encoding, decoding, rendering, and parsing of
//!   Morgan-Keenan-style stellar spectral types.
//! - [`ephemeris`]: loading and Chebyshev-interpolating JPL DE / INPOP
//!   binary ephemeris files.
//!
//! [`name_index`] is a small, independent collaborator used by star
//! catalogs to keep a bidirectional name/index mapping; it has no
//! dependency on [`stellar`].

pub mod binary_io;
pub mod errors;
pub mod ephemeris;
pub mod name_index;
pub mod stellar;

pub mod prelude {
    pub use crate::binary_io::BinaryReader;
    pub use crate::ephemeris::{JplEphItem, JplEphemeris};
    pub use crate::name_index::NameIndex;
    pub use crate::stellar::{LuminosityClass, StellarClass};
}
