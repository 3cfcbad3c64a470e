/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Shared error types used across the binary-IO, ephemeris, and stellar
//! classification modules.

use snafu::prelude::*;
use std::io;

/// Raised when the underlying byte stream ends early or the source errors.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IoError {
    #[snafu(display("failed to read {what} ({needed} bytes): {source}"))]
    Read {
        what: &'static str,
        needed: usize,
        source: io::Error,
    },
}
