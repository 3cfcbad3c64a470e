/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use starlore::ephemeris::{JplEphItem, JplEphemeris};
use starlore::stellar;

#[derive(Parser, Debug)]
#[clap(name = "starlore", author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    action: Actions,
}

#[derive(Debug, Subcommand)]
enum Actions {
    /// Parses free-form spectral type text and prints the canonical
    /// rendering, packed V2 value, and derived display color.
    Classify {
        /// Spectral type text, e.g. "G2V" or "DA9".
        text: String,
    },
    /// Loads a JPL/INPOP binary ephemeris file and prints one body's
    /// position at a given Julian date.
    Ephemeris {
        /// Path to the DE/INPOP binary ephemeris file.
        file: PathBuf,
        /// Body name: mercury, venus, earth, mars, jupiter, saturn,
        /// uranus, neptune, pluto, moon, sun, ssb, emb, libration.
        body: String,
        /// Julian date (TDB) to query.
        tjd: f64,
    },
}

fn parse_body(name: &str) -> Option<JplEphItem> {
    match name.to_ascii_lowercase().as_str() {
        "mercury" => Some(JplEphItem::Mercury),
        "venus" => Some(JplEphItem::Venus),
        "earth" => Some(JplEphItem::Earth),
        "emb" => Some(JplEphItem::EarthMoonBary),
        "mars" => Some(JplEphItem::Mars),
        "jupiter" => Some(JplEphItem::Jupiter),
        "saturn" => Some(JplEphItem::Saturn),
        "uranus" => Some(JplEphItem::Uranus),
        "neptune" => Some(JplEphItem::Neptune),
        "pluto" => Some(JplEphItem::Pluto),
        "moon" => Some(JplEphItem::Moon),
        "sun" => Some(JplEphItem::Sun),
        "ssb" => Some(JplEphItem::Ssb),
        "libration" => Some(JplEphItem::Libration),
        _ => None,
    }
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    match args.action {
        Actions::Classify { text } => {
            let class = stellar::parse(&text);
            let color = stellar::get_apparent_color(&class);
            println!("{class}");
            println!("packed: {:#06x}", class.pack_v2());
            println!("color: ({:.3}, {:.3}, {:.3})", color.0, color.1, color.2);
            ExitCode::SUCCESS
        }
        Actions::Ephemeris { file, body, tjd } => {
            let Some(item) = parse_body(&body) else {
                eprintln!("unrecognized body {body:?}");
                return ExitCode::FAILURE;
            };
            match JplEphemeris::load_file(&file) {
                Ok(eph) => {
                    if !eph.covers(tjd) {
                        log::warn!(
                            "{tjd} is outside the loaded ephemeris range [{}, {}]; clamping",
                            eph.start_date(),
                            eph.end_date()
                        );
                    }
                    let pos = eph.planet_position(item, tjd);
                    println!("{:.6} {:.6} {:.6} km", pos.x, pos.y, pos.z);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("failed to load {:?}: {e}", file);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
