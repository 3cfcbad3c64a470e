/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Loading and querying JPL DE / INPOP binary planetary ephemeris files.
//!
//! [`JplEphemeris::load`] reads a fixed-layout header whose byte order is
//! discovered by peeking the `deNum` field in host-native order, then
//! reinterpreting the whole header once the order is known. After that,
//! [`JplEphemeris::planet_position`] evaluates a per-body Chebyshev series
//! to obtain a barycentric position at a given TDB Julian date.
//! [`JplEphemeris::planet_position_at_epoch`] takes a [`hifitime::Epoch`]
//! directly for callers that don't want to do the TDB Julian date
//! conversion themselves.

mod interpolate;

use crate::binary_io::BinaryReader;
use crate::errors::IoError;
use hifitime::Epoch;
use interpolate::chebyshev_eval;
use log::{debug, trace, warn};
use nalgebra::Vector3;
use snafu::{ResultExt, Snafu};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

const LABEL_SIZE: usize = 84;
const N_LABELS: usize = 3;
const CONST_NAME_SIZE: usize = 6;
const N_CONST_NAMES: usize = 400;
const N_ITEMS: usize = 12;

/// Offset of the `deNum` field within the fixed header, used for the
/// host-native endianness peek before the header is fully parsed.
const DE_NUM_OFFSET: usize = N_LABELS * LABEL_SIZE
    + N_CONST_NAMES * CONST_NAME_SIZE
    + 3 * 8 // startDate, endDate, daysPerInterval
    + 4 // nConstants
    + 8 // au
    + 8 // earthMoonMassRatio
    + N_ITEMS * 12; // coeffInfo[12] of {u32,u32,u32}

const HEADER_SIZE: usize = DE_NUM_OFFSET + 4 + 12; // + deNum + libration entry

const INPOP_DE_NUM: u32 = 100;
const DE_NUM_MIN: u32 = 200;
const SWAP_DISCRIMINANT: u32 = 1 << 15;

/// Sentinel `nGranules` value meaning "single span over the whole record".
pub const SINGLE_SPAN: u32 = u32::MAX;

/// Body identifiers for a JPL/INPOP ephemeris, including the two items
/// (`Ssb`, `Earth`) that carry no stored coefficients of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JplEphItem {
    Mercury,
    Venus,
    EarthMoonBary,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Sun,
    Nutation,
    Libration,
    /// Solar System Barycenter: always the coordinate origin.
    Ssb,
    /// Derived from `EarthMoonBary` and geocentric `Moon`.
    Earth,
}

impl JplEphItem {
    fn coeff_index(self) -> Option<usize> {
        use JplEphItem::*;
        match self {
            Mercury => Some(0),
            Venus => Some(1),
            EarthMoonBary => Some(2),
            Mars => Some(3),
            Jupiter => Some(4),
            Saturn => Some(5),
            Uranus => Some(6),
            Neptune => Some(7),
            Pluto => Some(8),
            Moon => Some(9),
            Sun => Some(10),
            Nutation => Some(11),
            Libration | Ssb | Earth => None,
        }
    }
}

/// Offset, coefficient count, and granule count for one body's series
/// within a record. `offset` is already 0-based (the loader subtracts 3
/// from the file's 1-based value to skip the record's `t0`/`t1` pair).
#[derive(Debug, Clone, Copy, Default)]
pub struct CoeffInfo {
    pub offset: usize,
    pub n_coeffs: usize,
    pub n_granules: u32,
}

impl CoeffInfo {
    fn granule_count(&self) -> usize {
        if self.n_granules == SINGLE_SPAN {
            1
        } else {
            self.n_granules as usize
        }
    }
}

/// One time-indexed coefficient record, covering `[t0, t1)`.
#[derive(Debug, Clone)]
pub struct JPLEphRecord {
    pub t0: f64,
    pub t1: f64,
    pub coeffs: Vec<f64>,
}

/// Errors raised while loading an ephemeris file.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LoadError {
    #[snafu(display("{source}"))]
    Io { source: IoError },
    #[snafu(display("failed to read {what}: {source}"))]
    RawRead {
        what: &'static str,
        source: std::io::Error,
    },
    #[snafu(display("invalid ephemeris header: {reason}"))]
    InvalidFormat { reason: &'static str },
}

/// A loaded JPL DE or INPOP planetary ephemeris.
///
/// Immutable once constructed: `Send + Sync` without synchronization.
#[derive(Debug, Clone)]
pub struct JplEphemeris {
    de_num: u32,
    start_date: f64,
    end_date: f64,
    days_per_interval: f64,
    au: f64,
    earth_moon_mass_ratio: f64,
    swap_bytes: bool,
    record_size: usize,
    coeff_info: [CoeffInfo; N_ITEMS],
    libration_info: CoeffInfo,
    records: Vec<JPLEphRecord>,
}

fn detect_endianness(de_num_native: u32) -> Result<(u32, bool), LoadError> {
    if de_num_native == INPOP_DE_NUM {
        Ok((INPOP_DE_NUM, false))
    } else if de_num_native.swap_bytes() == INPOP_DE_NUM {
        Ok((INPOP_DE_NUM, true))
    } else if de_num_native > SWAP_DISCRIMINANT && de_num_native.swap_bytes() >= DE_NUM_MIN {
        Ok((de_num_native.swap_bytes(), true))
    } else if de_num_native <= SWAP_DISCRIMINANT && de_num_native >= DE_NUM_MIN {
        Ok((de_num_native, false))
    } else {
        InvalidFormatSnafu {
            reason: "deNum failed endianness discrimination",
        }
        .fail()
    }
}

fn computed_record_size(coeff_info: &[CoeffInfo; N_ITEMS], libration: &CoeffInfo) -> usize {
    let mut total = 2; // t0, t1
    for (i, info) in coeff_info.iter().enumerate() {
        let components = if i == N_ITEMS - 1 { 2 } else { 3 }; // Nutation is 2-component
        total += info.n_coeffs * info.granule_count() * components;
    }
    total += libration.n_coeffs * libration.granule_count() * 3;
    total
}

impl JplEphemeris {
    /// Loads an ephemeris from a forward-only byte stream.
    pub fn load<R: Read>(mut reader: R) -> Result<Self, LoadError> {
        let mut header_buf = vec![0u8; HEADER_SIZE];
        reader.read_exact(&mut header_buf).context(RawReadSnafu {
            what: "ephemeris header",
        })?;

        let de_num_native =
            u32::from_ne_bytes(header_buf[DE_NUM_OFFSET..DE_NUM_OFFSET + 4].try_into().unwrap());
        let (de_num, swap) = detect_endianness(de_num_native)?;
        debug!("ephemeris header: deNum={de_num} swap={swap}");

        let mut cur = Cursor::new(&header_buf[..]);
        cur.skip_bytes(N_LABELS * LABEL_SIZE + N_CONST_NAMES * CONST_NAME_SIZE)
            .context(IoSnafu)?;
        let start_date = cur.read_f64(swap).context(IoSnafu)?;
        let end_date = cur.read_f64(swap).context(IoSnafu)?;
        let days_per_interval = cur.read_f64(swap).context(IoSnafu)?;
        let _n_constants = cur.read_u32(swap).context(IoSnafu)?;
        let au = cur.read_f64(swap).context(IoSnafu)?;
        let earth_moon_mass_ratio = cur.read_f64(swap).context(IoSnafu)?;

        let mut coeff_info = [CoeffInfo::default(); N_ITEMS];
        for slot in coeff_info.iter_mut() {
            let offset = cur.read_u32(swap).context(IoSnafu)? as usize;
            let n_coeffs = cur.read_u32(swap).context(IoSnafu)? as usize;
            let n_granules = cur.read_u32(swap).context(IoSnafu)?;
            *slot = CoeffInfo {
                offset: offset.saturating_sub(3),
                n_coeffs,
                n_granules,
            };
            if n_coeffs > 32 {
                return InvalidFormatSnafu {
                    reason: "body nCoeffs exceeds the 32-coefficient invariant",
                }
                .fail();
            }
            if n_granules == 0 {
                return InvalidFormatSnafu {
                    reason: "body nGranules is 0; must be at least 1",
                }
                .fail();
            }
        }

        let _de_num_in_header = cur.read_u32(swap).context(IoSnafu)?;
        let libration_offset = cur.read_u32(swap).context(IoSnafu)? as usize;
        let libration_n_coeffs = cur.read_u32(swap).context(IoSnafu)? as usize;
        let libration_n_granules = cur.read_u32(swap).context(IoSnafu)?;
        if libration_n_coeffs > 32 {
            return InvalidFormatSnafu {
                reason: "libration nCoeffs exceeds the 32-coefficient invariant",
            }
            .fail();
        }
        if libration_n_granules == 0 {
            return InvalidFormatSnafu {
                reason: "libration nGranules is 0; must be at least 1",
            }
            .fail();
        }
        let libration_info = CoeffInfo {
            offset: libration_offset.saturating_sub(3),
            n_coeffs: libration_n_coeffs,
            n_granules: libration_n_granules,
        };

        let is_inpop = de_num == INPOP_DE_NUM;
        let record_size = if is_inpop {
            reader.read_u32(swap).context(IoSnafu)? as usize
        } else {
            computed_record_size(&coeff_info, &libration_info)
        };

        let header_consumed = if is_inpop { HEADER_SIZE + 4 } else { HEADER_SIZE };
        let padding = (record_size * 8)
            .checked_sub(header_consumed)
            .ok_or_else(|| {
                InvalidFormatSnafu {
                    reason: "recordSize is smaller than the header it must pad past",
                }
                .build()
            })?;
        reader.skip_bytes(padding).context(IoSnafu)?;
        // Constants-value record: discarded in full.
        reader.skip_bytes(record_size * 8).context(IoSnafu)?;

        let n_records = ((end_date - start_date) / days_per_interval).floor() as usize;
        debug!("ephemeris spans {n_records} records of {record_size} doubles each");

        let mut records = Vec::with_capacity(n_records);
        for _ in 0..n_records {
            let t0 = reader.read_f64(swap).context(IoSnafu)?;
            let t1 = reader.read_f64(swap).context(IoSnafu)?;
            let mut coeffs = Vec::with_capacity(record_size - 2);
            for _ in 0..record_size - 2 {
                coeffs.push(reader.read_f64(swap).context(IoSnafu)?);
            }
            records.push(JPLEphRecord { t0, t1, coeffs });
        }

        Ok(JplEphemeris {
            de_num,
            start_date,
            end_date,
            days_per_interval,
            au,
            earth_moon_mass_ratio,
            swap_bytes: swap,
            record_size,
            coeff_info,
            libration_info,
            records,
        })
    }

    /// Memory-maps `path` and loads an ephemeris from it without copying
    /// the file into the heap up front.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path.as_ref()).context(RawReadSnafu {
            what: "ephemeris file",
        })?;
        let mmap = unsafe { memmap2::Mmap::map(&file) }.context(RawReadSnafu {
            what: "ephemeris file mapping",
        })?;
        Self::load(&mmap[..])
    }

    /// DE/INPOP identifier (e.g. 405, 421; 100 for INPOP).
    pub fn de_num(&self) -> u32 {
        self.de_num
    }

    /// Inclusive start of the covered Julian date range, TDB.
    pub fn start_date(&self) -> f64 {
        self.start_date
    }

    /// Inclusive end of the covered Julian date range, TDB.
    pub fn end_date(&self) -> f64 {
        self.end_date
    }

    /// Astronomical unit, in km, as recorded in the file.
    pub fn au(&self) -> f64 {
        self.au
    }

    /// Whether `tjd` falls within `[start_date, end_date]` without clamping.
    pub fn covers(&self, tjd: f64) -> bool {
        tjd >= self.start_date && tjd <= self.end_date
    }

    /// Whether the header's byte order differed from this host's.
    pub fn swapped(&self) -> bool {
        self.swap_bytes
    }

    /// Number of doubles per record, including the leading `t0`/`t1` pair.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    fn locate(&self, tjd: f64, info: &CoeffInfo) -> (&JPLEphRecord, f64, usize) {
        let clamped = tjd.clamp(self.start_date, self.end_date);
        let rec_no = (((clamped - self.start_date) / self.days_per_interval).floor() as usize)
            .min(self.records.len().saturating_sub(1));
        let record = &self.records[rec_no];

        debug_assert!(info.n_coeffs <= 32);

        if info.n_granules == SINGLE_SPAN {
            let u = 2.0 * (clamped - record.t0) / self.days_per_interval - 1.0;
            (record, u, info.offset)
        } else {
            debug_assert!(info.n_granules >= 1);
            let days_per_granule = self.days_per_interval / info.n_granules as f64;
            let granule = ((clamped - record.t0) / days_per_granule).floor();
            let granule_start = record.t0 + granule * days_per_granule;
            let u = 2.0 * (clamped - granule_start) / days_per_granule - 1.0;
            let coeff_start = info.offset + (granule as usize) * info.n_coeffs * 3;
            (record, u, coeff_start)
        }
    }

    /// Evaluates `body`'s position at `tjd` (TDB Julian date), in km
    /// relative to the Solar System Barycenter (geocentric for `Moon`).
    ///
    /// Infallible: `tjd` outside `[start_date, end_date]` is clamped, and
    /// an unsupported `body` (`Nutation`, which has only two stored
    /// components) is a programming error asserted in debug builds.
    pub fn planet_position(&self, body: JplEphItem, tjd: f64) -> Vector3<f64> {
        match body {
            JplEphItem::Ssb => return Vector3::zeros(),
            JplEphItem::Earth => {
                let emb = self.planet_position(JplEphItem::EarthMoonBary, tjd);
                let moon = self.planet_position(JplEphItem::Moon, tjd);
                return emb - moon * (1.0 / (self.earth_moon_mass_ratio + 1.0));
            }
            JplEphItem::Nutation => {
                debug_assert!(
                    false,
                    "Nutation has two stored components, not a 3-vector position"
                );
                warn!("planet_position called with Nutation; returning the zero vector");
                return Vector3::zeros();
            }
            _ => {}
        }

        let info = if body == JplEphItem::Libration {
            &self.libration_info
        } else {
            &self.coeff_info[body
                .coeff_index()
                .expect("body has no stored position coefficients")]
        };

        let (record, u, coeff_start) = self.locate(tjd, info);
        trace!("interpolating {body:?} at tjd={tjd:.6} u={u:.6}");

        let mut xyz = [0.0_f64; 3];
        for (i, slot) in xyz.iter_mut().enumerate() {
            let start = coeff_start + i * info.n_coeffs;
            *slot = chebyshev_eval(u, &record.coeffs[start..start + info.n_coeffs]);
        }
        Vector3::new(xyz[0], xyz[1], xyz[2])
    }

    /// Evaluates `body`'s position at `epoch`, converting to a TDB Julian
    /// date via [`hifitime::Epoch::to_jde_tdb_days`] before delegating to
    /// [`JplEphemeris::planet_position`].
    pub fn planet_position_at_epoch(&self, body: JplEphItem, epoch: Epoch) -> Vector3<f64> {
        self.planet_position(body, epoch.to_jde_tdb_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SYN_N_COEFFS: usize = 12;
    const SYN_DAYS_PER_INTERVAL: f64 = 32.0;
    const SYN_START_DATE: f64 = 2451545.0;
    const SYN_EMRAT: f64 = 81.300_568;

    /// Builds a minimal in-memory DE/INPOP-style buffer: every stored item
    /// gets the same (single-span) coefficient count, which keeps the
    /// record large enough to legally pad past the real fixed-size header,
    /// the same way a real DE/INPOP file's record dwarfs its header. Only
    /// the items named in `constants` carry a nonzero (constant-term)
    /// series; everything else is zero. This exercises the header,
    /// endianness-swap, padding, and interpolation code paths end to end
    /// without shipping a multi-megabyte real ephemeris file.
    struct SyntheticEphemeris {
        bytes: Vec<u8>,
    }

    impl SyntheticEphemeris {
        fn build(de_num: u32, swap: bool, constants: &[(usize, [f64; 3])], n_records: usize) -> Self {
            let mut buf = Vec::new();
            buf.extend(std::iter::repeat(0u8).take(N_LABELS * LABEL_SIZE));
            buf.extend(std::iter::repeat(0u8).take(N_CONST_NAMES * CONST_NAME_SIZE));

            let end_date = SYN_START_DATE + SYN_DAYS_PER_INTERVAL * n_records as f64;

            let put_f64 = |buf: &mut Vec<u8>, v: f64| {
                let mut bytes = v.to_ne_bytes();
                if swap {
                    bytes.reverse();
                }
                buf.extend_from_slice(&bytes);
            };
            let put_u32 = |buf: &mut Vec<u8>, v: u32| {
                let mut bytes = v.to_ne_bytes();
                if swap {
                    bytes.reverse();
                }
                buf.extend_from_slice(&bytes);
            };

            put_f64(&mut buf, SYN_START_DATE);
            put_f64(&mut buf, end_date);
            put_f64(&mut buf, SYN_DAYS_PER_INTERVAL);
            put_u32(&mut buf, 0); // nConstants
            put_f64(&mut buf, 1.495_978_71e8); // au
            put_f64(&mut buf, SYN_EMRAT);

            let mut coeff_info = [CoeffInfo::default(); N_ITEMS];
            let mut running = 0usize;
            for (i, slot) in coeff_info.iter_mut().enumerate() {
                let components = if i == N_ITEMS - 1 { 2 } else { 3 };
                *slot = CoeffInfo {
                    offset: running,
                    n_coeffs: SYN_N_COEFFS,
                    n_granules: SINGLE_SPAN,
                };
                running += SYN_N_COEFFS * components;
            }
            let libration_info = CoeffInfo {
                offset: running,
                n_coeffs: SYN_N_COEFFS,
                n_granules: SINGLE_SPAN,
            };

            for info in coeff_info.iter() {
                put_u32(&mut buf, (info.offset + 3) as u32);
                put_u32(&mut buf, info.n_coeffs as u32);
                put_u32(&mut buf, info.n_granules);
            }
            put_u32(&mut buf, de_num);
            put_u32(&mut buf, (libration_info.offset + 3) as u32);
            put_u32(&mut buf, libration_info.n_coeffs as u32);
            put_u32(&mut buf, libration_info.n_granules);

            assert_eq!(buf.len(), HEADER_SIZE);

            let record_size = computed_record_size(&coeff_info, &libration_info);
            if de_num == INPOP_DE_NUM {
                put_u32(&mut buf, record_size as u32);
            }
            let header_consumed = if de_num == INPOP_DE_NUM {
                HEADER_SIZE + 4
            } else {
                HEADER_SIZE
            };
            let padding = record_size * 8 - header_consumed;
            buf.extend(std::iter::repeat(0u8).take(padding));
            // Constants-value record, content irrelevant.
            buf.extend(std::iter::repeat(0u8).take(record_size * 8));

            for r in 0..n_records {
                let t0 = SYN_START_DATE + r as f64 * SYN_DAYS_PER_INTERVAL;
                let t1 = t0 + SYN_DAYS_PER_INTERVAL;
                put_f64(&mut buf, t0);
                put_f64(&mut buf, t1);

                let mut record_coeffs = vec![0.0_f64; record_size - 2];
                for &(item, xyz) in constants {
                    let info = coeff_info[item];
                    for (axis, v) in xyz.iter().enumerate() {
                        record_coeffs[info.offset + axis * info.n_coeffs] = *v;
                    }
                }
                for v in record_coeffs {
                    put_f64(&mut buf, v);
                }
            }

            SyntheticEphemeris { bytes: buf }
        }
    }

    const MERCURY: usize = 0;
    const EARTH_MOON_BARY: usize = 2;
    const MOON: usize = 9;

    #[test]
    fn loads_native_endian_de_header() {
        let synth = SyntheticEphemeris::build(405, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        assert_eq!(eph.de_num(), 405);
        assert!(!eph.swapped());
        assert_eq!(eph.start_date(), SYN_START_DATE);
    }

    #[test]
    fn loads_swapped_de_header() {
        let synth = SyntheticEphemeris::build(405, true, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        assert_eq!(eph.de_num(), 405);
        assert!(eph.swapped());
        assert_eq!(eph.start_date(), SYN_START_DATE);
    }

    #[test]
    fn loads_inpop_header_with_explicit_record_size() {
        let synth = SyntheticEphemeris::build(100, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        assert_eq!(eph.de_num(), 100);
    }

    #[test]
    fn multi_granule_interpolation_is_continuous_at_granule_boundary() {
        // Mercury gets 2 granules per record; every other body stays
        // single-span with all-zero coefficients. Mercury's X series is a
        // distinct linear polynomial per granule, chosen so the two
        // granules agree in value at the shared boundary (granule 0's u=1
        // endpoint equals granule 1's u=-1 endpoint); Y and Z use the same
        // constant term in both granules, trivially continuous.
        const MERCURY_GRANULES: u32 = 2;

        let mut coeff_info = [CoeffInfo::default(); N_ITEMS];
        let mut running = 0usize;
        for (i, slot) in coeff_info.iter_mut().enumerate() {
            let components = if i == N_ITEMS - 1 { 2 } else { 3 };
            let n_granules = if i == MERCURY { MERCURY_GRANULES } else { SINGLE_SPAN };
            *slot = CoeffInfo {
                offset: running,
                n_coeffs: SYN_N_COEFFS,
                n_granules,
            };
            let granule_count = if n_granules == SINGLE_SPAN { 1 } else { n_granules as usize };
            running += SYN_N_COEFFS * components * granule_count;
        }
        let libration_info = CoeffInfo {
            offset: running,
            n_coeffs: SYN_N_COEFFS,
            n_granules: SINGLE_SPAN,
        };

        let mut buf = Vec::new();
        buf.extend(std::iter::repeat(0u8).take(N_LABELS * LABEL_SIZE));
        buf.extend(std::iter::repeat(0u8).take(N_CONST_NAMES * CONST_NAME_SIZE));

        let put_f64 = |buf: &mut Vec<u8>, v: f64| buf.extend_from_slice(&v.to_ne_bytes());
        let put_u32 = |buf: &mut Vec<u8>, v: u32| buf.extend_from_slice(&v.to_ne_bytes());

        let end_date = SYN_START_DATE + SYN_DAYS_PER_INTERVAL;
        put_f64(&mut buf, SYN_START_DATE);
        put_f64(&mut buf, end_date);
        put_f64(&mut buf, SYN_DAYS_PER_INTERVAL);
        put_u32(&mut buf, 0);
        put_f64(&mut buf, 1.495_978_71e8);
        put_f64(&mut buf, SYN_EMRAT);

        for info in coeff_info.iter() {
            put_u32(&mut buf, (info.offset + 3) as u32);
            put_u32(&mut buf, info.n_coeffs as u32);
            put_u32(&mut buf, info.n_granules);
        }
        put_u32(&mut buf, 405);
        put_u32(&mut buf, (libration_info.offset + 3) as u32);
        put_u32(&mut buf, libration_info.n_coeffs as u32);
        put_u32(&mut buf, libration_info.n_granules);

        assert_eq!(buf.len(), HEADER_SIZE);

        let record_size = computed_record_size(&coeff_info, &libration_info);
        let padding = record_size * 8 - HEADER_SIZE;
        buf.extend(std::iter::repeat(0u8).take(padding));
        buf.extend(std::iter::repeat(0u8).take(record_size * 8));

        put_f64(&mut buf, SYN_START_DATE);
        put_f64(&mut buf, end_date);

        let mut record_coeffs = vec![0.0_f64; record_size - 2];
        let mercury = coeff_info[MERCURY];
        let granule_stride = mercury.n_coeffs * 3;
        // Granule 0, X axis: c0=1.0, c1=2.0 -> value 3.0 at u=1.
        record_coeffs[mercury.offset] = 1.0;
        record_coeffs[mercury.offset + 1] = 2.0;
        // Granule 1, X axis: c0=1.0, c1=-2.0 -> value 3.0 at u=-1.
        record_coeffs[mercury.offset + granule_stride] = 1.0;
        record_coeffs[mercury.offset + granule_stride + 1] = -2.0;
        // Y and Z: same constant term in both granules.
        for granule in 0..2 {
            let base = mercury.offset + granule * granule_stride;
            record_coeffs[base + mercury.n_coeffs] = 5.0;
            record_coeffs[base + 2 * mercury.n_coeffs] = 5.0;
        }
        for v in record_coeffs {
            put_f64(&mut buf, v);
        }

        let eph = JplEphemeris::load(&buf[..]).unwrap();

        let just_before_boundary = eph.planet_position(JplEphItem::Mercury, SYN_START_DATE + 16.0 - 1e-9);
        let at_boundary = eph.planet_position(JplEphItem::Mercury, SYN_START_DATE + 16.0);
        assert_abs_diff_eq!(
            (just_before_boundary - at_boundary).norm(),
            0.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(at_boundary.y, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(at_boundary.z, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_zero_n_granules_at_load() {
        let mut buf = Vec::new();
        buf.extend(std::iter::repeat(0u8).take(N_LABELS * LABEL_SIZE));
        buf.extend(std::iter::repeat(0u8).take(N_CONST_NAMES * CONST_NAME_SIZE));

        let put_f64 = |buf: &mut Vec<u8>, v: f64| buf.extend_from_slice(&v.to_ne_bytes());
        let put_u32 = |buf: &mut Vec<u8>, v: u32| buf.extend_from_slice(&v.to_ne_bytes());

        put_f64(&mut buf, SYN_START_DATE);
        put_f64(&mut buf, SYN_START_DATE + SYN_DAYS_PER_INTERVAL);
        put_f64(&mut buf, SYN_DAYS_PER_INTERVAL);
        put_u32(&mut buf, 0);
        put_f64(&mut buf, 1.495_978_71e8);
        put_f64(&mut buf, SYN_EMRAT);

        // Mercury: a well-formed nCoeffs but an invalid nGranules of 0.
        put_u32(&mut buf, 3);
        put_u32(&mut buf, SYN_N_COEFFS as u32);
        put_u32(&mut buf, 0);
        for _ in 1..N_ITEMS {
            put_u32(&mut buf, 3);
            put_u32(&mut buf, SYN_N_COEFFS as u32);
            put_u32(&mut buf, SINGLE_SPAN);
        }
        put_u32(&mut buf, 405);
        put_u32(&mut buf, 3);
        put_u32(&mut buf, SYN_N_COEFFS as u32);
        put_u32(&mut buf, SINGLE_SPAN);

        assert_eq!(buf.len(), HEADER_SIZE);
        assert!(matches!(
            JplEphemeris::load(&buf[..]),
            Err(LoadError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_unrecognized_de_num() {
        let mut bytes = vec![0u8; HEADER_SIZE];
        // A deNum that looks valid in neither byte order.
        bytes[DE_NUM_OFFSET..DE_NUM_OFFSET + 4].copy_from_slice(&7u32.to_ne_bytes());
        assert!(matches!(
            JplEphemeris::load(&bytes[..]),
            Err(LoadError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn constant_series_position_matches_coefficients() {
        let synth = SyntheticEphemeris::build(405, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        let pos = eph.planet_position(JplEphItem::Mercury, 2451550.0);
        assert_abs_diff_eq!(pos.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.y, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.z, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn planet_position_at_epoch_matches_jde_tdb_conversion() {
        let synth = SyntheticEphemeris::build(405, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        let epoch = Epoch::from_jde_tdb(2451550.0);
        let by_epoch = eph.planet_position_at_epoch(JplEphItem::Mercury, epoch);
        let by_tjd = eph.planet_position(JplEphItem::Mercury, 2451550.0);
        assert_abs_diff_eq!((by_epoch - by_tjd).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn ssb_is_always_the_origin() {
        let synth = SyntheticEphemeris::build(405, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        let pos = eph.planet_position(JplEphItem::Ssb, 2451560.0);
        assert_eq!(pos, Vector3::zeros());
    }

    #[test]
    fn earth_equals_emb_minus_scaled_moon() {
        let synth = SyntheticEphemeris::build(
            405,
            false,
            &[
                (EARTH_MOON_BARY, [10.0, 20.0, 30.0]),
                (MOON, [1.0, 1.0, 1.0]),
            ],
            1,
        );
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        let emb = eph.planet_position(JplEphItem::EarthMoonBary, 2451550.0);
        let moon = eph.planet_position(JplEphItem::Moon, 2451550.0);
        let earth = eph.planet_position(JplEphItem::Earth, 2451550.0);
        assert_abs_diff_eq!(
            (earth + moon * (1.0 / (SYN_EMRAT + 1.0)) - emb).norm(),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn covers_respects_date_range() {
        let synth = SyntheticEphemeris::build(405, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        assert!(eph.covers(eph.start_date()));
        assert!(eph.covers(eph.end_date()));
        assert!(!eph.covers(eph.start_date() - 1.0));
        assert!(!eph.covers(eph.end_date() + 1.0));
    }

    #[test]
    fn out_of_range_query_clamps_instead_of_panicking() {
        let synth = SyntheticEphemeris::build(405, false, &[(MERCURY, [1.0, 2.0, 3.0])], 2);
        let eph = JplEphemeris::load(&synth.bytes[..]).unwrap();
        let before = eph.planet_position(JplEphItem::Mercury, eph.start_date() - 1000.0);
        let at_start = eph.planet_position(JplEphItem::Mercury, eph.start_date());
        assert_eq!(before, at_start);
    }
}
