//! In-memory grouping of scanned images into per-site image sets.
//!
//! A flat stream of parsed files is inserted into an explicit four-level
//! mapping: date → barcode → well → site → (channel → record). Iterating the
//! index yields one entry per imaged site in fully sorted order, which is the
//! row order of the emitted manifest.
//!
//! Dates, barcodes and wells sort as strings (`YYMMDD` and `A01`-style keys
//! order correctly that way). Sites and channels sort numerically, so site
//! `s2` comes before `s10` even though the raw site text is preserved for
//! output.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One scanned image file: its base name and absolute parent directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub filename: String,
    pub directory: PathBuf,
}

/// Site identifier ordering numerically first, raw text as tiebreak.
///
/// Site numbers come from file names as strings (`"2"`, `"02"`, `"10"`).
/// Plain string ordering would put `"10"` before `"2"`; keying on the parsed
/// number fixes that while keeping distinct spellings distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SiteKey {
    number: u64,
    raw: String,
}

impl SiteKey {
    pub fn new(raw: &str) -> Self {
        SiteKey {
            number: raw.parse().unwrap_or(u64::MAX),
            raw: raw.to_string(),
        }
    }

    /// The site number exactly as it appeared in the file name.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Full grouping key for one image file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageKey {
    pub date: String,
    pub barcode: String,
    pub well: String,
    pub site: SiteKey,
    pub channel: u32,
}

type ChannelMap = BTreeMap<u32, ImageRecord>;
type SiteMap = BTreeMap<SiteKey, ChannelMap>;
type WellMap = BTreeMap<String, SiteMap>;
type BarcodeMap = BTreeMap<String, WellMap>;

/// The four-level grouping structure, built in one pass over the scanned
/// files and consumed once when rendering the manifest.
#[derive(Debug, Default)]
pub struct ImageIndex {
    dates: BTreeMap<String, BarcodeMap>,
}

/// One imaged site: a (date, barcode, well, site) key plus the channel
/// records collected under it.
#[derive(Debug, Clone, Copy)]
pub struct SiteEntry<'a> {
    pub date: &'a str,
    pub barcode: &'a str,
    pub well: &'a str,
    pub site: &'a SiteKey,
    pub channels: &'a BTreeMap<u32, ImageRecord>,
}

impl ImageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at its key path. Returns the previously stored record
    /// when the exact (date, barcode, well, site, channel) slot was already
    /// occupied, so callers can surface the collision; the new record wins.
    pub fn insert(&mut self, key: ImageKey, record: ImageRecord) -> Option<ImageRecord> {
        self.dates
            .entry(key.date)
            .or_default()
            .entry(key.barcode)
            .or_default()
            .entry(key.well)
            .or_default()
            .entry(key.site)
            .or_default()
            .insert(key.channel, record)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of distinct (date, barcode, well, site) keys, i.e. the number
    /// of manifest rows this index will produce.
    pub fn site_count(&self) -> usize {
        self.sites().count()
    }

    /// All sites in ascending (date, barcode, well, site) order.
    pub fn sites(&self) -> impl Iterator<Item = SiteEntry<'_>> {
        self.dates.iter().flat_map(|(date, barcodes)| {
            barcodes.iter().flat_map(move |(barcode, wells)| {
                wells.iter().flat_map(move |(well, sites)| {
                    sites.iter().map(move |(site, channels)| SiteEntry {
                        date,
                        barcode,
                        well,
                        site,
                        channels,
                    })
                })
            })
        })
    }
}
