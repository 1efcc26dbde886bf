//! # imageset-list
//!
//! Generates a CellProfiler-style image set list from a directory tree of
//! microscopy exports. Your filesystem is the data source: acquisition date,
//! plate barcode, well, site and channel are all parsed straight out of the
//! image file names, and every imaged site becomes one CSV row pointing at
//! its per-channel files.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan     input/   →  ImageIndex      (walk tree, parse names, group)
//! 2. Render   index    →  ImageSetList    (header + one row per site)
//! 3. Write    list     →  ImageSetList_<barcode>.csv
//! ```
//!
//! The scan buffers everything into an in-memory index before any output is
//! rendered, so an unparseable file name aborts the run with nothing written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `YYMMDD-BARCODE_WELL_sSITE_wCHANNEL` grammar, thumbnail and extension filters |
//! | [`scan`] | Walks the input tree, parses names, assembles the grouping index |
//! | [`index`] | Four-level date → barcode → well → site → channel mapping |
//! | [`channels`] | Slot `wN` → stain name mapping, default Cell Painting panel |
//! | [`manifest`] | CSV header and row rendering, output file writing |
//!
//! # Ordering
//!
//! Rows are emitted in ascending (date, barcode, well, site) order and the
//! per-site channel entries in ascending channel order. Sites and channels
//! sort numerically (site `s2` before `s10`), everything else as strings.

pub mod channels;
pub mod index;
pub mod manifest;
pub mod naming;
pub mod scan;
