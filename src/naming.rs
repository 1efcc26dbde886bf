//! Centralized filename parsing for microscope export names.
//!
//! Every image exported by the acquisition software encodes its metadata
//! directly in the file name:
//!
//! ```text
//! 250101-P013839_B02_s4_w2.tif
//! ^^^^^^ ^^^^^^^ ^^^ ^^ ^^
//! date   barcode │   │  └ channel (single digit)
//!                │   └ site within the well
//!                └ well (row A-P + two-digit column)
//! ```
//!
//! Some instruments omit the `YYMMDD-` prefix, so a relaxed pattern without
//! the date exists as a fallback. The barcode capture is greedy: in
//! `250101-BC_1_A01_s1_w1.tif` the barcode is `BC_1`, not `BC`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static IMAGE_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>[0-9]{6})-(?P<barcode>.*)_(?P<well>[A-P][0-9]{2})_s(?P<site>[0-9]+)_w(?P<channel>[0-9])")
        .unwrap()
});

static IMAGE_INFO_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<barcode>.*)_(?P<well>[A-P][0-9]{2})_s(?P<site>[0-9]+)_w(?P<channel>[0-9])")
        .unwrap()
});

static THUMBNAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new("_thumb").unwrap());

/// Metadata extracted from an image file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    /// Acquisition date (`YYMMDD`). `None` when only the fallback pattern
    /// matched; the caller is expected to synthesize today's date.
    pub date: Option<String>,
    pub barcode: String,
    pub well: String,
    /// Site number as written in the name, leading zeros preserved.
    pub site: String,
    pub channel: u32,
}

impl ImageInfo {
    /// Whether the date had to be dropped to make the name parse.
    pub fn is_fallback(&self) -> bool {
        self.date.is_none()
    }
}

/// Parse an image file name against the primary pattern, then the relaxed
/// fallback without the date prefix. Returns `None` when neither matches.
pub fn parse_image_name(filename: &str) -> Option<ImageInfo> {
    if let Some(caps) = IMAGE_INFO.captures(filename) {
        return Some(ImageInfo {
            date: Some(caps["date"].to_string()),
            barcode: caps["barcode"].to_string(),
            well: caps["well"].to_string(),
            site: caps["site"].to_string(),
            channel: caps["channel"].parse().ok()?,
        });
    }
    let caps = IMAGE_INFO_FALLBACK.captures(filename)?;
    Some(ImageInfo {
        date: None,
        barcode: caps["barcode"].to_string(),
        well: caps["well"].to_string(),
        site: caps["site"].to_string(),
        channel: caps["channel"].parse().ok()?,
    })
}

/// Instruments drop `*_thumb*` preview files next to the real exports;
/// the substring can appear anywhere in the name.
pub fn is_thumbnail(filename: &str) -> bool {
    THUMBNAIL.is_match(filename)
}

/// Only TIFF exports are image-set material.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_parses_all_fields() {
        let info = parse_image_name("250101-BC1_A01_s1_w1.tif").unwrap();
        assert_eq!(info.date.as_deref(), Some("250101"));
        assert_eq!(info.barcode, "BC1");
        assert_eq!(info.well, "A01");
        assert_eq!(info.site, "1");
        assert_eq!(info.channel, 1);
        assert!(!info.is_fallback());
    }

    #[test]
    fn dateless_name_uses_fallback() {
        let info = parse_image_name("BC1_A01_s1_w1.tif").unwrap();
        assert_eq!(info.date, None);
        assert_eq!(info.barcode, "BC1");
        assert_eq!(info.well, "A01");
        assert_eq!(info.site, "1");
        assert_eq!(info.channel, 1);
        assert!(info.is_fallback());
    }

    #[test]
    fn barcode_capture_is_greedy() {
        let info = parse_image_name("250101-BC_1_A01_s1_w1.tif").unwrap();
        assert_eq!(info.barcode, "BC_1");
        assert_eq!(info.well, "A01");
    }

    #[test]
    fn multi_digit_site() {
        let info = parse_image_name("250101-BC1_A01_s12_w3.tif").unwrap();
        assert_eq!(info.site, "12");
        assert_eq!(info.channel, 3);
    }

    #[test]
    fn site_leading_zeros_preserved() {
        let info = parse_image_name("250101-BC1_A01_s02_w1.tif").unwrap();
        assert_eq!(info.site, "02");
    }

    #[test]
    fn well_row_out_of_range_rejected() {
        // Q is past the 384-well plate row range A-P
        assert_eq!(parse_image_name("250101-BC1_Q01_s1_w1.tif"), None);
    }

    #[test]
    fn unstructured_name_rejected() {
        assert_eq!(parse_image_name("randomfile.tif"), None);
    }

    #[test]
    fn short_date_falls_back_with_date_in_barcode() {
        // Five leading digits do not form a date; the greedy fallback barcode
        // swallows them instead.
        let info = parse_image_name("25011-BC1_A01_s1_w1.tif").unwrap();
        assert!(info.is_fallback());
        assert_eq!(info.barcode, "25011-BC1");
    }

    #[test]
    fn thumbnail_substring_detected_anywhere() {
        assert!(is_thumbnail("foo_thumb.tif"));
        assert!(is_thumbnail("250101-BC1_A01_s1_w1_thumb4B.tif"));
        assert!(!is_thumbnail("250101-BC1_A01_s1_w1.tif"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_image_extension(Path::new("a.tif")));
        assert!(has_image_extension(Path::new("a.TIFF")));
        assert!(!has_image_extension(Path::new("a.png")));
        assert!(!has_image_extension(Path::new("tif")));
    }
}
