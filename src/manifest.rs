//! Image set list rendering — the CSV manifest CellProfiler loads.
//!
//! # Row Layout
//!
//! One header line, then one data line per imaged site, in ascending
//! (date, barcode, well, site) order:
//!
//! ```text
//! FileName_w1_HOECHST,...,Group_Index,Group_Number,ImageNumber,
//! Metadata_Barcode,Metadata_Site,Metadata_Well,PathName_w1_HOECHST,...,
//! URL_w1_HOECHST,...
//! ```
//!
//! `Group_Number` is always 1; `Group_Index` and `ImageNumber` are the same
//! 1-based running counter over the sorted rows. Per-site channel entries are
//! emitted in ascending channel order, capped at the number of named
//! channels. Fields are joined with bare commas — no quoting, matching what
//! the downstream pipeline expects.
//!
//! # Architecture
//!
//! [`render`] is pure (index + channel names → [`ImageSetList`]) so tests can
//! assert on exact lines; [`ImageSetList::write_to`] is the only part that
//! touches the filesystem.

use crate::channels::ChannelNames;
use crate::index::ImageIndex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A rendered manifest, not yet written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSetList {
    pub header: String,
    pub rows: Vec<String>,
    /// Barcode the output file is named after: the last barcode in iteration
    /// order (with an override in effect, the override itself).
    pub barcode: String,
}

/// Render the manifest for a grouped image index.
pub fn render(index: &ImageIndex, channels: &ChannelNames) -> ImageSetList {
    let header = render_header(channels);

    let mut rows = Vec::with_capacity(index.site_count());
    let mut barcode = String::new();
    for (counter, entry) in index.sites().enumerate() {
        let image_number = counter + 1;
        let selected: Vec<_> = entry.channels.values().take(channels.len()).collect();

        let mut fields = Vec::new();
        for record in &selected {
            fields.push(record.filename.clone());
        }
        fields.push(image_number.to_string()); // Group_Index
        fields.push("1".to_string()); // Group_Number
        fields.push(image_number.to_string()); // ImageNumber
        fields.push(entry.barcode.to_string());
        fields.push(entry.site.as_str().to_string());
        fields.push(entry.well.to_string());
        for record in &selected {
            fields.push(record.directory.display().to_string());
        }
        for record in &selected {
            fields.push(format!(
                "file:{}/{}",
                record.directory.display(),
                record.filename
            ));
        }
        rows.push(fields.join(","));
        barcode = entry.barcode.to_string();
    }

    ImageSetList {
        header,
        rows,
        barcode,
    }
}

fn render_header(channels: &ChannelNames) -> String {
    let mut columns = Vec::new();
    for (slot, name) in channels.slots() {
        columns.push(format!("FileName_{slot}_{name}"));
    }
    for fixed in [
        "Group_Index",
        "Group_Number",
        "ImageNumber",
        "Metadata_Barcode",
        "Metadata_Site",
        "Metadata_Well",
    ] {
        columns.push(fixed.to_string());
    }
    for (slot, name) in channels.slots() {
        columns.push(format!("PathName_{slot}_{name}"));
    }
    for (slot, name) in channels.slots() {
        columns.push(format!("URL_{slot}_{name}"));
    }
    columns.join(",")
}

impl ImageSetList {
    /// Output file name, derived from the barcode.
    pub fn file_name(&self) -> String {
        format!("ImageSetList_{}.csv", self.barcode)
    }

    /// The full CSV text: header plus newline-terminated data rows.
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(self.header.len() + self.rows.len() * 128);
        csv.push_str(&self.header);
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(row);
            csv.push('\n');
        }
        csv
    }

    /// Write the manifest into `output_dir` (created if missing) and return
    /// the path of the written file.
    pub fn write_to(&self, output_dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(self.file_name());
        fs::write(&path, self.to_csv())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ImageKey, ImageRecord, SiteKey};

    fn insert(index: &mut ImageIndex, barcode: &str, well: &str, site: &str, channel: u32) {
        let filename = format!("250101-{barcode}_{well}_s{site}_w{channel}.tif");
        index.insert(
            ImageKey {
                date: "250101".to_string(),
                barcode: barcode.to_string(),
                well: well.to_string(),
                site: SiteKey::new(site),
                channel,
            },
            ImageRecord {
                filename,
                directory: PathBuf::from("/data/plate"),
            },
        );
    }

    fn two_site_index() -> ImageIndex {
        let mut index = ImageIndex::new();
        insert(&mut index, "BC1", "A01", "1", 1);
        insert(&mut index, "BC1", "A01", "1", 2);
        insert(&mut index, "BC1", "A01", "2", 1);
        insert(&mut index, "BC1", "A01", "2", 2);
        index
    }

    #[test]
    fn header_lists_channels_then_metadata_then_paths_then_urls() {
        let list = render(&two_site_index(), &ChannelNames::from_list("A,B"));
        assert_eq!(
            list.header,
            "FileName_w1_A,FileName_w2_B,\
             Group_Index,Group_Number,ImageNumber,\
             Metadata_Barcode,Metadata_Site,Metadata_Well,\
             PathName_w1_A,PathName_w2_B,\
             URL_w1_A,URL_w2_B"
        );
    }

    #[test]
    fn one_row_per_site_with_running_counter() {
        let list = render(&two_site_index(), &ChannelNames::from_list("A,B"));
        assert_eq!(list.rows.len(), 2);
        assert_eq!(
            list.rows[0],
            "250101-BC1_A01_s1_w1.tif,250101-BC1_A01_s1_w2.tif,\
             1,1,1,BC1,1,A01,\
             /data/plate,/data/plate,\
             file:/data/plate/250101-BC1_A01_s1_w1.tif,\
             file:/data/plate/250101-BC1_A01_s1_w2.tif"
        );
        assert_eq!(
            list.rows[1],
            "250101-BC1_A01_s2_w1.tif,250101-BC1_A01_s2_w2.tif,\
             2,1,2,BC1,2,A01,\
             /data/plate,/data/plate,\
             file:/data/plate/250101-BC1_A01_s2_w1.tif,\
             file:/data/plate/250101-BC1_A01_s2_w2.tif"
        );
    }

    #[test]
    fn channel_cap_drops_extra_channels() {
        let mut index = ImageIndex::new();
        insert(&mut index, "BC1", "A01", "1", 1);
        insert(&mut index, "BC1", "A01", "1", 2);
        insert(&mut index, "BC1", "A01", "1", 3);

        let list = render(&index, &ChannelNames::from_list("A,B"));
        assert!(!list.rows[0].contains("_w3.tif"));
        assert!(list.rows[0].contains("_w1.tif"));
        assert!(list.rows[0].contains("_w2.tif"));
    }

    #[test]
    fn file_named_after_last_barcode() {
        let mut index = two_site_index();
        insert(&mut index, "BC2", "A01", "1", 1);

        let list = render(&index, &ChannelNames::default());
        assert_eq!(list.barcode, "BC2");
        assert_eq!(list.file_name(), "ImageSetList_BC2.csv");
    }

    #[test]
    fn csv_rows_are_newline_terminated() {
        let list = render(&two_site_index(), &ChannelNames::from_list("A,B"));
        let csv = list.to_csv();
        assert!(csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 3);
        assert_eq!(csv.lines().next().unwrap(), list.header);
    }

    #[test]
    fn write_creates_output_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("manifests");

        let list = render(&two_site_index(), &ChannelNames::from_list("A,B"));
        let path = list.write_to(&out).unwrap();
        assert_eq!(path, out.join("ImageSetList_BC1.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), list.to_csv());
    }
}
