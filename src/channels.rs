//! Channel name mapping: slot `wN` → human-readable stain name.
//!
//! The names come either from a caller-supplied comma-separated list or from
//! the default Cell Painting panel. They are kept as an ordered `Vec`, so
//! slot labels (`w1`, `w2`, ...) are numeric by construction and a 10th
//! channel cannot sort between `w1` and `w2`.
//!
//! The number of names caps the manifest width: only the first N channels of
//! each site are emitted.

/// Default Cell Painting stain panel, channels w1 through w5.
pub const DEFAULT_CHANNEL_NAMES: &[&str] =
    &["HOECHST", "SYTO", "MITO", "CONCAVALIN", "PHALLOIDINandWGA"];

/// Ordered channel display names; entry 0 is slot `w1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelNames {
    names: Vec<String>,
}

impl ChannelNames {
    /// Build from a comma-separated list, assigned in order to w1, w2, w3...
    pub fn from_list(list: &str) -> Self {
        ChannelNames {
            names: list.split(',').map(str::to_string).collect(),
        }
    }

    /// Number of named channels; also the per-site channel cap.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot label and name pairs in slot order: ("w1", name), ("w2", name)...
    pub fn slots(&self) -> impl Iterator<Item = (String, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (format!("w{}", i + 1), name.as_str()))
    }
}

impl Default for ChannelNames {
    fn default() -> Self {
        ChannelNames {
            names: DEFAULT_CHANNEL_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
