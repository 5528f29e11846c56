/// Formats the service packages releases in.
pub const FORMATS: [&str; 4] = ["aiff", "flac", "mp3", "wav"];

/// Per-run download choices, captured once before the first release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Preferred format; releases without it fall back to an operator choice.
    pub format: String,
    /// Expand each archive and delete it afterwards.
    pub unpack: bool,
    /// Ask before downloading each release.
    pub confirm_each: bool,
}

impl DownloadSettings {
    pub fn new(format: impl Into<String>, unpack: bool) -> Self {
        Self {
            format: format.into(),
            unpack,
            confirm_each: false,
        }
    }

    pub fn confirm_each(mut self, confirm_each: bool) -> Self {
        self.confirm_each = confirm_each;
        self
    }
}
