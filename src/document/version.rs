//! CIF version detection.

/// The CIF dialect a document was parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Cif1_1,
    Cif2_0,
}

/// The exact magic sequence that marks a document as CIF 2.0: the
/// byte sequence `#\#CIF_2.0` at file start, before any whitespace
/// other than the trailing newline.
const MAGIC: &str = "#\\#CIF_2.0";

impl Version {
    pub fn is_cif1(&self) -> bool {
        matches!(self, Version::Cif1_1)
    }

    pub fn is_cif2(&self) -> bool {
        matches!(self, Version::Cif2_0)
    }

    /// Detects the version from the first line of `text`: CIF 2.0 iff
    /// the first line, with trailing whitespace stripped, is exactly
    /// the magic pragma; CIF 1.1 otherwise.
    pub fn detect(text: &str) -> Version {
        let first_line = text.lines().next().unwrap_or("");
        if first_line.trim_end() == MAGIC {
            Version::Cif2_0
        } else {
            Version::Cif1_1
        }
    }
}
