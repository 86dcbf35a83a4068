use std::collections::BTreeSet;

pub const DEFAULT_FORMAT: &str = "pdf";

/// The file formats a record may carry. Entries are stored lowercase and
/// compared exactly against a candidate's format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSet {
    formats: BTreeSet<String>,
}

impl Default for FormatSet {
    fn default() -> Self {
        Self::new([DEFAULT_FORMAT])
    }
}

impl FormatSet {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let formats = formats
            .into_iter()
            .map(|f| f.as_ref().trim().to_ascii_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        Self { formats }
    }

    pub fn contains(&self, format: &str) -> bool {
        self.formats.contains(format)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.formats.iter().map(String::as_str)
    }

    /// Sniffs the format of a file body from its magic bytes.
    pub fn detect(data: &[u8]) -> Option<String> {
        let kind = infer::get(data)?;
        let format = match kind.mime_type() {
            "image/jpeg" => "jpeg",
            "image/tiff" => "tiff",
            _ => kind.extension(),
        };
        Some(format.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_only_pdf() {
        let formats = FormatSet::default();
        assert!(formats.contains("pdf"));
        assert!(!formats.contains("mp3"));
        assert_eq!(formats.iter().collect::<Vec<_>>(), vec!["pdf"]);
    }

    #[test]
    fn entries_are_normalized() {
        let formats = FormatSet::new([" PDF", "png ", ""]);
        assert_eq!(formats.iter().collect::<Vec<_>>(), vec!["pdf", "png"]);
        assert!(!formats.contains("PDF"));
    }

    #[test]
    fn detects_pdf_body() {
        assert_eq!(FormatSet::detect(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n"), Some("pdf".to_string()));
        assert_eq!(FormatSet::detect(b"plain text"), None);
    }
}
