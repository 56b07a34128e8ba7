use super::{Parser, Segment};
use crate::ParseError;

use std::path::Path;

pub struct DocxParser;

impl DocxParser {
    pub const SUPPORTED_FORMATS: [&'static str; 1] = ["docx"];
}

impl Parser for DocxParser {
    async fn parse(&self, input: &Path) -> Result<Vec<Segment>, ParseError> {
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !Self::SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(ParseError::UnsupportedFormatError {
                supported_formats: Self::SUPPORTED_FORMATS.map(str::to_owned).to_vec(),
            });
        }

        let input = input.to_path_buf();
        let paragraphs = tokio::task::spawn_blocking(move || crate::docx::read_paragraphs(&input))
            .await
            .map_err(|e| ParseError::OtherError(e.into()))?
            .map_err(ParseError::OtherError)?;

        Ok(paragraphs.into_iter().map(Segment).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn create_docx_with_paragraphs(dir: &TempDir, paragraphs: &[&str]) -> PathBuf {
        let file_path = dir.path().join("test.docx");
        let paragraphs = paragraphs.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        crate::docx::write_paragraphs(&file_path, &paragraphs).unwrap();
        file_path
    }

    #[tokio::test]
    async fn parse_valid_docx_file() {
        let dir = tempdir().unwrap();
        let input_path =
            create_docx_with_paragraphs(&dir, &["This is a test document.", "", "It has two paragraphs."]);

        let segments = DocxParser.parse(&input_path).await.unwrap();

        assert_eq!(
            segments,
            vec![
                Segment::from("This is a test document."),
                Segment::from(""),
                Segment::from("It has two paragraphs."),
            ]
        );
    }

    #[tokio::test]
    async fn parse_empty_docx_file() {
        let dir = tempdir().unwrap();
        let input_path = create_docx_with_paragraphs(&dir, &[]);

        let segments = DocxParser.parse(&input_path).await.unwrap();

        assert!(segments.is_empty());
    }

    #[tokio::test]
    async fn parse_rejects_other_formats() {
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("notes.md");
        std::fs::write(&input_path, "# Notes").unwrap();

        let result = DocxParser.parse(&input_path).await;

        assert!(matches!(
            result,
            Err(ParseError::UnsupportedFormatError { supported_formats }) if supported_formats == ["docx"]
        ));
    }

    #[tokio::test]
    async fn parse_corrupt_docx_file() {
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("broken.docx");
        std::fs::write(&input_path, "not a zip").unwrap();

        let result = DocxParser.parse(&input_path).await;

        assert!(matches!(result, Err(ParseError::OtherError(_))));
    }
}
