use super::{Generator, GeneratorBuilder};
use crate::TranslationError;
use crate::parser::Segment;

use std::path::{Path, PathBuf};

pub struct DocxGeneratorBuilder;

impl GeneratorBuilder for DocxGeneratorBuilder {
    type Built = DocxGenerator;

    async fn build(&self, output_path: &Path) -> Result<Self::Built, TranslationError> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(TranslationError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Output directory not found: {:?}", parent),
                )));
            }
        }

        Ok(DocxGenerator {
            output_path: output_path.to_owned(),
            paragraphs: vec![],
        })
    }
}

/// Collects paragraphs in memory; the package is only written on [`Generator::finalize`].
pub struct DocxGenerator {
    output_path: PathBuf,
    paragraphs: Vec<String>,
}

impl Generator for DocxGenerator {
    fn write(&mut self, paragraph: Segment) -> Result<(), TranslationError> {
        self.paragraphs.push(paragraph.0);
        Ok(())
    }

    async fn finalize(&mut self) -> Result<(), TranslationError> {
        let output_path = self.output_path.clone();
        let paragraphs = std::mem::take(&mut self.paragraphs);

        // Created from scratch every time
        tokio::task::spawn_blocking(move || crate::docx::write_paragraphs(&output_path, &paragraphs))
            .await
            .map_err(|e| TranslationError::OtherError(e.into()))?
            .map_err(TranslationError::OtherError)?;

        Ok(())
    }
}
