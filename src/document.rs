use crate::TranslationError;
use crate::generator::{Generator, GeneratorBuilder};
use crate::parser::{Parser, Segment};
use crate::translator::BatchTranslator;
use crate::utils::suffixed_output_path;
use std::path::{Path, PathBuf};

/// Translates a whole document in a single batch and writes it next to the input.
pub struct DocumentTranslationService<P, GB, T> {
    pub parser: P,
    pub generator_builder: GB,
    pub translator: T,
    pub target_lang: String,
}

impl<P, GB, T> DocumentTranslationService<P, GB, T>
where
    P: Parser,
    GB: GeneratorBuilder,
    T: BatchTranslator,
{
    /// Blank paragraphs are dropped, so the output may be shorter than the input.
    pub async fn process_document(&self, input: &Path) -> Result<PathBuf, TranslationError> {
        if !input.exists() {
            return Err(TranslationError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {:?}", input),
            )));
        }

        let paragraphs = self
            .parser
            .parse(input)
            .await
            .map_err(TranslationError::ParseError)?
            .into_iter()
            .filter(|p| !p.is_blank())
            .collect::<Vec<Segment>>();
        log::info!("Read {} paragraphs from {:?}", paragraphs.len(), input);

        let outcome = self.translator.translate_batch(&paragraphs).await?;
        if outcome.is_fallback() {
            log::warn!("Translation unavailable, writing the original text");
        }

        let output = suffixed_output_path(input, &self.target_lang);
        let mut generator = self.generator_builder.build(&output).await?;
        for paragraph in outcome.into_segments() {
            generator.write(paragraph)?;
        }
        generator.finalize().await?;

        log::info!("Wrote {:?}", output);
        Ok(output)
    }
}
