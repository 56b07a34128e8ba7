pub mod docx;

use crate::TranslationError;
use crate::parser::Segment;
use std::path::Path;

pub trait GeneratorBuilder {
    type Built: Generator;

    async fn build(&self, output_path: &Path) -> Result<Self::Built, TranslationError>;
}

pub trait Generator {
    fn write(&mut self, paragraph: Segment) -> Result<(), TranslationError>;

    async fn finalize(&mut self) -> Result<(), TranslationError>;
}
