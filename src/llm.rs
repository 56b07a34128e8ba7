pub mod azure;
#[cfg(test)]
pub mod dummy;

use super::LLMError;

pub trait LLMBuilder {
    type Built: LLM;

    fn build(&self) -> Result<Self::Built, LLMError>;
}

pub trait LLM {
    /// Translates `text` into `target_language`, answering in Markdown.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, LLMError>;
}

fn system_prompt(target_language: &str) -> String {
    format!(
        r#"
You are an expert technical translator.
Translate the provided text to {}.
Maintain the technical terms in English where appropriate.
Output the result strictly in valid Markdown format.
"#,
        target_language
    )
    .trim()
    .replace('\n', " ")
}
