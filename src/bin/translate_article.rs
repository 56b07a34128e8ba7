use polyglot::ArticleError;
use polyglot::config::{self, ArticleConfig};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match config::load().and_then(|c| ArticleConfig::from_config(&c)) {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("Workflow failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match polyglot::translate_article(&cfg).await {
        Ok(article) => {
            println!("\nRESULT:\n");
            println!("{}", article);
            ExitCode::SUCCESS
        }
        Err(ArticleError::Extraction(_) | ArticleError::EmptyContent) => {
            println!("Failed to extract content from URL");
            ExitCode::FAILURE
        }
        Err(ArticleError::Translation(_) | ArticleError::EmptyTranslation) => {
            println!("Translation failed");
            ExitCode::FAILURE
        }
        Err(e @ ArticleError::Setup(_)) => {
            println!("Workflow failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
