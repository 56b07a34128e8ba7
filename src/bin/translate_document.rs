use polyglot::config::{self, DocumentConfig};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match config::load().and_then(|c| DocumentConfig::from_config(&c)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match polyglot::translate_document(&cfg).await {
        Ok(output) => println!("Success! Document saved at: {}", output.display()),
        Err(e) => println!("Critical Failure: {}", e),
    }
    ExitCode::SUCCESS
}
