//! Binary entrypoint for the `taskpulse` CLI.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Secrets (CLICKUP_TOKEN, OPENAI_API_KEY) may come from a .env file.
    let _ = dotenvy::dotenv();

    match taskpulse::run(std::env::args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
