use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match vocab_review::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
