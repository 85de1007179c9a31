use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match certinfo::cli::start().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
