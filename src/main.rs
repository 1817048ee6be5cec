use std::process::ExitCode;

use peakusage::adapter::inbound::cli::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    run::execute(std::env::args_os()).await
}
