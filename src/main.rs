use std::error::Error as _;
use std::process::ExitCode;

use uor_sample_client::cli::{Args, Runner};
use uor_sample_client::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse_args();
    logging::init_logging(args.verbosity());

    match Runner::new(args).run().await {
        Ok(Some(output)) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("\tcaused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
