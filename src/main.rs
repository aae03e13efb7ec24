// SPDX-License-Identifier: MPL-2.0
use folio_lens::app::{self, command, USAGE};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let (flags, command) = match command::from_env() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = app::startup(&flags);
    match app::run(&flags, &command, config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, key = err.message_key(), "command failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
