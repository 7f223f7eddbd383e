pub mod cli;
pub mod commands;

/// Line printed to stderr before exiting with status 1.
pub fn exit_message(err: &anyhow::Error) -> String {
    format!("Exiting with error: {}", stamp::error_chain(&**err))
}
