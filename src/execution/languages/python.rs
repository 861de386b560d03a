//! Python profile
//!
//! Without input the source is passed straight to `python3 -c`. With input
//! stdin is taken by the pipe, so the source goes to a file first.

use super::{Language, LanguageProfile};
use crate::{constants::DEFAULT_SANDBOX_TIMEOUT_MS, execution::shell};

pub static PROFILE: LanguageProfile = LanguageProfile::new(
    Language::Python,
    "python:3.11",
    DEFAULT_SANDBOX_TIMEOUT_MS,
    build_command,
);

const SOURCE_PATH: &str = "/tmp/code.py";

fn build_command(code: &str, stdin: Option<&str>) -> String {
    match stdin {
        Some(input) => format!(
            "{} > {SOURCE_PATH} && {} | python3 {SOURCE_PATH}",
            shell::print_literal(code),
            shell::print_literal(input)
        ),
        None => format!("python3 -c {}", shell::single_quote(code)),
    }
}
