//! C++ profile

use super::{Language, LanguageProfile};
use crate::{constants::DEFAULT_SANDBOX_TIMEOUT_MS, execution::shell};

pub static PROFILE: LanguageProfile =
    LanguageProfile::new(Language::Cpp, "gcc:latest", DEFAULT_SANDBOX_TIMEOUT_MS, build_command);

const SOURCE_PATH: &str = "/tmp/code.cpp";
const BINARY_PATH: &str = "/tmp/code";

fn build_command(code: &str, stdin: Option<&str>) -> String {
    let compile = format!(
        "{} > {SOURCE_PATH} && g++ -o {BINARY_PATH} {SOURCE_PATH}",
        shell::print_literal(code)
    );

    match stdin {
        Some(input) => format!("{compile} && {} | {BINARY_PATH}", shell::print_literal(input)),
        None => format!("{compile} && {BINARY_PATH}"),
    }
}
