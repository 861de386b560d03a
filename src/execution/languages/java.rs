//! Java profile
//!
//! `javac` requires the file name to match the public class, so the class
//! name is read from the source before the command is built.

use std::sync::LazyLock;

use regex::Regex;

use super::{Language, LanguageProfile};
use crate::{constants::DEFAULT_SANDBOX_TIMEOUT_MS, execution::shell};

pub static PROFILE: LanguageProfile = LanguageProfile::new(
    Language::Java,
    "amazoncorretto:17",
    DEFAULT_SANDBOX_TIMEOUT_MS,
    build_command,
);

/// Class name used when the source declares no public class
pub const DEFAULT_CLASS_NAME: &str = "Solution";

static PUBLIC_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+class\s+([A-Za-z_$][A-Za-z0-9_$]*)").expect("Invalid class pattern")
});

/// Name of the first public class declared in `code`
pub fn entry_class(code: &str) -> &str {
    PUBLIC_CLASS
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map_or(DEFAULT_CLASS_NAME, |m| m.as_str())
}

fn build_command(code: &str, stdin: Option<&str>) -> String {
    let class = entry_class(code);
    let compile = format!(
        "{} > /tmp/{class}.java && cd /tmp && javac {class}.java",
        shell::print_literal(code)
    );

    match stdin {
        Some(input) => format!("{compile} && {} | java {class}", shell::print_literal(input)),
        None => format!("{compile} && java {class}"),
    }
}
