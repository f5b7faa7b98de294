//! Version command implementation
//!
//! Displays version information about Booktally.

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    output.header("📚 Booktally Version Information");

    output.status_indicator(
        "VERSION",
        &format!("{} v{}", crate::PKG_NAME, crate::VERSION),
        true,
    );
    output.blank_line();

    output.category("About");
    output.key_value("Description:", crate::PKG_DESCRIPTION, false);
    output.blank_line();

    output.category("Build Information");
    output.key_value("Rust edition:", "2024", false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );

    output.blank_line();
    output.success("💡 Run 'booktally --help' for usage information");

    Ok(())
}
