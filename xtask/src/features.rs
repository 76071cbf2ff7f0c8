use std::process::Command;

use anyhow::{Context, Result};

/// Feature sets checked with `--no-default-features`, so each entry is
/// exactly what gets compiled.
const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // bare: collections and errors only
    &["foundation"],
    &["observability"],
    &["foundation", "observability"], // default
    &["test-utils"],
    &["foundation", "observability", "test-utils"],
];

const PACKAGE: &str = "ringlink-queues";

/// Check that all supported feature combinations compile successfully.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} {PACKAGE} feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let display_label = if features.is_empty() { "none".to_string() } else { joined.clone() };

        println!(
            "\n[{}/{}] cargo check -p {PACKAGE} --no-default-features{}",
            index + 1,
            FEATURE_COMBINATIONS.len(),
            if features.is_empty() { String::new() } else { format!(" --features {joined}") }
        );

        let mut command = Command::new("cargo");
        command.args(["check", "-p", PACKAGE, "--no-default-features"]);

        if !features.is_empty() {
            command.arg("--features").arg(joined.as_str());
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to run cargo check for '{display_label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{display_label}' failed to compile");
        }

        println!("✅ Features '{display_label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
