//! The `drillcard init` command.

use anyhow::Result;

use drillcard_core::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new(LOCAL_CONFIG_FILE);
    if path.exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Created {LOCAL_CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Edit {LOCAL_CONFIG_FILE} to choose your range and operation");
    println!("  2. Run: drillcard validate");
    println!("  3. Run: drillcard play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# drillcard configuration
#
# Values outside the allowed range are clamped, not rejected.
# DRILLCARD_MAX, DRILLCARD_FOCUS and DRILLCARD_OPERATION override this file;
# command-line flags override both.

[drill]
# Largest operand to practise, 1 to 15.
max_operand = 9

# Pin one operand to drill a single table (the first factor, or the divisor).
# focus = 7

# "multiplication" or "division"
operation = "multiplication"
"#;
