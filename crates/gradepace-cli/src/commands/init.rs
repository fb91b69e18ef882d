//! The `gradepace init` command.

use std::path::Path;

use anyhow::Result;

use gradepace_core::model::ProgressState;

use crate::session::Session;

pub fn execute(session: &Session) -> Result<()> {
    if Path::new("gradepace.toml").exists() {
        println!("gradepace.toml already exists, skipping.");
    } else {
        std::fs::write("gradepace.toml", SAMPLE_CONFIG)?;
        println!("Created gradepace.toml");
    }

    let state_file = session.state_file();
    if state_file.exists() {
        println!("{} already exists, skipping.", state_file.display());
    } else {
        session.save(&ProgressState::fresh())?;
        println!("Created {}", state_file.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: gradepace subject rename \"Subject 1\" <your subject>");
    println!("  2. Run: gradepace score --subject <subject> --assessment CIA1 --value <marks>");
    println!("  3. Run: gradepace status");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradepace configuration

# Where the snapshot is stored. ${VAR} references are expanded.
state_file = "./gradepace.json"

# Accept scores above an assessment's max (bonus marks).
allow_over_max = true

# How scores follow a replaced template: "name" or "position".
reconcile = "name"

# Where `gradepace report` writes files.
output_dir = "./gradepace-reports"
"#;
