//! The `gradepace target` command.

use anyhow::Result;

use crate::session::Session;

pub fn execute(session: &Session, pct: u32) -> Result<()> {
    let state = session.update(|s| s.with_target(pct))?;
    println!("Target set to {}%", state.target_pct);
    Ok(())
}
