//! The `gradepace subject` commands.

use anyhow::Result;

use crate::session::Session;
use crate::SubjectCommand;

pub fn execute(session: &Session, command: SubjectCommand) -> Result<()> {
    match command {
        SubjectCommand::Add { name } => {
            let state = session.update(|s| s.add_subject(&name))?;
            println!("Added subject {} ({} subjects)", name.trim(), state.subjects.len());
        }
        SubjectCommand::Remove { name } => {
            session.update(|s| s.remove_subject(&name))?;
            println!("Removed subject {name}");
        }
        SubjectCommand::Rename { from, to } => {
            session.update(|s| s.rename_subject(&from, &to))?;
            println!("Renamed subject {from} to {}", to.trim());
        }
    }
    Ok(())
}
