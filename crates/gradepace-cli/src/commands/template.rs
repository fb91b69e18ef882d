//! The `gradepace template` commands.

use std::collections::HashSet;

use anyhow::{Context, Result};

use gradepace_core::model::TemplateEntry;

use crate::session::Session;
use crate::TemplateCommand;

pub fn execute(session: &Session, command: TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::Show => {
            let state = session.load()?;
            for entry in &state.template {
                println!("  {:<10} {}", entry.name, entry.max);
            }
            println!("Total: {}", state.template_total());
        }
        TemplateCommand::Add { name, max } => {
            session.update(|s| s.add_template_entry(&name, max))?;
            println!("Added {} (max {max}) to every subject", name.trim());
        }
        TemplateCommand::Remove { name } => {
            session.update(|s| s.remove_template_entry(&name))?;
            println!("Removed {name} from every subject");
        }
        TemplateCommand::Rename { from, to } => {
            session.update(|s| s.rename_template_entry(&from, &to))?;
            println!("Renamed {from} to {}", to.trim());
        }
        TemplateCommand::SetMax { name, max } => {
            let policy = session.config.score_policy();
            session.update(|s| s.set_template_max(&name, max, policy))?;
            println!("Set {name} max to {max}");
        }
        TemplateCommand::Replace { entries, policy } => {
            let template = parse_entries(&entries)?;
            let policy = policy.unwrap_or(session.config.reconcile);
            let state = session.load()?;
            let next = state.reconciled(template, policy, session.config.score_policy())?;
            session.save(&next)?;
            println!(
                "Replaced template with {} entries (total {}), scores matched by {policy}",
                next.template.len(),
                next.template_total()
            );
        }
    }
    Ok(())
}

/// Parse `NAME:MAX` pairs separated by commas.
fn parse_entries(list: &str) -> Result<Vec<TemplateEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, max) = part
            .rsplit_once(':')
            .with_context(|| format!("expected NAME:MAX, got '{part}'"))?;
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("empty assessment name in '{part}'");
        }
        let max: u32 = max
            .trim()
            .parse()
            .with_context(|| format!("invalid max in '{part}'"))?;
        if max == 0 {
            anyhow::bail!("max marks must be at least 1 in '{part}'");
        }
        if !seen.insert(name.to_string()) {
            anyhow::bail!("duplicate assessment: {name}");
        }
        entries.push(TemplateEntry::new(name, max));
    }

    if entries.is_empty() {
        anyhow::bail!("template must have at least one entry");
    }
    Ok(entries)
}
