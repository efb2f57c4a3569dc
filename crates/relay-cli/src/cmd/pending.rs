use anyhow::Result;
use relay_core::store::Store;
use std::path::Path;

use crate::output::{one_line, print_json};

pub fn run(root: &Path, session: &str, json: bool) -> Result<()> {
    let (_, db) = super::open_store(root)?;
    let pending = db.list_pending_actions(session)?;

    if json {
        return print_json(&pending);
    }
    if pending.is_empty() {
        println!("No pending actions for session '{session}'.");
        return Ok(());
    }
    for item in &pending {
        let action = &item.action;
        println!(
            "{}  {:<6}  {}/{}",
            item.created_at.format("%Y-%m-%d %H:%M:%S"),
            action.kind().as_str(),
            action.target_service(),
            action.name()
        );
        if let Some(source) = action.source() {
            println!("    {}", one_line(source, 96));
        }
    }
    Ok(())
}
