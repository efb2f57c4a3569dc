use anyhow::Result;
use relay_core::store::Store;
use std::path::Path;

use crate::output::{one_line, print_json};

pub fn run(root: &Path, session: &str, json: bool) -> Result<()> {
    let (_, db) = super::open_store(root)?;
    let turns = db.list_chat_turns(session)?;

    if json {
        return print_json(&turns);
    }
    if turns.is_empty() {
        println!("No messages for session '{session}'.");
        return Ok(());
    }
    for turn in &turns {
        println!(
            "{}  {:<9}  {}",
            turn.created_at.format("%Y-%m-%d %H:%M:%S"),
            turn.role.as_str(),
            one_line(&turn.content, 100)
        );
    }
    Ok(())
}
