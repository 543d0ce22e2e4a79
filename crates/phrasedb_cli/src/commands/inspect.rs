//! The `inspect` command.

use super::CliSession;
use phrasedb_store::ReplicaStore;

/// Prints replica statistics for the session's user.
pub fn run(session: &CliSession) -> Result<(), Box<dyn std::error::Error>> {
    let store = session.engine().store();
    let all = store.find_all(session.user_id())?;
    let dirty = store.find_unsynced(session.user_id())?;

    println!("User:            {}", session.user_id());
    println!("Phrases:         {}", all.len());
    println!("Pending sync:    {}", dirty.len());

    if let Some(top) = session.best_match("") {
        println!("Most used:       \"{}\" ({} uses)", top.text, top.frequency);
    }

    let last_update = all.iter().map(|r| r.updated_at).max();
    if let Some(ts) = last_update {
        println!("Last update:     {} (epoch ms)", ts);
    }

    Ok(())
}
