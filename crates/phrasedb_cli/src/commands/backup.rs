//! The `export` and `import` commands.

use super::CliSession;
use phrasedb_sync_protocol::BackupEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the replica's backup snapshot to `out` or stdout.
pub fn export(
    session: &CliSession,
    pretty: bool,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = session.export();
    let json = if pretty {
        BackupEntry::to_json_pretty(&entries)?
    } else {
        BackupEntry::to_json(&entries)?
    };

    match out {
        Some(path) => {
            fs::write(&path, json)?;
            println!("Exported {} phrases to {}", entries.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Restores a backup snapshot from `file`.
pub fn import(session: &CliSession, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(file)?;
    let entries = BackupEntry::from_json(&json)?;
    let imported = session.import(&entries)?;
    println!("Imported {} phrases from {}", imported, file.display());
    Ok(())
}
