//! The `learn` command.

use super::CliSession;

/// Records one confirmed use of `phrase`.
pub fn run(session: &CliSession, phrase: &str) -> Result<(), Box<dyn std::error::Error>> {
    let phrase = phrase.trim();
    match session.record_use(phrase)? {
        Some(frequency) => {
            println!("Learned \"{}\" (frequency {})", phrase, frequency);
        }
        None => {
            println!("Nothing to learn from an empty phrase");
        }
    }
    Ok(())
}
