//! The `suggest` and `best` commands.

use super::CliSession;

/// Prints ranked completions for `prefix`.
pub fn run(session: &CliSession, prefix: &str, limit: usize) {
    let suggestions = session.suggest(prefix);
    if suggestions.is_empty() {
        println!("No completions for \"{}\"", prefix);
        return;
    }

    for suggestion in suggestions.iter().take(limit) {
        println!("{:>6}  {}", suggestion.frequency, suggestion.text);
    }
}

/// Prints the single best completion for `prefix`.
pub fn run_best(session: &CliSession, prefix: &str) {
    match session.best_match(prefix) {
        Some(suggestion) => println!("{}", suggestion.text),
        None => println!("No completions for \"{}\"", prefix),
    }
}
