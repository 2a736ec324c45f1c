//! Interactive practice-game loops.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::ValueEnum;

use lingolens_game::{Dictionary, SentenceSession, TokenMatch, WordMatchSession};
use lingolens_types::LanguagePair;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Match words with their translations
    Words,
    /// Translate sentences and get token-level feedback
    Sentences,
}

pub fn run(mode: Mode, pair: LanguagePair) -> Result<()> {
    match mode {
        Mode::Words => run_words(pair),
        Mode::Sentences => run_sentences(pair),
    }
}

fn run_words(pair: LanguagePair) -> Result<()> {
    let mut session = WordMatchSession::new(Dictionary::words(), pair);
    if session.round_size() == 0 {
        bail!("no dictionary entries available for {} -> {}", pair.source, pair.target);
    }

    println!(
        "Word match: pair each {} word with its {} translation.",
        pair.source.display_name(),
        pair.target.display_name()
    );
    println!("Enter two numbers (source target), e.g. \"1 4\". Type 'exit' to quit.\n");
    println!("Round {} of {}:", session.round(), session.total_rounds());

    let stdin = io::stdin();
    loop {
        print_board(&session);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF (Ctrl+D)
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        let Some((source_pos, target_pos)) = parse_pick(input, session.round_size()) else {
            println!("Enter two numbers between 1 and {}.", session.round_size());
            continue;
        };
        if session.try_match(source_pos, target_pos) {
            println!(
                "Correct! ({}/{})",
                session.matched_count(),
                session.round_size()
            );
        } else {
            println!("Not a match, try again.");
        }

        if session.is_round_complete() {
            println!("\nRound {} complete!", session.round());
            if session.advance_round() {
                println!("Round {} of {}:", session.round(), session.total_rounds());
            } else {
                println!("All {} rounds done. Well played!", session.total_rounds());
                break;
            }
        }
    }
    Ok(())
}

fn print_board(session: &WordMatchSession) {
    let sources = session.source_items();
    let targets = session.target_items();
    for (i, (source, target)) in sources.iter().zip(&targets).enumerate() {
        let mark = if session.is_matched(i) { "*" } else { " " };
        println!("{mark}{:>3}. {:<18} {:>3}. {}", i + 1, source, i + 1, target);
    }
}

/// Parse "<source> <target>" as 1-based positions within the round.
fn parse_pick(input: &str, size: usize) -> Option<(usize, usize)> {
    let mut parts = input.split_whitespace();
    let a: usize = parts.next()?.parse().ok()?;
    let b: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if a == 0 || b == 0 || a > size || b > size {
        return None;
    }
    Some((a - 1, b - 1))
}

fn run_sentences(pair: LanguagePair) -> Result<()> {
    let mut session = SentenceSession::new(Dictionary::sentences(), pair);
    if session.is_empty() {
        bail!("no sentences available for {} -> {}", pair.source, pair.target);
    }

    println!(
        "Sentence practice: translate from {} into {}.",
        pair.source.display_name(),
        pair.target.display_name()
    );
    println!("Press Enter on an empty line to see the reference. Type 'exit' to quit.\n");

    let stdin = io::stdin();
    loop {
        let Some(current) = session.current() else {
            break;
        };
        let source = current.source.clone();
        let reference = current.target.clone();

        println!("[{}/{}] {}", session.position() + 1, session.len(), source);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let input = line.trim();
        if input == "exit" || input == "quit" {
            break;
        }

        if !input.is_empty() {
            if let Some(verdicts) = session.check(input) {
                for v in &verdicts {
                    let mark = match v.verdict {
                        TokenMatch::Correct => "+",
                        TokenMatch::Partial => "~",
                        TokenMatch::Incorrect => "-",
                    };
                    print!("{mark}{} ", v.token);
                }
                println!();
            }
        }
        println!("Reference: {reference}\n");

        if !session.advance() {
            println!("Session complete.");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pick_valid() {
        assert_eq!(parse_pick("1 4", 10), Some((0, 3)));
        assert_eq!(parse_pick("  10 1 ", 10), Some((9, 0)));
    }

    #[test]
    fn test_parse_pick_rejects_garbage() {
        assert_eq!(parse_pick("0 1", 10), None);
        assert_eq!(parse_pick("1 11", 10), None);
        assert_eq!(parse_pick("1", 10), None);
        assert_eq!(parse_pick("1 2 3", 10), None);
        assert_eq!(parse_pick("one two", 10), None);
    }
}
