//! Terminal frontend for the memory game.
//!
//! Renders each position as its symbol when face-up, `X` otherwise, forwards
//! typed positions to the session, and sleeps out the mismatch delay before
//! ticking the hide task.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use pairmatch::{GameSession, SelectOutcome, SessionConfig, SessionEvent};

const PLACEHOLDER: char = 'X';
const COLUMNS: usize = 4;

fn render(session: &GameSession) {
    println!();
    for (position, _) in session.deck().cards().iter().enumerate() {
        let glyph = match session.visible_symbol(position) {
            Some(symbol) => symbol.glyph(),
            None => PLACEHOLDER,
        };
        print!("[{position:>2} {glyph}]");
        if (position + 1) % COLUMNS == 0 {
            println!();
        }
    }
    if session.card_count() % COLUMNS != 0 {
        println!();
    }
    println!(
        "matched {}/{} pairs",
        session.matched_pairs(),
        session.deck().pair_count()
    );
}

fn announce(events: Vec<SessionEvent>) {
    for event in events {
        match event {
            SessionEvent::SessionStarted { card_count } => {
                println!("new board dealt: {card_count} cards");
            }
            SessionEvent::PairMatched { symbol, .. } => {
                println!("match! {symbol} {symbol}");
            }
            SessionEvent::MismatchPending { .. } => {
                println!("no match...");
            }
            SessionEvent::GameWon { pair_count } => {
                println!("*** you won! all {pair_count} pairs found ***");
            }
            SessionEvent::CardRevealed { .. } | SessionEvent::CardsHidden { .. } => {}
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = GameSession::new(SessionConfig::default(), rand::random())
        .expect("default config is valid");

    let stdin = io::stdin();
    println!("pairmatch - type a card number, 'r' to restart, 'q' to quit");

    loop {
        announce(session.drain_events());
        render(&session);

        if session.is_won() {
            print!("play again? [y/n] ");
            let _ = io::stdout().flush();
            let mut answer = String::new();
            if stdin.lock().read_line(&mut answer).is_err() || !answer.trim().eq_ignore_ascii_case("y") {
                break;
            }
            session.restart();
            continue;
        }

        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }

        match line.trim() {
            "q" => break,
            "r" => {
                session.restart();
                continue;
            }
            input => {
                let Ok(position) = input.parse::<usize>() else {
                    println!("expected a card number, 'r', or 'q'");
                    continue;
                };
                let outcome = session.select(position, Instant::now());
                if outcome == SelectOutcome::Mismatched {
                    // Show the revealed pair for the full delay, then hide it.
                    announce(session.drain_events());
                    render(&session);
                    if let Some(deadline) = session.next_deadline() {
                        let now = Instant::now();
                        if deadline > now {
                            thread::sleep(deadline - now);
                        }
                    }
                    session.tick(Instant::now());
                }
            }
        }
    }
}
