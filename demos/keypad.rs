//! Keypad Dispatcher
//!
//! This example plays the part of the external input dispatcher: it maps
//! key names to actions and prints the render after each one.
//!
//! Key names follow the keyboard layout (`0`-`9`, `+ - * /`, `Enter`, `=`,
//! `Backspace`, `Escape`, `%`, `.`, `r` for square root, `s` for square).
//!
//! Run with: cargo run --example keypad -- 1 + 2 Enter r

use tapecalc::{Action, Session};

fn main() {
    println!("=== Keypad Example ===\n");

    let mut keys: Vec<String> = std::env::args().skip(1).collect();
    if keys.is_empty() {
        keys = ["1", "2", "+", "3", "0", "*", "2", "Enter", "r"]
            .iter()
            .map(|k| k.to_string())
            .collect();
    }

    let mut session = Session::new();
    for key in &keys {
        let Some(action) = Action::from_key(key) else {
            println!("{key:>10}  (no action)");
            continue;
        };
        let outcome = session.dispatch(action);
        let render = session.render();
        println!(
            "{key:>10}  {:>20}  {:<20} {outcome:?}",
            render.display_text, render.history_text
        );
    }

    println!("\nTape:");
    for entry in session.tape().entries() {
        println!("  {} ({})", entry.text, entry.recorded_at.format("%H:%M:%S%.3f"));
    }
    if let Some(span) = session.tape().span() {
        println!("  {} entries over {span:?}", session.tape().len());
    }

    println!("\n=== Example Complete ===");
}
