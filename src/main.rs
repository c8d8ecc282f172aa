//! Safe Box entry point
//!
//! Native builds run a small text-mode driver over stdin/stdout. The browser
//! build is driven through the `WebGame` bindings in the library.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};

    use safe_box::audio::{AudioManager, LogSink};
    use safe_box::persistence::KeyValueStore;
    use safe_box::sim::{CellView, IndexSource, RoundStatus, SeededIndices};
    use safe_box::{Session, platform};

    /// Seed override for reproducible runs
    const SEED_ENV: &str = "SAFE_BOX_SEED";

    fn seeded_indices() -> SeededIndices {
        let rng = match std::env::var(SEED_ENV).ok().and_then(|s| s.parse().ok()) {
            Some(seed) => SeededIndices::new(seed),
            None => SeededIndices::from_entropy(),
        };
        log::info!("Round seed: {}", rng.seed());
        rng
    }

    fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
        print!("{text}");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn draw<S: KeyValueStore, R: IndexSource>(session: &Session<S, R>) {
        let round = session.round();
        let size = round.config().grid_size() as usize;

        println!();
        println!(
            "Safe Box Challenge - Level {}   Player: {}   Score: {}",
            session.level(),
            session.player(),
            session.score()
        );
        for (i, cell) in round.cells().enumerate() {
            let mark = match cell {
                CellView::Hidden => format!("{i:>3}"),
                CellView::Safe => "  ✅".to_string(),
                CellView::Bonus => "  🎁".to_string(),
                CellView::Hazard => "  💣".to_string(),
            };
            print!("{mark}");
            if (i + 1) % size == 0 {
                println!();
            }
        }
    }

    fn show_leaderboard<S: KeyValueStore, R: IndexSource>(session: &Session<S, R>) {
        let board = session.leaderboard();
        match board.top_score() {
            Some(best) => println!("🏅 Top 5 Scores (best {best})"),
            None => println!("🏅 Top 5 Scores\n  (none yet)"),
        }
        for (rank, entry) in board.entries().iter().enumerate() {
            println!("  {}. {}: {}", rank + 1, entry.name(), entry.score());
        }
    }

    pub fn run() -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();

        // Name entry gate
        let name = loop {
            let Some(name) = prompt(&mut input, "🚀 Enter your name to start: ")? else {
                return Ok(());
            };
            if !name.is_empty() {
                break name;
            }
        };

        let mut session = match Session::new(&name, platform::default_store(), seeded_indices()) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("{e}");
                return Ok(());
            }
        };

        let mut audio = AudioManager::new(LogSink, session.settings().muted);
        println!(
            "Commands: <box number>, n = next level, r = play again, l = leaderboard, m = mute, q = quit"
        );

        loop {
            draw(&session);
            match session.status() {
                RoundStatus::Won => {
                    let hint = if session.can_advance() {
                        "n = Next Level"
                    } else {
                        "r = Play Again"
                    };
                    println!(
                        "🎉 You Won Level {}! Total Score: {} ({hint})",
                        session.level(),
                        session.score()
                    );
                }
                RoundStatus::Lost => {
                    println!("💀 Game Over. Score: {} (r = Try Again)", session.score())
                }
                RoundStatus::InProgress => {}
            }

            let Some(line) = prompt(&mut input, "> ")? else {
                break;
            };

            match line.as_str() {
                "q" => break,
                "l" => show_leaderboard(&session),
                "m" => {
                    session.settings_mut().toggle_muted();
                    audio.set_muted(session.settings().muted);
                    if let Err(e) = session.save_settings() {
                        log::warn!("Could not save settings: {}", e);
                    }
                    println!("{}", if audio.is_muted() { "🔇 Muted" } else { "🔊 Sound on" });
                }
                "n" if session.can_advance() => {
                    if let Err(e) = session.next_level() {
                        eprintln!("{e}");
                    }
                }
                "r" => {
                    if let Err(e) = session.play_again() {
                        eprintln!("{e}");
                    }
                }
                other => match other.parse::<usize>() {
                    Ok(index) => match session.click(index) {
                        Ok(effect) => {
                            if let Some(text) = effect.popup_text() {
                                println!("{text}");
                            }
                        }
                        Err(e) => println!("{e}"),
                    },
                    Err(_) => println!("Unknown command: {other}"),
                },
            }

            for event in session.drain_events() {
                audio.handle(&event);
            }
        }

        show_leaderboard(&session);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    safe_box::platform::init_logging();
    log::info!("Safe Box (native) starting...");

    if let Err(e) = native::run() {
        log::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::start`, this is just to satisfy the compiler
}
