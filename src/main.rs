// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

const SAVE_PATH: &str = "pocket-pet.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "reset" {
        // Wipe the save file and start over next launch
        run_reset()?;
    } else {
        // UI mode (default)
        run_ui_mode()?;
    }

    Ok(())
}

fn run_reset() -> Result<()> {
    use pocket_pet::SaveFile;

    println!("🧹 Resetting Pocket Pet save data...");

    let store = SaveFile::open(SAVE_PATH)?;
    store.clear()?;

    println!("✓ Pet, balance, transactions and last-update marker cleared");
    println!("  Run again without arguments to adopt a new pet.");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use pocket_pet::{Clock, SaveFile, Session, SystemClock};

    println!("🐾 Loading Pocket Pet...\n");

    let store = SaveFile::open(SAVE_PATH)?;
    let clock = SystemClock;

    // Missing or malformed save data means first-run setup, never an error
    let session = match store.load()? {
        Some(saved) => {
            println!("✓ Welcome back, {}!", saved.pet.name);
            Some(Session::resume(saved, clock.now()))
        }
        None => {
            println!("✓ No pet found - starting first-run setup");
            None
        }
    };

    println!("\nStarting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(store, session);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed, progress saved");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
