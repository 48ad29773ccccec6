// src/main.rs

use std::io::{self, BufRead, Write};

use anyhow::Result;
use character::{Character, Class, Inventory};
use combat::io::{InputSource, MessageSink};
use grand_odyssey::GameEngine;
use items::GameRng;
use save::SaveSystem;

const SAVE_FOLDER: &str = "Saves";

struct StdinInput;

impl InputSource for StdinInput {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end().to_string()),
        }
    }
}

struct StdoutSink;

impl MessageSink for StdoutSink {
    fn say(&mut self, message: &str) {
        println!("{message}");
        let _ = io::stdout().flush();
    }
}

fn new_game(input: &mut StdinInput, output: &mut StdoutSink) -> (Character, Inventory) {
    output.say("What is your name?");
    let name = input
        .read_line()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Adventurer".to_string());

    output.say("Pick a class: Knight, Mage, Rogue, Berserker (anything else: Adventurer)");
    let class = input
        .read_line()
        .map(|s| Class::parse(&s))
        .unwrap_or_default();

    (Character::new(&name, class), Inventory::new())
}

fn load_game(
    saves: &SaveSystem,
    input: &mut StdinInput,
    output: &mut StdoutSink,
) -> Option<(Character, Inventory)> {
    let names = match saves.list_saves() {
        Ok(names) => names,
        Err(e) => {
            output.say(&error::handle_error(&e));
            return None;
        }
    };
    if names.is_empty() {
        output.say("No saves found.");
        return None;
    }

    for (i, name) in names.iter().enumerate() {
        output.say(&format!("{}) {}", i + 1, name));
    }
    output.say("Pick a save to load, or [X] to cancel.");

    let choice = input.read_line()?;
    let index = choice.trim().parse::<usize>().ok()?.checked_sub(1)?;
    let name = names.get(index)?;

    match saves.load_game(name) {
        Ok(loaded) => {
            output.say(&format!("Loaded \"{name}\"."));
            Some((loaded.data.player, loaded.inventory))
        }
        Err(e) => {
            output.say(&error::handle_error(&e));
            None
        }
    }
}

fn main() -> Result<()> {
    let mut input = StdinInput;
    let mut output = StdoutSink;

    loop {
        output.say("=== Grand Odyssey ===");
        output.say("1) New Game  2) Load Game  3) Quit");

        let Some(choice) = input.read_line() else {
            return Ok(());
        };

        let session = match choice.trim() {
            "1" => Some(new_game(&mut input, &mut output)),
            "2" => {
                let saves = SaveSystem::new(SAVE_FOLDER)?;
                load_game(&saves, &mut input, &mut output)
            }
            "3" => return Ok(()),
            _ => {
                output.say("Invalid choice.");
                None
            }
        };

        if let Some((player, inventory)) = session {
            let saves = SaveSystem::new(SAVE_FOLDER)?;
            let rng = GameRng::from_entropy();
            GameEngine::new(player, inventory, saves, rng, &mut input, &mut output).run();
        }
    }
}
