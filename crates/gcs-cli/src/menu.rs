//! The interactive command menu

use std::io::{self, BufRead, Write};

use anyhow::Result;
use gcs_client::{CorsDefaults, Storage};
use tracing::error;

use crate::commands;
use crate::input::Prompter;

/// Commands in the order they are offered. The entry one past the end of
/// this list quits.
const MENU: [&str; 13] = [
    "Get all buckets",
    "Get a bucket",
    "Get bucket CORS",
    "Get bucket location",
    "Create a bucket",
    "Set bucket CORS",
    "Delete a bucket",
    "Download an object",
    "Get object ACLs",
    "Get object metadata",
    "Upload an object",
    "Copy an object",
    "Delete an object",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Selection {
    Command(usize),
    Quit,
}

/// Show the menu, read selections and dispatch commands until the user
/// quits or the input closes. Command failures are logged and the menu
/// comes back.
pub async fn run<R: BufRead, W: Write>(
    client: &dyn Storage,
    defaults: &CorsDefaults,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        println!("What would you like to do? Enter the number.");
        for (number, label) in MENU.iter().enumerate() {
            println!("{}: {}", number, label);
        }
        println!("{}: Quit", MENU.len());

        let entry = match prompter.ask("Enter your selection: ") {
            Ok(entry) => entry,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        };
        let selection = match parse_selection(&entry, MENU.len()) {
            Ok(Selection::Command(number)) => number,
            Ok(Selection::Quit) => break,
            Err(message) => {
                error!("{}", message);
                continue;
            }
        };

        if let Err(err) = dispatch(selection, client, defaults, prompter).await {
            error!("{} failed: {}", MENU[selection], err);
            error!("Error running command. Please try again.");
        }
    }
    Ok(())
}

/// Interpret a selection entry against a menu of `commands` entries
fn parse_selection(entry: &str, commands: usize) -> Result<Selection, &'static str> {
    let number: i64 = entry.trim().parse().map_err(|_| "Enter a number.")?;
    if number < 0 || number > commands as i64 {
        return Err("Selection not recognized.");
    }
    if number == commands as i64 {
        return Ok(Selection::Quit);
    }
    Ok(Selection::Command(number as usize))
}

async fn dispatch<R: BufRead, W: Write>(
    selection: usize,
    client: &dyn Storage,
    defaults: &CorsDefaults,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    match selection {
        0 => commands::get_buckets(client).await,
        1 => commands::get_bucket(client, prompter).await,
        2 => commands::get_bucket_cors(client, prompter).await,
        3 => commands::get_bucket_location(client, prompter).await,
        4 => commands::insert_bucket(client, prompter).await,
        5 => commands::set_bucket_cors(client, defaults, prompter).await,
        6 => commands::delete_bucket(client, prompter).await,
        7 => commands::get_object(client, prompter).await,
        8 => commands::get_object_acls(client, prompter).await,
        9 => commands::get_object_metadata(client, prompter).await,
        10 => commands::insert_object(client, prompter).await,
        11 => commands::copy_object(client, prompter).await,
        12 => commands::delete_object(client, prompter).await,
        // parse_selection keeps selections within the menu
        _ => Ok(()),
    }
}
