use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use gearshelf_core::controller::{Controller, DisplayMode, Effect, Input, SEARCH_DEBOUNCE};
use gearshelf_core::filter::{CategoryFilter, PriceFilter};
use gearshelf_core::Shelf;

use super::{info, ls};

/// Line-oriented interactive shell over the interaction controller.
/// Plain text filters by name; slash commands drive everything else.
pub fn run(shelf: &mut Shelf, from: Option<String>) -> Result<()> {
    let mut controller = Controller::startup(from.as_deref());
    if controller.mode() == DisplayMode::SharedWishlistView {
        println!("Viewing a shared wishlist (read-only). `/back` returns to the catalog.");
    } else if from.is_some() {
        println!("Could not read that shared wishlist link; showing the catalog.");
    }

    ls::print_view(&controller.view(shelf));
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        let input = match parse_command(shelf, line) {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::ShareLink => {
                if shelf.wishlist().is_empty() {
                    println!("  Your wishlist is empty — nothing to share.");
                } else {
                    println!("  {}", shelf.share_url());
                }
                continue;
            }
            Command::Invalid(message) => {
                println!("  {message}");
                continue;
            }
            Command::Input(input) => input,
        };

        // A submitted line already marks a pause in typing, so drain the
        // debounce window immediately after handling the input.
        let now = Instant::now();
        let mut effects = controller.handle(shelf, input, now);
        effects.extend(controller.tick(shelf, now + SEARCH_DEBOUNCE));
        for effect in effects {
            match effect {
                Effect::Render(view) => ls::print_view(&view),
                Effect::ShowSupplementary(view) => info::print_supplementary(&view),
                Effect::Notice(message) => println!("  {message}"),
            }
        }
    }

    Ok(())
}

enum Command {
    Input(Input),
    ShareLink,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(shelf: &Shelf, line: &str) -> Command {
    if !line.starts_with('/') {
        // Plain text (or an empty line) edits the search filter.
        return Command::Input(Input::SearchEdited(line.to_string()));
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "/quit" | "/q" | "/exit" => Command::Quit,
        "/help" | "/h" => Command::Help,
        "/share" => Command::ShareLink,
        "/reset" => Command::Input(Input::ResetFilters),
        "/wish" => Command::Input(Input::ShowWishlist),
        "/back" => Command::Input(Input::Close),
        "/cat" => {
            if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
                Command::Input(Input::CategorySelected(CategoryFilter::All))
            } else {
                Command::Input(Input::CategorySelected(CategoryFilter::Key(
                    ls::resolve_category(shelf, rest),
                )))
            }
        }
        "/price" => match PriceFilter::parse(if rest.is_empty() { "all" } else { rest }) {
            Ok(price) => Command::Input(Input::PriceSelected(price)),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "/picks" => match rest {
            "" | "on" => Command::Input(Input::PicksOnly(true)),
            "off" => Command::Input(Input::PicksOnly(false)),
            _ => Command::Invalid("usage: /picks [on|off]".to_string()),
        },
        "/toggle" | "/t" => {
            if rest.is_empty() {
                Command::Invalid("usage: /toggle <product name>".to_string())
            } else {
                Command::Input(Input::ToggleWish(rest.to_string()))
            }
        }
        "/info" | "/i" => {
            if rest.is_empty() {
                Command::Invalid("usage: /info <product name>".to_string())
            } else {
                Command::Input(Input::ShowInfo(rest.to_string()))
            }
        }
        _ => Command::Invalid(format!("Unknown command {cmd}. Try /help.")),
    }
}

fn print_help() {
    println!();
    println!("  Type to search by name, or use:");
    println!("    /cat <key|all>      filter by category");
    println!("    /price <range|all>  filter by price (`min-max` or `min+`)");
    println!("    /picks [on|off]     only curator picks");
    println!("    /reset              clear all filters");
    println!("    /wish               show your wishlist");
    println!("    /back               close the wishlist view");
    println!("    /toggle <name>      add/remove a wishlist item");
    println!("    /info <name>        extra detail for a product");
    println!("    /share              print your share link");
    println!("    /quit               leave");
    println!();
}
