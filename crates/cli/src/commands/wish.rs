use std::io::{self, BufRead, Write};

use anyhow::Result;
use gearshelf_core::share;
use gearshelf_core::Shelf;

use super::ls::print_view;

pub fn add(shelf: &mut Shelf, name: &str) -> Result<()> {
    if shelf.wishlist().contains(name) {
        println!("{name} is already on your wishlist.");
        return Ok(());
    }
    toggle(shelf, name)
}

pub fn rm(shelf: &mut Shelf, name: &str) -> Result<()> {
    if !shelf.wishlist().contains(name) {
        println!("{name} is not on your wishlist.");
        return Ok(());
    }
    toggle(shelf, name)
}

pub fn toggle(shelf: &mut Shelf, name: &str) -> Result<()> {
    match shelf.toggle_wish(name) {
        Ok(true) => println!("Added {name} to your wishlist."),
        Ok(false) => println!("Removed {name} from your wishlist."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

pub fn ls(shelf: &Shelf) -> Result<()> {
    if shelf.wishlist().is_empty() {
        println!("Your wishlist is empty. Add items with `gearshelf wish add <name>`.");
        return Ok(());
    }
    println!();
    println!("  Wishlist ({} items)", shelf.wishlist().len());
    print_view(&shelf.wishlist_view());
    Ok(())
}

pub fn clear(shelf: &mut Shelf, yes: bool) -> Result<()> {
    let count = shelf.wishlist().len();
    if count == 0 {
        println!("Your wishlist is already empty.");
        return Ok(());
    }
    if !yes && !confirm(&format!("Remove all {count} wishlist items?"))? {
        println!("Cancelled.");
        return Ok(());
    }
    let removed = shelf.clear_wishlist();
    println!("Removed {removed} items.");
    Ok(())
}

pub fn import(shelf: &mut Shelf, input: &str, yes: bool) -> Result<()> {
    let names = share::extract_token(input).and_then(|token| share::decode_token(&token).ok());
    let Some(names) = names else {
        println!("Could not read that shared wishlist link.");
        return Ok(());
    };
    if names.is_empty() {
        println!("That shared wishlist is empty.");
        return Ok(());
    }

    println!("The shared wishlist contains:");
    for name in &names {
        let marker = if shelf.catalog().product(name).is_none() {
            " (not in this catalog)"
        } else if shelf.wishlist().contains(name) {
            " (already on your wishlist)"
        } else {
            ""
        };
        println!("  - {name}{marker}");
    }

    if !yes && !confirm("Merge these into your wishlist?")? {
        println!("Cancelled.");
        return Ok(());
    }
    let added = shelf.import_wishlist(&names);
    println!("Added {added} new items to your wishlist.");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
