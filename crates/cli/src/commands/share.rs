use anyhow::Result;
use gearshelf_core::Shelf;

use crate::clipboard;

pub fn run(shelf: &Shelf, markdown: bool, copy: bool) -> Result<()> {
    if shelf.wishlist().is_empty() {
        println!("Your wishlist is empty — nothing to share.");
        return Ok(());
    }

    let output = if markdown {
        shelf.wishlist_markdown()
    } else {
        shelf.share_url()
    };
    println!("{output}");

    if copy {
        match clipboard::copy(&output) {
            Ok(()) => println!("Copied to clipboard."),
            Err(err) => println!("Could not copy to clipboard: {err}"),
        }
    }
    Ok(())
}
