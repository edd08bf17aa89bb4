use anyhow::Result;
use gearshelf_core::Shelf;

pub fn show(shelf: &Shelf, state_path: &str) -> Result<()> {
    println!("Share base URL: {}", shelf.share_base());
    println!("State database: {state_path}");
    Ok(())
}

pub fn set_share_url(shelf: &Shelf, url: &str) -> Result<()> {
    shelf.set_share_base(url)?;
    println!("Share base URL set to: {url}");
    Ok(())
}
