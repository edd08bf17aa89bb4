use anyhow::Result;
use gearshelf_core::Shelf;

pub fn run(shelf: &Shelf) -> Result<()> {
    println!("{:<32} Label", "Key");
    println!("{}", "-".repeat(64));
    for category in shelf.catalog().categories() {
        println!("{:<32} {}", category.key, category.label);
    }
    Ok(())
}
