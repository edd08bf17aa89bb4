use anyhow::Result;
use gearshelf_core::render::SupplementaryView;
use gearshelf_core::Shelf;

pub fn run(shelf: &Shelf, name: &str) -> Result<()> {
    if shelf.catalog().product(name).is_none() {
        println!("No product named {name:?} in the catalog.");
        return Ok(());
    }
    match shelf.supplementary_view(name) {
        Some(view) => print_supplementary(&view),
        None => println!("No extra info for {name}."),
    }
    Ok(())
}

pub(crate) fn print_supplementary(view: &SupplementaryView) {
    println!();
    println!("  {}", view.title);
    println!("  {}", "-".repeat(view.title.len()));

    if !view.images.is_empty() {
        println!();
        println!("  Images:");
        for image in &view.images {
            println!("    {image}");
        }
    }
    if let Some(link) = &view.video_link {
        println!();
        println!("  Video: {link}");
    }
    for note in &view.notes {
        println!();
        println!("  {}", note.heading);
        println!("    {}", note.body);
    }
    println!();
}
