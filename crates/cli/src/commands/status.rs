use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use gearshelf_core::Shelf;

pub fn run(shelf: &Shelf, state_path: &str) -> Result<()> {
    let catalog = shelf.catalog();
    let products = catalog.all_products();
    let picks = products.iter().filter(|p| p.pick).count();
    let priced = products.iter().filter(|p| p.price.is_some()).count();
    let with_info = products
        .iter()
        .filter(|p| catalog.supplementary(&p.name).is_some())
        .count();

    let updated = match shelf.wishlist_updated_at() {
        Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "never".to_string(),
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("Categories"), Cell::new(catalog.categories().len())]);
    table.add_row(vec![Cell::new("Products"), Cell::new(products.len())]);
    table.add_row(vec![Cell::new("Curator picks"), Cell::new(picks)]);
    table.add_row(vec![Cell::new("With known price"), Cell::new(priced)]);
    table.add_row(vec![Cell::new("With extra info"), Cell::new(with_info)]);
    table.add_row(vec![
        Cell::new("Wishlist items"),
        Cell::new(shelf.wishlist().len()),
    ]);
    table.add_row(vec![Cell::new("Wishlist updated"), Cell::new(updated)]);
    table.add_row(vec![Cell::new("Share base URL"), Cell::new(shelf.share_base())]);
    table.add_row(vec![Cell::new("State database"), Cell::new(state_path)]);

    println!();
    println!("  Status");
    println!("  ------");
    println!("{table}");
    if shelf.persistence_degraded() {
        println!("  Note: state database unavailable — wishlist changes will not be saved.");
    }
    println!();

    Ok(())
}
