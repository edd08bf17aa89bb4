use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use gearshelf_core::domain::CategoryKey;
use gearshelf_core::filter::{CategoryFilter, FilterState, PriceFilter};
use gearshelf_core::render::{CatalogView, CategoryBlock};
use gearshelf_core::share;
use gearshelf_core::Shelf;

pub fn run(
    shelf: &Shelf,
    search: Option<String>,
    category: Option<String>,
    price: Option<String>,
    picks: bool,
    from: Option<String>,
) -> Result<()> {
    if let Some(input) = from {
        return run_shared(shelf, &input);
    }

    let mut filters = FilterState::default();
    if let Some(search) = search {
        filters.search = search.to_lowercase();
    }
    if let Some(category) = category {
        filters.category = CategoryFilter::Key(resolve_category(shelf, &category));
    }
    if let Some(price) = price {
        filters.price = PriceFilter::parse(&price)?;
    }
    filters.picks_only = picks;

    print_view(&shelf.catalog_view(&filters));
    Ok(())
}

fn run_shared(shelf: &Shelf, input: &str) -> Result<()> {
    let names = share::extract_token(input).and_then(|token| share::decode_token(&token).ok());
    let Some(names) = names else {
        println!("Could not read that shared wishlist link.");
        return Ok(());
    };

    let known = names
        .iter()
        .filter(|name| shelf.catalog().product(name).is_some())
        .count();
    println!();
    println!(
        "  Shared wishlist ({known} of {} items found in this catalog)",
        names.len()
    );
    print_view(&shelf.shared_view(&names));
    Ok(())
}

/// Accept either a category key or its display label.
pub(crate) fn resolve_category(shelf: &Shelf, raw: &str) -> CategoryKey {
    shelf
        .catalog()
        .categories()
        .iter()
        .find(|c| c.key.as_str() == raw || c.label.eq_ignore_ascii_case(raw))
        .map(|c| c.key.clone())
        .unwrap_or_else(|| CategoryKey::new(raw))
}

pub(crate) fn print_view(view: &CatalogView) {
    match view {
        CatalogView::NoMatches => {
            println!();
            println!("  No products match your filters.");
            println!("  Try adjusting your search criteria.");
            println!();
        }
        CatalogView::Groups(blocks) => {
            if blocks.is_empty() {
                println!();
                println!("  Nothing to show.");
                println!();
                return;
            }
            for block in blocks {
                print_block(block);
            }
            println!();
        }
    }
}

fn print_block(block: &CategoryBlock) {
    println!();
    println!("  {} ({})", block.label, block.count);

    let interactive = block.items.iter().any(|item| item.interactive);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Name"), Cell::new("Price"), Cell::new("Pick")];
    if interactive {
        header.push(Cell::new("Wish"));
    }
    header.push(Cell::new("Info"));
    header.push(Cell::new("Link"));
    table.set_header(header);

    for item in &block.items {
        let mut row = vec![
            Cell::new(&item.name),
            Cell::new(&item.price_label),
            Cell::new(if item.pick { "★" } else { "" }),
        ];
        if interactive {
            row.push(Cell::new(if item.favorited { "♥" } else { "" }));
        }
        row.push(Cell::new(if item.has_info { "i" } else { "" }));
        row.push(Cell::new(&item.url));
        table.add_row(row);
    }

    println!("{table}");
}
