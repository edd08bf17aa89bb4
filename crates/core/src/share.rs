//! Wishlist sharing: an opaque URL-embeddable token plus a Markdown
//! summary. The token is URL-safe base64 of the JSON name array, so it
//! survives a trip through a query parameter without escaping.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::catalog::Catalog;
use crate::domain::Product;
use crate::error::{Error, Result};

/// Query parameter carrying the share token.
pub const SHARE_PARAM: &str = "wishlist";

/// Encode an ordered name list into an opaque token.
pub fn encode_token(names: &[String]) -> String {
    let json = serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string());
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a share token back into its name list. Never panics; any
/// malformed input is a `TokenDecode` error, which callers treat as "no
/// shared wishlist present".
pub fn decode_token(token: &str) -> Result<Vec<String>> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim().as_bytes())
        .map_err(|_| Error::TokenDecode)?;
    serde_json::from_slice(&bytes).map_err(|_| Error::TokenDecode)
}

/// Build the shareable URL for a name list on top of a base URL.
pub fn share_url(base: &str, names: &[String]) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{SHARE_PARAM}={}", encode_token(names))
}

/// Pull the share token out of a full URL, or accept a bare token as-is.
/// Returns `None` when the input carries no token.
pub fn extract_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.contains("://") || input.contains('?') || input.contains('=') {
        let query = input.split_once('?').map(|(_, q)| q)?;
        let query = query.split('#').next().unwrap_or(query);
        return query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key == SHARE_PARAM && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        });
    }
    Some(input.to_string())
}

/// Render a shareable Markdown summary: wishlist items grouped by
/// category in catalog order, names unknown to the catalog under a
/// trailing `Other` section, and the share URL for the same set last.
pub fn to_markdown(names: &[String], catalog: &Catalog, base: &str) -> String {
    let mut out = String::from("# Gear Wishlist\n");

    for category in catalog.categories() {
        let lines: Vec<String> = names
            .iter()
            .filter_map(|name| catalog.product(name))
            .filter(|product| product.category == category.key)
            .map(markdown_line)
            .collect();
        if !lines.is_empty() {
            out.push_str(&format!("\n## {}\n", category.label));
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    let unknown: Vec<&String> = names
        .iter()
        .filter(|name| catalog.product(name).is_none())
        .collect();
    if !unknown.is_empty() {
        out.push_str("\n## Other\n");
        for name in unknown {
            out.push_str(&format!("- {name}\n"));
        }
    }

    out.push_str(&format!("\nShare link: {}\n", share_url(base, names)));
    out
}

fn markdown_line(product: &Product) -> String {
    let mut line = format!("- {}", product.name);
    if product.pick {
        line.push_str(" ★");
    }
    if let Some(price) = product.price {
        line.push_str(&format!(" (${price})"));
    }
    if !product.url.is_empty() {
        line.push_str(&format!(" — {}", product.url));
    }
    line
}
