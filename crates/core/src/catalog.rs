use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::domain::{Category, CategoryKey, Product, SupplementaryRecord};
use crate::error::{Error, Result};

/// Immutable product catalog: ordered categories, a flattened product
/// list, and name-keyed lookups for products and supplementary records.
/// Built once at startup, never mutated afterwards.
#[derive(Debug)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    by_name: HashMap<String, usize>,
    extras: HashMap<String, SupplementaryRecord>,
}

impl Catalog {
    /// Load the catalog from a dataset file plus an optional supplementary
    /// data file. A missing or malformed dataset is fatal; a missing
    /// supplementary file just means no extra detail is available.
    pub fn load_files(data: &Path, extra: Option<&Path>) -> Result<Self> {
        let raw = read_json(data)?;
        let extras = match extra {
            Some(path) if path.exists() => Some(read_json(path)?),
            _ => None,
        };
        Self::load(raw, extras)
    }

    /// Build the catalog from pre-parsed JSON values. The dataset root
    /// must be an object mapping category display labels to product
    /// arrays; object order is the category display order.
    pub fn load(raw: Value, extras: Option<Value>) -> Result<Self> {
        let Value::Object(groups) = raw else {
            return Err(Error::DatasetMissing(
                "dataset root must be an object of category label to products".to_string(),
            ));
        };
        if groups.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut categories = Vec::new();
        let mut products: Vec<Product> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut labels_by_key: HashMap<CategoryKey, String> = HashMap::new();

        for (label, items) in groups {
            let key = CategoryKey::from_label(&label);
            if let Some(existing) = labels_by_key.get(&key) {
                if *existing != label {
                    return Err(Error::CategoryKeyCollision {
                        a: existing.clone(),
                        b: label,
                        key: key.to_string(),
                    });
                }
            }
            labels_by_key.insert(key.clone(), label.clone());
            categories.push(Category {
                key: key.clone(),
                label: label.clone(),
            });

            let items: Vec<Product> = serde_json::from_value(items)
                .map_err(|err| Error::DatasetMissing(format!("category {label:?}: {err}")))?;
            for mut product in items {
                product.category = key.clone();
                if by_name.contains_key(&product.name) {
                    return Err(Error::DuplicateProduct(product.name));
                }
                by_name.insert(product.name.clone(), products.len());
                products.push(product);
            }
        }

        let extras = match extras {
            Some(value) => serde_json::from_value::<HashMap<String, SupplementaryRecord>>(value)
                .map_err(|err| Error::DatasetMissing(format!("supplementary data: {err}")))?,
            None => HashMap::new(),
        };

        Ok(Self {
            categories,
            products,
            by_name,
            extras,
        })
    }

    /// The flattened product list, in dataset declaration order.
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    /// Ordered distinct categories, for populating filter controls.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_label(&self, key: &CategoryKey) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.key == *key)
            .map(|c| c.label.as_str())
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.by_name.get(name).map(|&idx| &self.products[idx])
    }

    pub fn supplementary(&self, name: &str) -> Option<&SupplementaryRecord> {
        self.extras.get(name)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .map_err(|err| Error::DatasetMissing(format!("{}: {err}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|err| Error::DatasetMissing(format!("{}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "IEMs": [
                { "name": "Truthear Gate", "price": 20, "pick": true,
                  "image": "images/truthear_gate.jpg", "url": "https://example.com/gate" },
                { "name": "Kiwi Ears Cadenza", "price": 35,
                  "image": "images/cadenza.jpg", "url": "https://example.com/cadenza" }
            ],
            "Cables": [
                { "name": "Hart Audio Cable", "price": 30, "url": "https://example.com/hart" }
            ]
        })
    }

    #[test]
    fn test_load_preserves_category_order() {
        let catalog = Catalog::load(sample(), None).unwrap();
        let labels: Vec<&str> = catalog.categories().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["IEMs", "Cables"]);
        assert_eq!(catalog.categories()[0].key.as_str(), "iems");
    }

    #[test]
    fn test_load_assigns_category_keys() {
        let catalog = Catalog::load(sample(), None).unwrap();
        let gate = catalog.product("Truthear Gate").unwrap();
        assert_eq!(gate.category.as_str(), "iems");
        assert_eq!(gate.price, Some(20));
        assert!(gate.pick);
        let hart = catalog.product("Hart Audio Cable").unwrap();
        assert_eq!(hart.category.as_str(), "cables");
        assert!(!hart.pick);
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let raw = json!({
            "IEMs": [{ "name": "Gate", "url": "a" }],
            "Cables": [{ "name": "Gate", "url": "b" }]
        });
        let err = Catalog::load(raw, None).unwrap_err();
        assert!(matches!(err, Error::DuplicateProduct(name) if name == "Gate"));
    }

    #[test]
    fn test_load_rejects_key_collisions() {
        let raw = json!({
            "Hi Fi": [{ "name": "A", "url": "a" }],
            "hi-fi": [{ "name": "B", "url": "b" }]
        });
        assert!(matches!(
            Catalog::load(raw, None).unwrap_err(),
            Error::CategoryKeyCollision { .. }
        ));
    }

    #[test]
    fn test_load_rejects_empty_dataset() {
        assert!(matches!(
            Catalog::load(json!({}), None).unwrap_err(),
            Error::EmptyDataset
        ));
        assert!(matches!(
            Catalog::load(json!([1, 2]), None).unwrap_err(),
            Error::DatasetMissing(_)
        ));
    }

    #[test]
    fn test_load_files_missing_dataset() {
        let err = Catalog::load_files(Path::new("/nonexistent/gear.json"), None).unwrap_err();
        assert!(matches!(err, Error::DatasetMissing(_)));
    }

    #[test]
    fn test_supplementary_lookup() {
        let extras = json!({
            "Truthear Gate": {
                "images": ["images/extra/gate_graph.png"],
                "video_links": ["https://example.com/v/1"],
                "impressions": "Neutral with a touch of warmth."
            }
        });
        let catalog = Catalog::load(sample(), Some(extras)).unwrap();
        let record = catalog.supplementary("Truthear Gate").unwrap();
        assert_eq!(record.images.len(), 1);
        assert_eq!(
            record.notes.get("impressions").and_then(|v| v.as_str()),
            Some("Neutral with a touch of warmth.")
        );
        assert!(catalog.supplementary("Hart Audio Cable").is_none());
    }
}
