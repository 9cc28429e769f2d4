use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::models::Product;
use crate::store::ProductStore;

/// Parse a JSON array of products.
pub fn parse_products(text: &str) -> anyhow::Result<Vec<Product>> {
    serde_json::from_str(text).context("seed data must be a JSON array of products")
}

/// Read the seed file and build the store from it. Any failure here is fatal
/// for startup: the server never binds without a loaded catalog.
pub fn load_store(path: &Path) -> anyhow::Result<ProductStore> {
    info!("Loading products from {}...", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let products =
        parse_products(&text).with_context(|| format!("invalid seed file {}", path.display()))?;
    let store = ProductStore::from_products(products)?;
    if store.is_empty() {
        warn!("Seed file contains no products; ids will start at 1");
    }

    info!(count = store.len(), "Products loaded.");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("products-api-{}-{}", std::process::id(), name));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_bundled_seed_file() {
        let text = include_str!("../../data/products.json");
        let products = parse_products(text).unwrap();
        assert!(!products.is_empty());
        assert_eq!(products[0].id, 1);
    }

    #[test]
    fn load_store_from_file() {
        let path = temp_file(
            "ok.json",
            r#"[{"id":1,"title":"Mug","price":7.5,"description":"Ceramic","category":"home",
                "image":"https://example.com/mug.png","rating":{"rate":4.1,"count":30}}]"#,
        );
        let store = load_store(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(1).unwrap().title, "Mug");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("products-api-does-not-exist.json");
        let err = load_store(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read seed file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("bad.json", "{ not json");
        assert!(load_store(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn object_instead_of_array_is_an_error() {
        assert!(parse_products(r#"{"id": 1}"#).is_err());
    }
}
