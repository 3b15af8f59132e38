//! Catalog validation.

use std::collections::HashSet;

use goblin_store_core::Category;
use goblin_store_storefront::catalog::{CatalogSource, load_categories};

use super::CommandError;

/// Outcome of a catalog check.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub categories: usize,
    pub products: usize,
    /// Names of products listed more than once with identical fields. The
    /// cart cannot tell such entries apart.
    pub duplicates: Vec<String>,
    /// Names of empty categories.
    pub empty_categories: Vec<String>,
}

/// Load `source` and report on its contents.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or decoded.
pub async fn check(source: &str) -> Result<CatalogReport, CommandError> {
    let source = CatalogSource::parse(source);
    let categories = load_categories(&source).await?;
    let report = inspect(&categories);

    for name in &report.duplicates {
        tracing::warn!(product = %name, "Product listed more than once");
    }
    for name in &report.empty_categories {
        tracing::warn!(category = %name, "Category has no products");
    }
    tracing::info!(
        source = %source,
        categories = report.categories,
        products = report.products,
        "Catalog OK"
    );

    Ok(report)
}

/// Count categories and products and find entries the cart would confuse.
#[must_use]
pub fn inspect(categories: &[Category]) -> CatalogReport {
    let mut seen = HashSet::new();
    let mut report = CatalogReport {
        categories: categories.len(),
        ..CatalogReport::default()
    };

    for category in categories {
        if category.items.is_empty() {
            report.empty_categories.push(category.name.clone());
        }
        for product in &category.items {
            report.products += 1;
            if !seen.insert(product) {
                report.duplicates.push(product.name.clone());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use goblin_store_core::{Price, Product};

    use super::*;

    #[test]
    fn test_inspect_finds_duplicates_across_categories() {
        let lantern = Product::new("Goblin Lantern", Price::whole(21), "/lantern.png");
        let categories = vec![
            Category {
                name: "Trinkets".to_string(),
                items: vec![lantern.clone()],
            },
            Category {
                name: "Lights".to_string(),
                items: vec![
                    lantern,
                    Product::new("Goblin Lantern", Price::whole(25), "/lantern.png"),
                ],
            },
            Category {
                name: "Coming soon".to_string(),
                items: Vec::new(),
            },
        ];

        let report = inspect(&categories);

        assert_eq!(report.categories, 3);
        assert_eq!(report.products, 3);
        assert_eq!(report.duplicates, vec!["Goblin Lantern".to_string()]);
        assert_eq!(report.empty_categories, vec!["Coming soon".to_string()]);
    }

    #[tokio::test]
    async fn test_check_missing_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("missing.json");
        assert!(matches!(
            check(&path.to_string_lossy()).await,
            Err(CommandError::Catalog(_))
        ));
    }
}
