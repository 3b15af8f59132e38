//! Catalog values: products and the categories that group them.

use serde::{Deserialize, Serialize};

use super::price::Price;

/// A catalog item.
///
/// Products carry no identifier. Two products are the same product when all
/// three fields are equal, so the cart tells entries apart only by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// URL or path of the product image.
    pub image: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// A named group of products on the catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category heading.
    pub name: String,
    /// Products listed under the category, in display order.
    pub items: Vec<Product>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let product = Product::new("Product foo", Price::ZERO, "image.jpg");
        assert_eq!(
            serde_json::to_string(&product).unwrap(),
            r#"{"name":"Product foo","price":0,"image":"image.jpg"}"#
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Product::new("Product foo", Price::whole(55), "/test.jpg");
        let b = Product::new("Product foo", Price::whole(55), "/test.jpg");
        let c = Product::new("Product foo", Price::whole(55), "/other.jpg");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_category_from_json() {
        let json = r#"[{"name":"Category Foo","items":[{"name":"Product foo","price":55,"image":"/test.jpg"}]}]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Category Foo");
        assert_eq!(categories[0].items[0].price, Price::whole(55));
    }
}
