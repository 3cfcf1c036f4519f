use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use vitrine_base::AccentColor;

mod builtin;

#[derive(Error, Debug)]
pub enum Error {
    #[error("catalog contains no products")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Headphones,
    Phone,
    Watch,
    Laptop,
}

impl ProductCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Headphones => "Headphones",
            Self::Phone => "Phone",
            Self::Watch => "Watch",
            Self::Laptop => "Laptop",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

impl SpecEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: ProductCategory,
    /// Kept in display order.
    pub specs: Vec<SpecEntry>,
    #[serde(rename = "accentColor", alias = "color")]
    pub accent_color: AccentColor,
}

impl ProductDescriptor {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        category: ProductCategory,
        specs: Vec<SpecEntry>,
        accent_color: AccentColor,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
            category,
            specs,
            accent_color,
        }
    }

    pub fn spec(&self, label: &str) -> Option<&str> {
        self.specs
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    products: Vec<ProductDescriptor>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            products: builtin::products(),
        }
    }

    pub fn from_products(products: Vec<ProductDescriptor>) -> Result<Self> {
        if products.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self { products })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_products(serde_json::from_str(text)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn get(&self, index: usize) -> Option<&ProductDescriptor> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.products.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductDescriptor> {
        self.products.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_one_product_per_category() {
        let catalog = Catalog::builtin();
        let categories: Vec<_> = catalog.iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            vec![
                ProductCategory::Headphones,
                ProductCategory::Phone,
                ProductCategory::Watch,
                ProductCategory::Laptop,
            ]
        );
    }

    #[test]
    fn specs_keep_insertion_order() {
        let catalog = Catalog::builtin();
        let headphones = catalog.get(0).map(|p| {
            p.specs
                .iter()
                .map(|s| s.label.as_str())
                .collect::<Vec<_>>()
        });
        assert_eq!(
            headphones,
            Some(vec!["Battery Life", "Weight", "Connectivity", "Warranty"])
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::from_products(Vec::new()), Err(Error::Empty)));
    }
}
