use std::{collections::HashMap, fmt::Display};

use super::{Insertion, Response};

/// A product of the platform catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// The product identifier, used as Promoted content id.
    id: String,

    /// The product name.
    name: String,

    /// The product price.
    price: i64,
}

impl Product {
    /// Creates a new `Product` instance.
    pub fn new(id: &str, name: &str, price: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }

    /// Retrieves the product identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Retrieves the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves the product price.
    pub fn price(&self) -> i64 {
        self.price
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{} {} {}}}", self.id, self.name, self.price)
    }
}

/// An entry of a re-ranked list.
#[derive(Debug, PartialEq, Eq)]
pub enum RankedItem<'a> {
    /// A product found in the local catalog.
    Product(&'a Product),

    /// A content id unknown to the local catalog, e.g. a cached item served by the API.
    Unknown(String),
}

impl Display for RankedItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankedItem::Product(product) => write!(f, "{product}"),
            RankedItem::Unknown(content_id) => write!(f, "{content_id}"),
        }
    }
}

/// An in-memory product catalog, keeping insertion order.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductCatalog {
    /// Creates a catalog from a list of products. A duplicated id keeps its last product.
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            match catalog.index.get(product.id()) {
                Some(&position) => catalog.products[position] = product,
                None => {
                    catalog
                        .index
                        .insert(product.id().to_string(), catalog.products.len());
                    catalog.products.push(product);
                }
            }
        }

        catalog
    }

    /// The sample catalog used by the example program.
    pub fn sample() -> Self {
        Self::new(vec![
            Product::new("1", "Product 1", 100),
            Product::new("2", "Product 2", 200),
        ])
    }

    /// Retrieves the products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by its identifier.
    pub fn lookup(&self, content_id: &str) -> Option<&Product> {
        self.index
            .get(content_id)
            .map(|&position| &self.products[position])
    }

    /// Builds one insertion per product, to be ranked.
    pub fn insertions(&self) -> Vec<Insertion> {
        self.products
            .iter()
            .map(|product| Insertion::new(product.id()))
            .collect()
    }

    /// Applies a ranked response to the catalog.
    pub fn rerank(&self, response: &Response) -> Vec<RankedItem<'_>> {
        response
            .insertion
            .iter()
            .map(|insertion| match self.lookup(&insertion.content_id) {
                Some(product) => RankedItem::Product(product),
                None => RankedItem::Unknown(insertion.content_id.clone()),
            })
            .collect()
    }
}
