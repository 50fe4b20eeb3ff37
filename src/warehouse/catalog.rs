//! Product and rack lookup over a layout

use crate::warehouse::layout::{Product, Rack, WarehouseLayout};

/// Stock level below which a product counts as low
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Read-only query view over a [`WarehouseLayout`]
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    layout: &'a WarehouseLayout,
}

impl<'a> Catalog<'a> {
    pub fn new(layout: &'a WarehouseLayout) -> Self {
        Self { layout }
    }

    pub fn product(&self, id: &str) -> Option<&'a Product> {
        self.layout.products.iter().find(|p| p.id == id)
    }

    pub fn rack(&self, id: &str) -> Option<&'a Rack> {
        self.layout.racks.iter().find(|r| r.id == id)
    }

    pub fn products_in_rack(&self, rack_id: &str) -> Vec<&'a Product> {
        self.layout.products.iter().filter(|p| p.rack == rack_id).collect()
    }

    /// Product picked when a rack is selected directly
    pub fn first_product_in_rack(&self, rack_id: &str) -> Option<&'a Product> {
        self.layout.products.iter().find(|p| p.rack == rack_id)
    }

    /// Case-insensitive match on product name, id or rack id.
    ///
    /// An empty query matches everything; `category` filters exactly.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&'a Product> {
        let needle = query.to_lowercase();
        self.layout
            .products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.id.to_lowercase().contains(&needle)
                    || p.rack.to_lowercase().contains(&needle)
            })
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&'a str> {
        let mut categories: Vec<&'a str> = Vec::new();
        for product in &self.layout.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }
        categories
    }

    pub fn total_stock(&self) -> u64 {
        self.layout.products.iter().map(|p| u64::from(p.quantity)).sum()
    }

    pub fn low_stock(&self, threshold: u32) -> Vec<&'a Product> {
        self.layout.products.iter().filter(|p| p.quantity < threshold).collect()
    }
}

impl WarehouseLayout {
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(self)
    }
}
