//! Warehouse floor plan: bounds, zones, racks and product locations
//!
//! A layout is plain data handed to the planner per request. It can be
//! loaded from YAML or taken from the built-in demo floor plan.

use std::path::Path as FsPath;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::common::{NavError, NavResult, Obstacle, WorldPoint};
use crate::config::NavigationConfig;
use crate::utils::{build_grid, GridConfig, OccupancyGrid};

/// Named floor area (docks, packing, entrance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Zone {
    pub fn bounds(&self) -> Obstacle {
        Obstacle::new(self.x, self.y, self.width, self.height)
    }
}

/// Shelving rack; its footprint is an obstacle for routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    pub id: String,
    pub section: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rack {
    pub fn footprint(&self) -> Obstacle {
        Obstacle::new(self.x, self.y, self.width, self.height)
    }
}

/// Stocked item and its pick location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Id of the rack holding the product
    pub rack: String,
    pub shelf: u32,
    pub quantity: u32,
    pub x: f64,
    pub y: f64,
}

impl Product {
    pub fn location(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseLayout {
    pub grid: GridConfig,
    pub worker_start: WorldPoint,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub racks: Vec<Rack>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl WarehouseLayout {
    /// Load and validate a layout from a YAML file
    pub fn load(path: &FsPath) -> NavResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let layout = Self::from_yaml(&contents)?;
        debug!(
            "loaded layout {}: {} racks, {} products",
            path.display(),
            layout.racks.len(),
            layout.products.len()
        );
        Ok(layout)
    }

    /// Parse and validate a layout from a YAML string
    pub fn from_yaml(yaml: &str) -> NavResult<Self> {
        let layout: Self = serde_yaml::from_str(yaml).map_err(|e| NavError::Config(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_yaml(&self) -> NavResult<String> {
        serde_yaml::to_string(self).map_err(|e| NavError::Config(e.to_string()))
    }

    /// Check cross references and tuning parameters
    pub fn validate(&self) -> NavResult<()> {
        self.navigation.validate()?;

        if !self.worker_start.is_finite() {
            return Err(NavError::Config("worker_start must be finite".to_string()));
        }
        for (i, rack) in self.racks.iter().enumerate() {
            if self.racks[..i].iter().any(|r| r.id == rack.id) {
                return Err(NavError::Config(format!("duplicate rack id {}", rack.id)));
            }
        }
        for (i, product) in self.products.iter().enumerate() {
            if self.products[..i].iter().any(|p| p.id == product.id) {
                return Err(NavError::Config(format!("duplicate product id {}", product.id)));
            }
            if !self.racks.iter().any(|r| r.id == product.rack) {
                return Err(NavError::Config(format!(
                    "product {} references unknown rack {}",
                    product.id, product.rack
                )));
            }
            if !product.location().is_finite() {
                return Err(NavError::Config(format!("product {} has no finite location", product.id)));
            }
        }
        Ok(())
    }

    /// Rack footprints as routing obstacles
    pub fn obstacles(&self) -> Vec<Obstacle> {
        self.racks.iter().map(Rack::footprint).collect()
    }

    /// Fresh occupancy grid for this floor plan
    pub fn build_grid(&self) -> OccupancyGrid {
        build_grid(&self.grid, &self.obstacles())
    }

    /// First zone containing the point
    pub fn zone_at(&self, point: &WorldPoint) -> Option<&Zone> {
        self.zones.iter().find(|z| z.bounds().contains(point))
    }

    /// Built-in 900x600 demo floor plan: four rack sections between five
    /// aisles, docks in the corners and the worker entrance bottom-left.
    pub fn demo() -> Self {
        let rack_category = |id: &str| {
            DEMO_RACKS
                .iter()
                .find(|r| r.0 == id)
                .map(|r| r.5.to_string())
                .unwrap_or_default()
        };

        let zones = DEMO_ZONES
            .iter()
            .map(|&(id, name, x, y, width, height)| Zone {
                id: id.to_string(),
                name: name.to_string(),
                x,
                y,
                width,
                height,
            })
            .collect();

        let racks = DEMO_RACKS
            .iter()
            .map(|&(id, x, y, width, height, category)| Rack {
                id: id.to_string(),
                section: id[..1].to_string(),
                category: category.to_string(),
                x,
                y,
                width,
                height,
            })
            .collect();

        let products = DEMO_PRODUCTS
            .iter()
            .map(|&(id, name, rack, shelf, quantity, x, y)| Product {
                id: id.to_string(),
                name: name.to_string(),
                category: rack_category(rack),
                rack: rack.to_string(),
                shelf,
                quantity,
                x,
                y,
            })
            .collect();

        Self {
            grid: GridConfig::default(),
            worker_start: WorldPoint::new(50.0, 550.0),
            zones,
            racks,
            products,
            navigation: NavigationConfig::default(),
        }
    }
}

// (id, name, x, y, width, height)
const DEMO_ZONES: [(&str, &str, f64, f64, f64, f64); 4] = [
    ("receiving", "Receiving Dock", 0.0, 0.0, 180.0, 100.0),
    ("shipping", "Shipping Dock", 720.0, 0.0, 180.0, 100.0),
    ("packing", "Packing Station", 720.0, 500.0, 180.0, 100.0),
    ("entrance", "Worker Entrance", 0.0, 500.0, 100.0, 100.0),
];

// (id, x, y, width, height, category)
const DEMO_RACKS: [(&str, f64, f64, f64, f64, &str); 16] = [
    ("A1", 140.0, 140.0, 100.0, 60.0, "Electronics"),
    ("A2", 140.0, 200.0, 100.0, 80.0, "Electronics"),
    ("A3", 140.0, 320.0, 100.0, 60.0, "Electronics"),
    ("A4", 140.0, 380.0, 100.0, 80.0, "Electronics"),
    ("B1", 280.0, 140.0, 100.0, 60.0, "Home & Kitchen"),
    ("B2", 280.0, 200.0, 100.0, 80.0, "Home & Kitchen"),
    ("B3", 280.0, 320.0, 100.0, 60.0, "Home & Kitchen"),
    ("B4", 280.0, 380.0, 100.0, 80.0, "Home & Kitchen"),
    ("C1", 420.0, 140.0, 100.0, 60.0, "Clothing"),
    ("C2", 420.0, 200.0, 100.0, 80.0, "Clothing"),
    ("C3", 420.0, 320.0, 100.0, 60.0, "Clothing"),
    ("C4", 420.0, 380.0, 100.0, 80.0, "Clothing"),
    ("D1", 560.0, 140.0, 100.0, 60.0, "Books & Media"),
    ("D2", 560.0, 200.0, 100.0, 80.0, "Books & Media"),
    ("D3", 560.0, 320.0, 100.0, 60.0, "Books & Media"),
    ("D4", 560.0, 380.0, 100.0, 80.0, "Books & Media"),
];

// (id, name, rack, shelf, quantity, x, y)
const DEMO_PRODUCTS: [(&str, &str, &str, u32, u32, f64, f64); 40] = [
    ("SKU-001", "iPhone 15 Pro", "A1", 1, 45, 160.0, 155.0),
    ("SKU-002", "Samsung Galaxy S24", "A1", 2, 32, 180.0, 170.0),
    ("SKU-003", "MacBook Pro 16\"", "A2", 1, 18, 160.0, 220.0),
    ("SKU-004", "Dell XPS 15", "A2", 2, 24, 180.0, 240.0),
    ("SKU-005", "Sony WH-1000XM5", "A2", 3, 67, 200.0, 260.0),
    ("SKU-006", "AirPods Pro 2", "A3", 1, 120, 160.0, 340.0),
    ("SKU-007", "iPad Air", "A3", 2, 38, 180.0, 360.0),
    ("SKU-008", "Nintendo Switch", "A4", 1, 56, 160.0, 400.0),
    ("SKU-009", "PS5 Controller", "A4", 2, 89, 180.0, 420.0),
    ("SKU-010", "Xbox Series X", "A4", 3, 22, 200.0, 440.0),
    ("SKU-011", "Instant Pot Duo", "B1", 1, 34, 300.0, 155.0),
    ("SKU-012", "Ninja Blender", "B1", 2, 28, 320.0, 170.0),
    ("SKU-013", "KitchenAid Mixer", "B2", 1, 15, 300.0, 220.0),
    ("SKU-014", "Dyson V15 Vacuum", "B2", 2, 42, 320.0, 240.0),
    ("SKU-015", "Keurig Coffee Maker", "B2", 3, 53, 340.0, 260.0),
    ("SKU-016", "Air Fryer XL", "B3", 1, 76, 300.0, 340.0),
    ("SKU-017", "Cast Iron Skillet Set", "B3", 2, 44, 320.0, 360.0),
    ("SKU-018", "Vitamix Blender", "B4", 1, 19, 300.0, 400.0),
    ("SKU-019", "Robot Vacuum", "B4", 2, 31, 320.0, 420.0),
    ("SKU-020", "Espresso Machine", "B4", 3, 27, 340.0, 440.0),
    ("SKU-021", "Nike Air Max", "C1", 1, 156, 440.0, 155.0),
    ("SKU-022", "Adidas Ultraboost", "C1", 2, 134, 460.0, 170.0),
    ("SKU-023", "Levi's 501 Jeans", "C2", 1, 89, 440.0, 220.0),
    ("SKU-024", "North Face Jacket", "C2", 2, 67, 460.0, 240.0),
    ("SKU-025", "Champion Hoodie", "C2", 3, 203, 480.0, 260.0),
    ("SKU-026", "Ray-Ban Sunglasses", "C3", 1, 78, 440.0, 340.0),
    ("SKU-027", "Fossil Watch", "C3", 2, 45, 460.0, 360.0),
    ("SKU-028", "Herschel Backpack", "C4", 1, 92, 440.0, 400.0),
    ("SKU-029", "Under Armour Shorts", "C4", 2, 187, 460.0, 420.0),
    ("SKU-030", "Carhartt Beanie", "C4", 3, 234, 480.0, 440.0),
    ("SKU-031", "Atomic Habits", "D1", 1, 89, 580.0, 155.0),
    ("SKU-032", "The Psychology of Money", "D1", 2, 67, 600.0, 170.0),
    ("SKU-033", "Dune (Hardcover)", "D2", 1, 45, 580.0, 220.0),
    ("SKU-034", "Harry Potter Box Set", "D2", 2, 34, 600.0, 240.0),
    ("SKU-035", "Kindle Paperwhite", "D2", 3, 78, 620.0, 260.0),
    ("SKU-036", "Taylor Swift Vinyl", "D3", 1, 156, 580.0, 340.0),
    ("SKU-037", "Bluetooth Speaker", "D3", 2, 89, 600.0, 360.0),
    ("SKU-038", "Board Game Collection", "D4", 1, 43, 580.0, 400.0),
    ("SKU-039", "LEGO Star Wars Set", "D4", 2, 67, 600.0, 420.0),
    ("SKU-040", "Puzzle 1000 Pieces", "D4", 3, 112, 620.0, 440.0),
];
