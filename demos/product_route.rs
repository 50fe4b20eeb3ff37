//! Route a worker to a product and print the directions.
//!
//! Usage:
//!   cargo run --example product_route -- --product SKU-031
//!   cargo run --example product_route -- --rack C2 --walk --plot route.png

use std::path::Path;

use clap::Parser;
use log::warn;

use warehouse_nav::utils::FloorPlot;
use warehouse_nav::{NavigationSession, WarehouseLayout};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Warehouse layout file
    #[arg(short, long, default_value = "configs/warehouse.yaml")]
    layout: String,

    /// Product id to route to
    #[arg(short, long, default_value = "SKU-031")]
    product: String,

    /// Route to the first product on this rack instead
    #[arg(short, long)]
    rack: Option<String>,

    /// Print every waypoint as the worker walks the route
    #[arg(short, long)]
    walk: bool,

    /// Save a PNG of the floor plan and route
    #[arg(long)]
    plot: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let layout_path = Path::new(&args.layout);
    let layout = if layout_path.exists() {
        WarehouseLayout::load(layout_path).unwrap_or_else(|e| {
            warn!("failed to load {}: {}, using demo layout", layout_path.display(), e);
            WarehouseLayout::demo()
        })
    } else {
        println!("Layout not found at {}, using demo layout", layout_path.display());
        WarehouseLayout::demo()
    };

    let mut session = NavigationSession::new(layout);
    let selected = match &args.rack {
        Some(rack) => session.select_rack(rack).map(|p| p.is_some()),
        None => session.select_product(&args.product).map(|_| true),
    };
    match selected {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("Rack has no products");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let Some(product) = session.selected_product().cloned() else {
        std::process::exit(1);
    };
    println!("{} ({}) - rack {}, shelf {}", product.name, product.id, product.rack, product.shelf);

    if session.path().is_empty() {
        println!("No route found");
        std::process::exit(1);
    }

    if let Some(metrics) = session.route_metrics() {
        println!("Distance: {} m", metrics.distance_label());
        println!("Walking time: {}", metrics.walking_time_label);
        for step in &metrics.directions {
            println!("{:>2}. {} {}", step.step, step.icon, step.instruction);
        }
    }

    let route = session.path().clone();
    let start = session.worker_position();

    if args.walk {
        for (i, point) in session.start_navigation().enumerate() {
            println!("  waypoint {}: ({:.1}, {:.1})", i, point.x, point.y);
        }
    }

    if let Some(output) = args.plot {
        let layout = session.layout();
        let grid = layout.build_grid();
        let mut plot = FloorPlot::new(layout.grid.width(), layout.grid.height());
        plot.set_title(&format!("Route to {}", product.name))
            .plot_grid(&grid)
            .plot_zones(&layout.zones)
            .plot_racks(&layout.racks)
            .plot_path(&route)
            .plot_start(start)
            .plot_goal(product.location());
        if args.walk {
            plot.plot_worker(session.worker_position());
        }
        match plot.save_png(&output, 900, 600) {
            Ok(()) => println!("Saved {}", output),
            Err(e) => eprintln!("{}", e),
        }
    }
}
