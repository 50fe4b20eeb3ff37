//! Floor plan plotting with gnuplot
//!
//! Layers are collected first and drawn onto a single set of axes when the
//! figure is shown or saved. The y axis is flipped so the plot matches
//! warehouse coordinates, where y grows downwards.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{NavError, NavResult, Obstacle, Path, WorldPoint};
use crate::utils::grid_map::{CellState, OccupancyGrid};
use crate::warehouse::{Rack, Zone};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const GREEN: &str = "#00AA00";
    pub const BLUE: &str = "#0000FF";
    pub const RED: &str = "#FF0000";
    pub const GRAY: &str = "#808080";
    pub const ORANGE: &str = "#FFA500";

    pub const RACK: &str = BLACK;
    pub const ZONE: &str = GRAY;
    pub const BLOCKED: &str = "#C0C0C0";
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
    pub const WORKER: &str = ORANGE;
}

#[derive(Debug, Clone, PartialEq)]
enum Layer {
    Lines {
        x: Vec<f64>,
        y: Vec<f64>,
        color: &'static str,
        width: f64,
        caption: Option<String>,
    },
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        color: &'static str,
        symbol: char,
        size: f64,
        caption: Option<String>,
    },
}

/// Builder for a warehouse floor plot
pub struct FloorPlot {
    title: String,
    width: f64,
    height: f64,
    layers: Vec<Layer>,
}

impl FloorPlot {
    /// Plot covering `[0, width] x [0, height]`
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            title: String::new(),
            width,
            height,
            layers: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Centers of blocked cells as small squares
    pub fn plot_grid(&mut self, grid: &OccupancyGrid) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = grid
            .iter_cells()
            .filter(|&(_, state)| state == CellState::Blocked)
            .map(|(cell, _)| {
                let center = grid.cell_center(cell);
                (center.x, center.y)
            })
            .unzip();
        if x.is_empty() {
            return self;
        }
        self.layers.push(Layer::Points {
            x,
            y,
            color: colors::BLOCKED,
            symbol: 'S',
            size: 0.5,
            caption: Some("Blocked cells".to_string()),
        });
        self
    }

    /// Rack outlines; only the first carries a legend entry
    pub fn plot_racks(&mut self, racks: &[Rack]) -> &mut Self {
        for (i, rack) in racks.iter().enumerate() {
            let caption = (i == 0).then(|| "Racks".to_string());
            self.push_outline(&rack.footprint(), colors::RACK, 1.5, caption);
        }
        self
    }

    pub fn plot_zones(&mut self, zones: &[Zone]) -> &mut Self {
        for zone in zones {
            self.push_outline(&zone.bounds(), colors::ZONE, 1.0, Some(zone.name.clone()));
        }
        self
    }

    pub fn plot_path(&mut self, path: &Path) -> &mut Self {
        if path.is_empty() {
            return self;
        }
        self.layers.push(Layer::Lines {
            x: path.x_coords(),
            y: path.y_coords(),
            color: colors::PATH,
            width: 2.0,
            caption: Some("Route".to_string()),
        });
        self
    }

    pub fn plot_start(&mut self, point: WorldPoint) -> &mut Self {
        self.push_point(point, colors::START, 'O', "Start")
    }

    pub fn plot_goal(&mut self, point: WorldPoint) -> &mut Self {
        self.push_point(point, colors::GOAL, 'O', "Goal")
    }

    pub fn plot_worker(&mut self, point: WorldPoint) -> &mut Self {
        self.push_point(point, colors::WORKER, 'T', "Worker")
    }

    /// Finalize and show the plot
    pub fn show(&self) -> NavResult<()> {
        let mut figure = self.render();
        figure.show().map_err(|e| NavError::Plot(e.to_string())).map(|_| ())
    }

    pub fn save_png(&self, path: &str, width: u32, height: u32) -> NavResult<()> {
        let mut figure = self.render();
        figure
            .save_to_png(path, width, height)
            .map_err(|e| NavError::Plot(e.to_string()))
    }

    pub fn save_svg(&self, path: &str, width: u32, height: u32) -> NavResult<()> {
        let mut figure = self.render();
        figure
            .save_to_svg(path, width, height)
            .map_err(|e| NavError::Plot(e.to_string()))
    }

    fn push_outline(&mut self, rect: &Obstacle, color: &'static str, width: f64, caption: Option<String>) {
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
        self.layers.push(Layer::Lines {
            x: vec![x0, x1, x1, x0, x0],
            y: vec![y0, y0, y1, y1, y0],
            color,
            width,
            caption,
        });
    }

    fn push_point(&mut self, point: WorldPoint, color: &'static str, symbol: char, caption: &str) -> &mut Self {
        self.layers.push(Layer::Points {
            x: vec![point.x],
            y: vec![point.y],
            color,
            symbol,
            size: 1.5,
            caption: Some(caption.to_string()),
        });
        self
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label("x", &[]);
        axes.set_y_label("y", &[]);
        axes.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(self.width));
        axes.set_y_range(AutoOption::Fix(self.height), AutoOption::Fix(0.0));
        axes.set_aspect_ratio(AutoOption::Fix(self.height / self.width));

        for layer in &self.layers {
            match layer {
                Layer::Lines { x, y, color, width, caption } => match caption {
                    Some(caption) => {
                        axes.lines(x, y, &[Caption(caption.as_str()), Color(*color), LineWidth(*width)]);
                    }
                    None => {
                        axes.lines(x, y, &[Color(*color), LineWidth(*width)]);
                    }
                },
                Layer::Points { x, y, color, symbol, size, caption } => match caption {
                    Some(caption) => {
                        axes.points(
                            x,
                            y,
                            &[Caption(caption.as_str()), Color(*color), PointSymbol(*symbol), PointSize(*size)],
                        );
                    }
                    None => {
                        axes.points(x, y, &[Color(*color), PointSymbol(*symbol), PointSize(*size)]);
                    }
                },
            }
        }
        figure
    }
}
