//! Load a label/x/y table from a spreadsheet, plot it, and find the point
//! nearest to a click.
//!
//! The data layer ([`data`]) has no UI dependencies; [`app`] and [`ui`] wire
//! it into an eframe window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use app::ScatterpickApp;
pub use config::ViewerConfig;
pub use data::index::{Nearest, PointIndex};
pub use data::model::{Bounds, Cell, Point, PointSet, RawTable};
pub use data::reader::{load_path, read_table};
pub use data::table::load;
pub use error::SourceUnreadable;
