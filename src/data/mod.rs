//! Data layer: core types, reading, cleaning and lookup.
//!
//! Architecture:
//! ```text
//!  .xlsx / .csv / .parquet / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  reader   │  parse file → RawTable (header + cells)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  table    │  select label/x/y, coerce, drop bad rows → PointSet
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  index    │  padded Bounds + nearest-point lookup
//!   └──────────┘
//! ```

pub mod index;
pub mod model;
pub mod reader;
pub mod sample;
pub mod table;
