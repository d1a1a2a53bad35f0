//! Document model types for reconstructed scan layouts.
//!
//! This module defines the intermediate representation that bridges layout
//! analysis and rendering: tokens, rows, regions and the blocks derived from
//! them. Formatters in [`crate::render`] only read these types.

mod document;
mod extraction;
mod paragraph;
mod region;
mod row;
mod table;
mod token;

pub use document::{Block, LayoutDocument, Metadata, NormalizeStats};
pub use extraction::{Extraction, NoTextReason};
pub use paragraph::Paragraph;
pub use region::{Region, RegionKind};
pub use row::{Row, RowItem};
pub use table::TableGrid;
pub use token::{BoundingBox, Point, Token};
