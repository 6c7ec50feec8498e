//! tableview - the binding layer of a recyclable, spreadsheet-like table.
//!
//! A table is split into strips (column headers, row headers, cells) whose
//! holders are recycled as the user scrolls. This crate provides the
//! column-header strip's adapter and the table-wide state it keeps holders in
//! sync with:
//!
//! - [`model`]: item capabilities, the selection handler and the column sort
//!   helper
//! - [`adapter`]: the holder contract, the item list, the column-header
//!   recycler adapter and a headless recycling strip
//! - [`TableViewConfig`]: mode flags and selection colors
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tableview::prelude::*;
//!
//! let table = Arc::new(TableViewContext::new(TableViewConfig::default()));
//! let adapter = ColumnHeaderRecyclerAdapter::new(headers, Arc::new(MyTableAdapter::new(table.clone())));
//! let mut strip = RecyclerStrip::new(adapter, ());
//!
//! strip.layout(0..8)?;
//! table.selection().set_selected_column_position(2);
//! strip.reattach_visible();
//! ```

pub use tableview_core::*;

pub mod adapter;
pub mod color;
pub mod config;
pub mod error;
pub mod model;
pub mod prelude;

pub use color::Color;
pub use config::TableViewConfig;
pub use error::{Result, TableError};
