//! View-state layer - the windowing engine
//!
//! Everything here is headless: no terminal, no I/O, no threads. The host
//! feeds geometry and scroll notifications in and reads cells out.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (CellGeometry, ViewportDimensions, ViewportState)
//! - `layout`: Position, Layout, LayoutState - pure grid layout
//! - `layout_params`: LayoutParams - layout invalidation key
//! - `visible_range`: VisibleRange - realized index range with margins
//! - `render_set`: RenderSet - (widget, position) pairs for the range
//! - `scroll`: ScrollPosition - semantic scroll targets resolved to offsets
//! - `scheduler`: Clock, Scheduler - cancellable deadlines
//! - `tracker`: ViewportTracker - scroll settling and resize handling
//! - `grid`: VirtualGrid - one grid instance and its lifecycle

pub mod grid;
pub mod layout;
pub mod layout_params;
pub mod render_set;
pub mod scheduler;
pub mod scroll;
pub mod tracker;
pub mod types;
pub mod visible_range;

pub use grid::{CellProps, GridPhase, UpdateOutcome, VirtualGrid};
pub use layout::{compute_layout, compute_total_height, Layout, LayoutState, Position};
pub use scheduler::{Clock, ManualClock, SystemClock};
pub use scroll::ScrollPosition;
pub use tracker::{Recompute, ViewportTracker, DEFAULT_SETTLE_DELAY};
pub use types::{CellGeometry, InvalidGeometry, ViewportDimensions, ViewportState};
pub use visible_range::{compute_visible_range, VisibleRange};
