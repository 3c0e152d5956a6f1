//! Turning a measurement log into chart-ready series.
//!
//! The pipeline stages live in focused submodules:
//!
//! 1. **Selection** ([`select`]): category-path resolution and recursive
//!    traversal of a measurement tree
//! 2. **Aggregation** ([`aggregate`]): pooling start/end/duration and
//!    navigation samples across runs
//! 3. **Ranking** ([`legend`]): median ordering, index assignment, and
//!    the re-keyed series the charts consume

pub mod aggregate;
pub mod legend;
pub mod select;

pub use aggregate::{aggregate_log, EventSamples, NavigationSamples};
pub use legend::{
    build_event_legend, build_navigation_legend, Legend, RankedNavigation, RankedSeries,
};
pub use select::{resolve_path, visit_measurements, UnknownCategory};
