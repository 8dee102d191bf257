//! Service layer consumed by the dashboard bindings.
//!
//! Services sit between the pipeline artifacts and the Python bindings. They
//! combine loading, filtering and formatting into the queries the dashboard
//! pages need.

pub mod fleet_view;

pub use fleet_view::FleetView;
