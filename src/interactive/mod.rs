//! Interactive window harness for real-time walking around the map

mod viewer;

pub use viewer::{InteractiveViewer, ViewerConfig};
