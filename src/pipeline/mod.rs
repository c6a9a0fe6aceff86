pub mod exporter;
pub mod filter;
pub mod state;

pub use exporter::{AlertExporter, RunSummary};
pub use filter::{filter_alerts, is_reportable};
pub use state::{PaginationState, Transition};
