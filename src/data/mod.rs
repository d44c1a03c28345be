//! The trust graph built from batch payments.

pub use create::GraphBuilder;
pub use graph::{build_index, GraphIndex};
pub use info::GraphInfo;
pub use read::{open_sink, open_source, records, Records};
pub use view::GraphView;

mod create;
mod graph;
mod info;
mod read;
mod view;
