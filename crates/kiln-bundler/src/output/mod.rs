//! Build results and output writing.

mod context;
pub mod writer;

pub use context::BuildContext;
pub use writer::OutputFile;
