//! Summary endpoints: summarize, translate, save, list and delete, all
//! scoped to the authenticated caller.

pub mod dtos;
pub mod handlers;
pub mod pipeline;

pub use pipeline::{Source, SummaryPipeline};
