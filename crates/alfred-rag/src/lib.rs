//! Guest retrieval for Alfred
//!
//! This crate turns guest records into a text corpus, indexes it with BM25 and
//! exposes the index to agents as the `guest_info_retriever` tool. It also
//! provides the dataset sources the corpus is loaded from.

pub mod corpus;
mod dataset;
mod index;
mod retriever;

#[cfg(test)]
mod tests;

pub use dataset::{
    DEFAULT_HUB_DATASET, DEFAULT_SPLIT, FileDatasetSource, HubDatasetSource, dataset_source,
    load_records_or_empty,
};
pub use index::{GuestIndex, ScoredDocument};
pub use retriever::{
    GuestInfoRetrieverTool, NO_RESULTS, RetrieverConfig, TOOL_DESCRIPTION, TOOL_NAME,
};

// Re-export core types for convenience
pub use alfred_core::{
    Corpus, DatasetSource, Document, DocumentMetadata, Error, GuestRecord, Result, Tool, ToolSpec,
};
