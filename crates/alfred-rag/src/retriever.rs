//! The `guest_info_retriever` agent tool

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use alfred_core::tool::string_argument;
use alfred_core::{Corpus, Document, Error, Result, Tool, ToolInput, ToolSpec};

use crate::index::GuestIndex;

/// Returned when no document matches the query
pub const NO_RESULTS: &str = "No relevant documents found";

pub const TOOL_NAME: &str = "guest_info_retriever";
pub const TOOL_DESCRIPTION: &str = "Retrieves information about a guest by name or relation.";

/// Configuration for the guest retriever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// Maximum number of documents returned per query
    pub top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

struct ReadyIndex {
    corpus: Corpus,
    index: GuestIndex,
}

/// BM25 lookup over the guest corpus, exposed to agents as a tool
///
/// The tool starts uninitialized; `initialize` builds the index once and
/// every later `retrieve` reads it without mutation.
pub struct GuestInfoRetrieverTool {
    spec: ToolSpec,
    config: RetrieverConfig,
    ready: Option<ReadyIndex>,
}

impl GuestInfoRetrieverTool {
    /// Create an uninitialized tool
    pub fn new(config: RetrieverConfig) -> Self {
        Self {
            spec: ToolSpec {
                name: TOOL_NAME.to_string(),
                description: TOOL_DESCRIPTION.to_string(),
                inputs: vec![ToolInput::string(
                    "query",
                    "The name or relation of the guest you want information about",
                )],
                output_type: "string".to_string(),
            },
            config,
            ready: None,
        }
    }

    /// Create a tool and index `corpus` in one step
    pub fn from_corpus(corpus: Corpus, config: RetrieverConfig) -> Result<Self> {
        let mut tool = Self::new(config);
        tool.initialize(corpus)?;
        Ok(tool)
    }

    /// Build the retrieval index over `corpus`
    ///
    /// Can only succeed once per tool.
    pub fn initialize(&mut self, corpus: Corpus) -> Result<()> {
        if self.ready.is_some() {
            return Err(Error::InvalidInput(
                "guest retriever is already initialized".to_string(),
            ));
        }

        let index = GuestIndex::build(&corpus)?;
        info!(documents = corpus.len(), "guest retriever ready");

        self.ready = Some(ReadyIndex { corpus, index });
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.is_some()
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Retrieve with the configured `top_k`
    pub fn retrieve(&self, query: &str) -> Result<String> {
        self.retrieve_top_k(query, self.config.top_k)
    }

    /// Matching guest documents joined by a blank line, or [`NO_RESULTS`]
    pub fn retrieve_top_k(&self, query: &str, top_k: usize) -> Result<String> {
        let documents = self.search(query, top_k)?;

        if documents.is_empty() {
            return Ok(NO_RESULTS.to_string());
        }

        Ok(documents
            .iter()
            .map(|(doc, _)| doc.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    /// Up to `top_k` matching documents with their scores, best first
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<(&Document, f32)>> {
        let ready = self.ready.as_ref().ok_or(Error::NotInitialized)?;

        if top_k == 0 {
            return Err(Error::InvalidInput("top_k must be at least 1".to_string()));
        }

        let hits: Vec<(&Document, f32)> = ready
            .index
            .search(query)
            .into_iter()
            .take(top_k)
            .filter_map(|hit| ready.corpus.get(hit.index).map(|doc| (doc, hit.score)))
            .collect();

        debug!(query, top_k, hits = hits.len(), "guest lookup");
        Ok(hits)
    }
}

impl Default for GuestInfoRetrieverTool {
    fn default() -> Self {
        Self::new(RetrieverConfig::default())
    }
}

#[async_trait]
impl Tool for GuestInfoRetrieverTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn call(&self, arguments: Value) -> Result<String> {
        let query = string_argument(&arguments, "query")?;
        self.retrieve(query)
    }
}
