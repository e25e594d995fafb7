//! BM25 index over a guest corpus

use bm25::{Language, SearchEngine, SearchEngineBuilder};
use tracing::debug;

use alfred_core::{Corpus, Error, Result};

/// A corpus position with its BM25 relevance score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument {
    pub index: usize,
    pub score: f32,
}

/// Read-only BM25 index, keyed by corpus position
///
/// Documents and queries go through the same English tokenizer
/// (case folding, word splitting, stemming, stop-word removal).
pub struct GuestIndex {
    engine: SearchEngine<usize>,
    len: usize,
}

impl GuestIndex {
    /// Build the index over every document of `corpus`
    ///
    /// Fails if a document has no text. An empty corpus yields an empty index.
    pub fn build(corpus: &Corpus) -> Result<Self> {
        for (i, doc) in corpus.iter().enumerate() {
            if doc.text.trim().is_empty() {
                return Err(Error::IndexBuild(format!(
                    "document {} ({:?}) has no text",
                    i, doc.metadata.name
                )));
            }
        }

        if corpus.is_empty() {
            let engine = SearchEngineBuilder::<usize>::with_avgdl(1.0).build();
            return Ok(Self { engine, len: 0 });
        }

        let documents: Vec<bm25::Document<usize>> = corpus
            .iter()
            .enumerate()
            .map(|(i, doc)| bm25::Document::new(i, doc.text.clone()))
            .collect();

        let engine =
            SearchEngineBuilder::<usize>::with_documents(Language::English, documents).build();

        debug!(documents = corpus.len(), "built BM25 index");

        Ok(Self {
            engine,
            len: corpus.len(),
        })
    }

    /// Every document with a positive score, best first
    ///
    /// Equal scores keep corpus order.
    pub fn search(&self, query: &str) -> Vec<ScoredDocument> {
        if self.len == 0 || query.trim().is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredDocument> = self
            .engine
            .search(query, self.len)
            .into_iter()
            .filter(|r| r.score > 0.0)
            .map(|r| ScoredDocument {
                index: r.document.id,
                score: r.score,
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
        scored
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
