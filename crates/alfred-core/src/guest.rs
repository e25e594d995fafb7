//! Guest records and the documents derived from them

use serde::{Deserialize, Deserializer, Serialize};

/// A single row of the guest dataset
///
/// Missing or `null` fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

impl GuestRecord {
    pub fn new(
        name: impl Into<String>,
        relation: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            description: description.into(),
            email: email.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifying metadata attached to a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
}

/// A retrievable text document, one per guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Ordered collection of documents, in dataset order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Wrap documents that were produced elsewhere
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let record: GuestRecord =
            serde_json::from_str(r#"{"name": "Ada Lovelace", "relation": null}"#).unwrap();

        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.relation, "");
        assert_eq!(record.description, "");
        assert_eq!(record.email, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record: GuestRecord = serde_json::from_str(
            r#"{"name": "Marie Curie", "relation": "friend", "description": "physicist", "email": "marie@example.com", "table": 4}"#,
        )
        .unwrap();

        assert_eq!(
            record,
            GuestRecord::new("Marie Curie", "friend", "physicist", "marie@example.com")
        );
    }
}
