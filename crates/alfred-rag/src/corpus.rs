//! Corpus construction from guest records

use alfred_core::{Corpus, Document, DocumentMetadata, GuestRecord};

/// Build one document per record, preserving record order
pub fn build(records: &[GuestRecord]) -> Corpus {
    Corpus::from_documents(records.iter().map(document_from_record).collect())
}

/// Render a record as a `Name/Relation/Description/Email` block
pub fn document_from_record(record: &GuestRecord) -> Document {
    let text = [
        format!("Name: {}", record.name),
        format!("Relation: {}", record.relation),
        format!("Description: {}", record.description),
        format!("Email: {}", record.email),
    ]
    .join("\n");

    Document {
        text,
        metadata: DocumentMetadata {
            name: record.name.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guests() -> Vec<GuestRecord> {
        vec![
            GuestRecord::new(
                "Ada Lovelace",
                "aunt",
                "mathematician",
                "ada@example.com",
            ),
            GuestRecord::new("Marie Curie", "friend", "physicist", "marie@example.com"),
            GuestRecord::new("Dr. Nikola Tesla", "old friend", "inventor", "nikola@example.com"),
        ]
    }

    #[test]
    fn test_document_format() {
        let doc = document_from_record(&guests()[0]);

        assert_eq!(
            doc.text,
            "Name: Ada Lovelace\nRelation: aunt\nDescription: mathematician\nEmail: ada@example.com"
        );
        assert_eq!(doc.metadata.name, "Ada Lovelace");
    }

    #[test]
    fn test_build_preserves_order_and_names() {
        let records = guests();
        let corpus = build(&records);

        assert_eq!(corpus.len(), records.len());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(corpus.get(i).unwrap().metadata.name, record.name);
        }
    }

    #[test]
    fn test_build_empty() {
        let corpus = build(&[]);
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = guests();
        assert_eq!(build(&records), build(&records));
    }

    #[test]
    fn test_empty_fields_keep_labels() {
        let doc = document_from_record(&GuestRecord::default());
        assert_eq!(doc.text, "Name: \nRelation: \nDescription: \nEmail: ");
        assert_eq!(doc.metadata.name, "");
    }
}
