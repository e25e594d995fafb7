//! Snapshot tests for guest retrieval

#[cfg(test)]
mod snapshot_tests {
    use crate::{GuestInfoRetrieverTool, GuestRecord, NO_RESULTS, RetrieverConfig, Tool, corpus};
    use insta::assert_yaml_snapshot;
    use serde_json::json;

    fn gala_guests() -> Vec<GuestRecord> {
        vec![
            GuestRecord::new(
                "Ada Lovelace",
                "best friend",
                "Lady Ada Lovelace is my best friend. She is an esteemed mathematician.",
                "ada.lovelace@example.com",
            ),
            GuestRecord::new(
                "Dr. Nikola Tesla",
                "old friend from university days",
                "Dr. Nikola Tesla is an old friend from your university days. He recently patented a wireless energy transmission system.",
                "nikola.tesla@gmail.com",
            ),
            GuestRecord::new(
                "Marie Curie",
                "no relation",
                "Marie Curie was a groundbreaking physicist and chemist, famous for her research on radioactivity.",
                "marie.curie@example.com",
            ),
        ]
    }

    fn gala_tool() -> GuestInfoRetrieverTool {
        GuestInfoRetrieverTool::from_corpus(corpus::build(&gala_guests()), RetrieverConfig::default())
            .unwrap()
    }

    #[test]
    fn test_corpus_metadata_snapshot() {
        let corpus = corpus::build(&gala_guests());
        let metadata: Vec<_> = corpus.iter().map(|d| &d.metadata).collect();

        assert_yaml_snapshot!(metadata, @r###"
        ---
        - name: Ada Lovelace
        - name: Dr. Nikola Tesla
        - name: Marie Curie
        "###);
    }

    #[tokio::test]
    async fn test_tool_call_single_hit() {
        let tool = gala_tool();

        let result = tool.call(json!({"query": "radioactivity"})).await.unwrap();

        assert_eq!(
            result,
            "Name: Marie Curie\n\
             Relation: no relation\n\
             Description: Marie Curie was a groundbreaking physicist and chemist, famous for her research on radioactivity.\n\
             Email: marie.curie@example.com"
        );
    }

    #[test]
    fn test_relation_query_ranks_friends() {
        let tool = gala_tool();

        let names: Vec<_> = tool
            .search("friend", 3)
            .unwrap()
            .into_iter()
            .map(|(doc, _)| doc.metadata.name.clone())
            .collect();

        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Ada Lovelace".to_string()));
        assert!(names.contains(&"Dr. Nikola Tesla".to_string()));
    }

    #[test]
    fn test_no_match_snapshot() {
        let tool = gala_tool();

        assert_eq!(tool.retrieve("Rosalind Franklin").unwrap(), NO_RESULTS);
        assert_yaml_snapshot!(tool.retrieve("Rosalind Franklin").unwrap(), @r###"
        ---
        No relevant documents found
        "###);
    }
}
