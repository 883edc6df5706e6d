//! Context assembly from retrieved documents

use crate::models::Source;
use crate::rag::ScoredDocument;

/// Assembler for building the grounding context block from retrieval
/// results, bounded by a maximum character length.
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    /// Concatenate document contents in score order, separated by blank
    /// lines. Stops before the entry that would exceed the length bound.
    pub fn assemble(&self, results: &[ScoredDocument]) -> String {
        let mut context = String::new();

        for result in results {
            let entry_len = result.document.content.len() + if context.is_empty() { 0 } else { 2 };
            if context.len() + entry_len > self.max_context_length {
                break;
            }
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&result.document.content);
        }

        context
    }

    /// Source attributions for the retrieved documents, in score order
    pub fn sources(&self, results: &[ScoredDocument]) -> Vec<Source> {
        results
            .iter()
            .map(|result| Source {
                doc_type: result.document.doc_type,
                metadata: result.document.metadata.clone(),
            })
            .collect()
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(4000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocType;
    use crate::models::Document;

    fn scored(content: &str, score: f32) -> ScoredDocument {
        ScoredDocument {
            document: Document {
                doc_type: DocType::Project,
                content: content.to_string(),
                metadata: serde_json::json!({"name": content}),
            },
            score,
        }
    }

    #[test]
    fn test_assemble_joins_with_blank_lines() {
        let assembler = ContextAssembler::default();
        let context = assembler.assemble(&[scored("first", 0.9), scored("second", 0.5)]);
        assert_eq!(context, "first\n\nsecond");
    }

    #[test]
    fn test_assemble_respects_length_bound() {
        let assembler = ContextAssembler::new(10);
        let context = assembler.assemble(&[scored("12345678", 0.9), scored("too long to fit", 0.5)]);
        assert_eq!(context, "12345678");
    }

    #[test]
    fn test_assemble_empty_results() {
        let assembler = ContextAssembler::default();
        assert_eq!(assembler.assemble(&[]), "");
    }

    #[test]
    fn test_sources_preserve_order_and_metadata() {
        let assembler = ContextAssembler::default();
        let sources = assembler.sources(&[scored("a", 0.9), scored("b", 0.5)]);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].doc_type, DocType::Project);
        assert_eq!(sources[0].metadata["name"], "a");
        assert_eq!(sources[1].metadata["name"], "b");
    }
}
