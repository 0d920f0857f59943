//! Grounded prompt assembly.

/// Instruction placed ahead of the retrieved documents.
const PREAMBLE: &str =
    "Use the following documents to answer the question. Cite source chunks when possible.";

/// Assemble a grounded generation prompt from a query and retrieved chunks.
///
/// Chunks are concatenated in the given order, separated by a blank line,
/// under a fixed preamble and followed by the question. No ranking or
/// deduplication happens here; the retrieval pipeline owns ordering. Zero
/// chunks produce a prompt with an empty documents section.
pub fn assemble_prompt(query: &str, chunks: &[&str]) -> String {
    let context = chunks.join("\n\n");
    format!("{PREAMBLE}\n\nDocuments:\n{context}\n\nQuestion: {query}\n")
}
