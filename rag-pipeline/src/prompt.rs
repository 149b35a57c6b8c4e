//! The fixed three-part synthesis prompt and context rendering.

use rag_core::ScoredChunk;

/// Fallback sentence the model is instructed to emit when no Buffett
/// snippets were retrieved.
pub const BUFFETT_FALLBACK: &str =
    "No specific information from Warren Buffett was found on this topic.";

/// Fallback sentence for the Dalio section.
pub const DALIO_FALLBACK: &str =
    "No specific information from Ray Dalio was found on this topic.";

/// Section headers the model is asked to produce, in order.
pub const SECTION_HEADERS: [&str; 3] = [
    "Warren Buffett's Perspective",
    "Ray Dalio's Perspective",
    "Synthesized Analyst Take",
];

const SYNTHESIS_PROMPT_TEMPLATE: &str = r#"You are an expert investment analyst and moderator. Your job is to answer the user's
question by synthesizing information from two of the world's greatest investors:
Warren Buffett (WB) and Ray Dalio (RD).

You will be given a user's question and a set of retrieved document snippets.
These snippets are tagged with their source (e.g., "Source: Warren Buffett").

**Your task is to structure your answer in three distinct parts:**

1.  **Warren Buffett's Perspective:**
    -   Present Warren Buffett's view on the question.
    -   You MUST base this *only* on the provided context snippets from "Warren Buffett".
    -   If no relevant snippets from Buffett are provided, state "No specific information from Warren Buffett was found on this topic."

2.  **Ray Dalio's Perspective:**
    -   Present Ray Dalio's view on the question.
    -   You MUST base this *only* on the provided context snippets from "Ray Dalio".
    -   If no relevant snippets from Dalio are provided, state "No specific information from Ray Dalio was found on this topic."

3.  **Synthesized Analyst Take:**
    -   Provide a final, concluding analysis.
    -   Compare and contrast the two perspectives. Are they in agreement? Do they conflict?
    -   Offer a balanced summary for the user.

**Here is the user's question:**
{question}

**Here are the retrieved document snippets:**
{context}

Please provide your full, structured response.
"#;

/// Renders retrieved chunks as labeled `Source:` / `Snippet:` blocks,
/// blank-line separated, in retriever order.
pub fn format_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|sc| {
            format!(
                "Source: {}\nSnippet: {}",
                sc.chunk.author.display_name(),
                sc.chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Substitutes the raw question and rendered context into the template.
/// The question is passed through unmodified, however long it is.
pub fn build_synthesis_prompt(question: &str, context: &str) -> String {
    SYNTHESIS_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{context}", context)
}
