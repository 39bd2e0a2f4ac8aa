use crate::dot_repair::CANONICAL_HEADER;

pub const NO_WEB_CONTEXT: &str =
    "No web context is available for this topic. Rely on your own knowledge of how such systems are built.";

pub fn build(topic: &str, context: &str) -> String {
    format!(
        r#"You are a System Design Architect. Create a High-Level Design (HLD) for "{topic}".

REFERENCE MATERIAL:
{context}

CRITICAL OUTPUT RULES:
1. Return ONLY valid Graphviz DOT code. No markdown, no explanations.
2. Start with '{header}{{'.
3. Use '->' for connections (NOT '--').
4. Use these specific shapes:
   - Database/Storage -> shape=cylinder
   - User/Client -> shape=circle
   - Service/App -> shape=diamond
5. Styling:
   - If a connection is async (like Kafka), use style=dashed.
   - If a connection is standard, use style=solid.
"#,
        header = CANONICAL_HEADER,
    )
}
