use winnow::prelude::*;
use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{not, opt};
use winnow::token::one_of;

pub const CANONICAL_HEADER: &str = "strict digraph G ";

const FENCES: [&str; 3] = ["```graphviz", "```dot", "```"];
const FENCE_TAGS: [&str; 3] = ["graphviz", "dot", "gv"];

/// Best-effort rewrite of model output into DOT the layout engine accepts.
///
/// Text without any `{` is returned untouched so the engine reports the
/// failure instead of this step inventing an empty graph.
pub fn repair(raw: &str) -> String {
    if !raw.contains('{') {
        return raw.to_string();
    }
    let text = strip_fences(raw);
    let text = directed_keyword(&text);
    let text = directed_connectors(&text);
    let text = fix_compound_keywords(&text);
    canonical_header(&text)
}

fn strip_fences(text: &str) -> String {
    let mut out = text.to_string();
    for fence in FENCES {
        out = out.replace(fence, "");
    }
    out.trim().to_string()
}

fn undirected_header<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    let prefix = (multispace0, opt(("strict", multispace1)))
        .take()
        .parse_next(input)?;
    "graph".parse_next(input)?;
    not(one_of(|c: char| c.is_alphanumeric() || c == '_')).parse_next(input)?;
    Ok(prefix)
}

fn directed_keyword(text: &str) -> String {
    let mut input = text;
    match undirected_header.parse_next(&mut input) {
        Ok(prefix) => format!("{prefix}digraph{input}"),
        Err(_) => text.to_string(),
    }
}

fn directed_connectors(text: &str) -> String {
    text.replace("-->", "->").replace("--", "->")
}

fn fix_compound_keywords(text: &str) -> String {
    // only the header; body words are node ids
    let (head, body) = text.split_at(text.find('{').unwrap_or(text.len()));
    let head: String = head
        .split_inclusive(char::is_whitespace)
        .map(|piece| {
            let word = piece.trim_end();
            let separator = &piece[word.len()..];
            format!("{}{separator}", fix_word(word))
        })
        .collect();
    head + body
}

fn fix_word(word: &str) -> String {
    let Some(at) = word.find("digraph") else {
        return word.to_string();
    };
    let (head, keyword) = word.split_at(at);
    if head.eq_ignore_ascii_case("strict") {
        format!("strict {keyword}")
    } else if FENCE_TAGS.iter().any(|tag| head.eq_ignore_ascii_case(tag)) {
        keyword.to_string()
    } else {
        word.to_string()
    }
}

fn canonical_header(text: &str) -> String {
    match text.find('{') {
        Some(at) => format!("{CANONICAL_HEADER}{}", &text[at..]),
        None => text.to_string(),
    }
}
