use std::time::Duration;

use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::error::Result;
use crate::prompt::NO_WEB_CONTEXT;

pub const MAX_LINKS: usize = 5;
pub const MIN_CONTEXT_CHARS: usize = 200;
pub const MAX_CONTEXT_CHARS: usize = 15_000;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) archgen/0.1";
const INSTANT_ANSWER_URL: &str = "https://api.duckduckgo.com/";
const HTML_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const TEXT_SELECTOR: &str = "p, li, h1, h2, h3";
const RESULT_LINK_SELECTOR: &str = "a.result__a";

/// A search strategy. An empty list means "nothing found", including when the
/// strategy itself failed.
pub trait LinkSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn search(&self, query: &str) -> Vec<String>;
}

pub trait PageSource: Send + Sync {
    fn fetch_text(&self, url: &str) -> Option<String>;
}

pub struct ContextGatherer {
    sources: Vec<Box<dyn LinkSource>>,
    pages: Box<dyn PageSource>,
}

impl ContextGatherer {
    pub fn new(sources: Vec<Box<dyn LinkSource>>, pages: Box<dyn PageSource>) -> Self {
        Self { sources, pages }
    }

    pub fn duckduckgo() -> Self {
        let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
        Self::new(
            vec![
                Box::new(InstantAnswerSearch::new(agent.clone())),
                Box::new(HtmlFormSearch::new(agent.clone())),
            ],
            Box::new(HttpPageSource::new(agent)),
        )
    }

    pub fn gather(&self, topic: &str) -> String {
        let query = format!("{topic} system design architecture");
        let links = self.find_links(&query);

        for url in links.iter().take(MAX_LINKS) {
            let Some(text) = self.pages.fetch_text(url) else {
                continue;
            };
            if text.chars().count() > MIN_CONTEXT_CHARS {
                tracing::info!(%url, chars = text.len(), "using web context");
                return truncate_chars(&text, MAX_CONTEXT_CHARS);
            }
            tracing::debug!(%url, "page text too short");
        }

        tracing::info!(topic, "no usable web context");
        NO_WEB_CONTEXT.to_string()
    }

    fn find_links(&self, query: &str) -> Vec<String> {
        for source in &self.sources {
            let links = source.search(query);
            if !links.is_empty() {
                tracing::debug!(source = source.name(), count = links.len(), "search hit");
                return links;
            }
            tracing::debug!(source = source.name(), "search returned nothing");
        }
        Vec::new()
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

pub struct InstantAnswerSearch {
    agent: ureq::Agent,
}

#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "Results", default)]
    results: Vec<Topic>,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<Topic>,
}

#[derive(Debug, Default, Deserialize)]
struct Topic {
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    #[serde(rename = "Topics", default)]
    topics: Vec<Topic>,
}

impl InstantAnswerSearch {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn try_search(&self, query: &str) -> Result<Vec<String>> {
        let answer: InstantAnswer = self
            .agent
            .get(INSTANT_ANSWER_URL)
            .set("User-Agent", USER_AGENT)
            .query("q", query)
            .query("format", "json")
            .query("no_html", "1")
            .query("skip_disambig", "1")
            .call()?
            .into_json()?;
        Ok(instant_answer_links(answer))
    }
}

impl LinkSource for InstantAnswerSearch {
    fn name(&self) -> &'static str {
        "instant-answer"
    }

    fn search(&self, query: &str) -> Vec<String> {
        self.try_search(query).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "instant answer search failed");
            Vec::new()
        })
    }
}

fn instant_answer_links(answer: InstantAnswer) -> Vec<String> {
    fn walk(topics: Vec<Topic>, out: &mut Vec<String>) {
        for topic in topics {
            out.extend(topic.first_url);
            walk(topic.topics, out);
        }
    }

    let mut links = Vec::new();
    if !answer.abstract_url.is_empty() {
        links.push(answer.abstract_url);
    }
    walk(answer.results, &mut links);
    walk(answer.related_topics, &mut links);
    links.retain(|link| is_external(link));
    links
}

fn is_external(link: &str) -> bool {
    match Url::parse(link) {
        Ok(url) => url
            .host_str()
            .is_some_and(|host| !host.ends_with("duckduckgo.com")),
        Err(_) => false,
    }
}

pub struct HtmlFormSearch {
    agent: ureq::Agent,
}

impl HtmlFormSearch {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn try_search(&self, query: &str) -> Result<Vec<String>> {
        let body = self
            .agent
            .post(HTML_SEARCH_URL)
            .set("User-Agent", USER_AGENT)
            .send_form(&[("q", query)])?
            .into_string()?;
        Ok(result_links(&body))
    }
}

impl LinkSource for HtmlFormSearch {
    fn name(&self) -> &'static str {
        "html-form"
    }

    fn search(&self, query: &str) -> Vec<String> {
        self.try_search(query).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "html form search failed");
            Vec::new()
        })
    }
}

fn result_links(markup: &str) -> Vec<String> {
    let Some(anchors) = selector(RESULT_LINK_SELECTOR) else {
        return Vec::new();
    };
    let document = Html::parse_document(markup);
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(unwrap_redirect)
        .collect()
}

// Result anchors point at `//duckduckgo.com/l/?uddg=<target>`; pull the
// target out, or keep direct links as they are.
fn unwrap_redirect(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let url = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = url.query_pairs().find(|(key, _)| key == "uddg") {
        return Some(target.into_owned());
    }
    is_external(&absolute).then_some(absolute)
}

pub struct HttpPageSource {
    agent: ureq::Agent,
}

impl HttpPageSource {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn try_fetch(&self, url: &str) -> Result<String> {
        let body = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .call()?
            .into_string()?;
        Ok(page_text(&body))
    }
}

impl PageSource for HttpPageSource {
    fn fetch_text(&self, url: &str) -> Option<String> {
        match self.try_fetch(url) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(%url, error = %err, "page fetch failed");
                None
            }
        }
    }
}

pub fn page_text(markup: &str) -> String {
    let Some(blocks) = selector(TEXT_SELECTOR) else {
        return String::new();
    };
    let document = Html::parse_document(markup);
    document
        .select(&blocks)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
