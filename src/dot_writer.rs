use std::fmt::Write as _;

/// Quote a DOT identifier or attribute value. Newlines become the `\n`
/// centred line break.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn attr_list(attrs: &[(&str, &str)]) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let body: Vec<String> = attrs
        .iter()
        .map(|(key, value)| format!("{key}={}", quote(value)))
        .collect();
    format!(" [{}]", body.join(" "))
}

#[derive(Debug, Default)]
pub struct DotWriter {
    out: String,
    depth: usize,
}

impl DotWriter {
    pub fn digraph(name: &str) -> Self {
        let mut w = DotWriter::default();
        w.open(&format!("digraph {}", quote(name)));
        w
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}{text}", "  ".repeat(self.depth));
    }

    fn open(&mut self, head: &str) {
        self.line(&format!("{head} {{"));
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub fn defaults(&mut self, kind: &str, attrs: &[(&str, &str)]) {
        self.line(&format!("{kind}{}", attr_list(attrs)));
    }

    pub fn node(&mut self, id: &str, attrs: &[(&str, &str)]) {
        self.line(&format!("{}{}", quote(id), attr_list(attrs)));
    }

    pub fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, &str)]) {
        self.line(&format!("{} -> {}{}", quote(from), quote(to), attr_list(attrs)));
    }

    pub fn subgraph(&mut self, name: &str) {
        self.open(&format!("subgraph {}", quote(name)));
    }

    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.close();
        }
        self.out
    }
}
