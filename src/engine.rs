use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Dot,
    Neato,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Dot => "dot",
            Layout::Neato => "neato",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Png,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Png => "png",
        }
    }
}

pub trait LayoutEngine: Send + Sync {
    fn pipe(&self, source: &str, layout: Layout, format: OutputFormat) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct Graphviz {
    program: String,
}

impl Graphviz {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl LayoutEngine for Graphviz {
    fn pipe(&self, source: &str, layout: Layout, format: OutputFormat) -> Result<Vec<u8>> {
        tracing::debug!(
            program = %self.program,
            layout = layout.as_str(),
            format = format.as_str(),
            "invoking layout engine"
        );
        let spawn_err = |source| Error::EngineSpawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .arg(format!("-K{}", layout.as_str()))
            .arg(format!("-T{}", format.as_str()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // stdin is dropped at the end of this block so the engine sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };
        if let Err(err) = &written {
            tracing::warn!(program = %self.program, error = %err, "failed to write graph to engine");
        }

        // the child is always reaped, even when the write failed
        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::EngineRejected(stderr.trim().to_string()));
        }
        written?;
        Ok(output.stdout)
    }
}
