// WHY: output renditions of a highlight pass - JSON for tools, HTML marks for display, text for terminals
// Class names come from the category classifier; no styling is emitted

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::highlight::{Category, RenderNode};
use crate::summary::TechniqueSummary;

/// Output rendition selected on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Html,
    Text,
}

/// Serialized view of one render node
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeView<'a> {
    pub kind: &'static str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl<'a> From<&RenderNode<'a>> for NodeView<'a> {
    fn from(node: &RenderNode<'a>) -> Self {
        Self {
            kind: if node.is_annotated() { "annotated" } else { "plain" },
            text: node.text(),
            technique: node.technique(),
            category: node.category(),
        }
    }
}

/// Full JSON report
#[derive(Serialize, Debug)]
pub struct Report<'a> {
    pub text_nodes: Vec<NodeView<'a>>,
    pub detected_techniques: Vec<&'a str>,
    pub perception_explanation: &'a str,
    pub summary: &'a TechniqueSummary<'a>,
}

impl<'a> Report<'a> {
    pub fn new(nodes: &[RenderNode<'a>], summary: &'a TechniqueSummary<'a>) -> Self {
        Self {
            text_nodes: nodes.iter().map(NodeView::from).collect(),
            detected_techniques: summary.techniques.iter().map(|t| t.technique).collect(),
            perception_explanation: summary.perception_explanation,
            summary,
        }
    }
}

/// Render in the requested format
pub fn render(format: OutputFormat, nodes: &[RenderNode<'_>], summary: &TechniqueSummary<'_>) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(nodes, summary),
        OutputFormat::Html => Ok(render_html(nodes)),
        OutputFormat::Text => Ok(render_text(nodes, summary)),
    }
}

pub fn render_json(nodes: &[RenderNode<'_>], summary: &TechniqueSummary<'_>) -> Result<String> {
    let report = Report::new(nodes, summary);
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Wrap annotated nodes in `<mark>` with the category class and technique title
pub fn render_html(nodes: &[RenderNode<'_>]) -> String {
    let mut html = String::new();
    for node in nodes {
        match node {
            RenderNode::Plain { text } => html.push_str(&escape_html(text)),
            RenderNode::Annotated { text, technique } => {
                let class = crate::highlight::classify(technique).css_class();
                let class_attr = if class.is_empty() {
                    "highlight-inline".to_string()
                } else {
                    format!("highlight-inline {class}")
                };
                html.push_str(&format!(
                    "<mark class=\"{}\" title=\"{}\">{}</mark>",
                    class_attr,
                    escape_html(technique),
                    escape_html(text)
                ));
            }
        }
    }
    html
}

/// Mark annotated nodes as `[[text|technique]]`, followed by the summary
pub fn render_text(nodes: &[RenderNode<'_>], summary: &TechniqueSummary<'_>) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            RenderNode::Plain { text } => out.push_str(text),
            RenderNode::Annotated { text, technique } => {
                out.push_str(&format!("[[{text}|{technique}]]"));
            }
        }
    }

    out.push_str("\n\n");
    out.push_str(&summary.techniques_headline);
    out.push('\n');
    for tag in &summary.techniques {
        out.push_str(&format!("  - {}\n", tag.technique));
    }

    out.push('\n');
    out.push_str(&summary.highlights_headline);
    out.push('\n');
    for row in &summary.highlights {
        out.push_str(&format!("  \"{}\" ({}): {}\n", row.phrase, row.technique, row.reason));
    }

    if !summary.perception_explanation.is_empty() {
        out.push_str("\nPerception explanation\n");
        out.push_str(summary.perception_explanation);
        out.push('\n');
    }

    for note in &summary.why_it_matters {
        out.push_str(&format!("\n{}\n{}\n", note.title, note.text));
    }

    out
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Write rendered output to a file, or stdout when no path is given
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::create(path).await?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).await?;
            if !content.ends_with('\n') {
                writer.write_all(b"\n").await?;
            }
            writer.flush().await?;
            debug!("Wrote output to {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
        }
    }
    Ok(())
}
