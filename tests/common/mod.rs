/*!
 * Common test utilities for the runloc test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use runloc::host::document::{Node, Run};
use runloc::style::{Color, TextDecoration};
use runloc::{Document, Style};

/// Initializes test logging once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

pub fn regular() -> Style {
    Style::default()
}

pub fn bold() -> Style {
    Style::default().with_font("Inter", "Bold")
}

pub fn red_underline() -> Style {
    Style::default()
        .with_fill(Color::rgb(1.0, 0.0, 0.0))
        .with_decoration(TextDecoration::Underline)
}

/// Document with one text node per entry, all selected
pub fn document_with(nodes: Vec<(&str, Vec<Run>)>) -> Document {
    Document::new(
        nodes
            .into_iter()
            .map(|(id, runs)| Node::text(id, runs))
            .collect(),
    )
}

/// EN/FR/RU dictionary used across tests
pub const SAMPLE_DICTIONARY: &str = "EN\tFR\tRU
Hello world\tBonjour monde\tПривет мир
world\tmonde\tмир
Hello!\tBonjour !\tПривет!
42 items\t42 articles\t42 предмета
Save\t\tСохранить
";

/// Exceptions used across tests: bare numbers and placeholders
pub const SAMPLE_EXCEPTIONS: &str = "^\\d+$

^\\{[a-z_]+\\}$
";

/// Same content as a JSON document file
pub const SAMPLE_DOCUMENT_JSON: &str = r#"{
  "nodes": [
    {
      "type": "frame",
      "id": "1:1",
      "name": "Card",
      "children": [
        {
          "type": "text",
          "id": "1:2",
          "name": "Title",
          "runs": [
            { "text": "Hello ", "style": { "font_name": { "family": "Inter", "style": "Regular" }, "font_size": 16 } },
            { "text": "world", "style": { "font_name": { "family": "Inter", "style": "Bold" }, "font_size": 16 } }
          ]
        },
        {
          "type": "text",
          "id": "1:3",
          "name": "Counter",
          "runs": [
            { "text": "42", "style": { "font_name": { "family": "Inter", "style": "Regular" }, "font_size": 12 } }
          ]
        }
      ]
    }
  ],
  "selection": ["1:1"]
}"#;
