use serde::{Deserialize, Serialize};
use std::fmt;

/// One element of rendered output, in the order it should be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Block {
    Header(String),
    Subheader(String),
    Text(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Block {
    /// Plain-text rendering for a terminal
    pub fn describe(&self) -> String {
        match self {
            Block::Header(text) => format!("\n# {}", text),
            Block::Subheader(text) => format!("## {}", text),
            Block::Text(text) => text.clone(),
            Block::Info(text) => format!("info: {}", text),
            Block::Warning(text) => format!("warning: {}", text),
            Block::Error(text) => format!("error: {}", text),
        }
    }
}

/// Everything produced for one itinerary request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub blocks: Vec<Block>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Header(text.into()));
    }

    pub fn subheader(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Subheader(text.into()));
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Text(text.into()));
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Info(text.into()));
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Warning(text.into()));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Error(text.into()));
    }

    pub fn headers(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Header(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn subheaders(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Subheader(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Warning(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_error(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Error(_)))
    }

    pub fn to_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::describe)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
