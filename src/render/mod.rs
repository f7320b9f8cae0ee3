// File: ./src/render/mod.rs
//! Output artifacts: a 1-bit bitmap or an HTML document.
pub mod bitmap;
pub mod html;

use crate::layout::Snapshot;
use crate::model::TodoLine;
use anyhow::Result;
use bitmap::Canvas;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Png,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Html => "html",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ArtifactContent {
    Bitmap(Canvas),
    Html(String),
}

/// What a render call hands back to the host.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub width: u32,
    pub height: u32,
    /// The data the artifact was drawn from.
    pub snapshot: Snapshot,
    pub content: ArtifactContent,
    /// Task lines that did not fit on the bitmap.
    pub hidden: usize,
}

impl RenderedArtifact {
    pub fn draw(snapshot: Snapshot, width: u32, height: u32, format: OutputFormat) -> Self {
        let (content, hidden) = match format {
            OutputFormat::Png => {
                let (canvas, hidden) = bitmap::render(&snapshot, width, height);
                (ArtifactContent::Bitmap(canvas), hidden)
            }
            OutputFormat::Html => (
                ArtifactContent::Html(html::render(&snapshot, width, height)),
                0,
            ),
        };
        Self {
            width,
            height,
            snapshot,
            content,
            hidden,
        }
    }

    pub fn format(&self) -> OutputFormat {
        match self.content {
            ArtifactContent::Bitmap(_) => OutputFormat::Png,
            ArtifactContent::Html(_) => OutputFormat::Html,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.format().extension()
    }

    pub fn lines(&self) -> &[TodoLine] {
        self.snapshot.lines()
    }

    /// Encoded file contents (PNG bytes or UTF-8 HTML).
    pub fn encode(&self) -> Result<Vec<u8>> {
        match &self.content {
            ArtifactContent::Bitmap(canvas) => canvas.to_png(),
            ArtifactContent::Html(doc) => Ok(doc.clone().into_bytes()),
        }
    }
}
