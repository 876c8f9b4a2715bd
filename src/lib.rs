//! Diagram Poster
//!
//! Composes four rendered design diagrams into a single labeled poster, and
//! fetches diagram images from a remote Mermaid renderer.
//!
//! # Features
//!
//! - **Poster composition**: a fixed 2x2 grid where every row and column is
//!   sized by its largest image, so nothing is scaled, clipped or overlapped
//! - **Remote rendering** (`remote`, default): extract the Nth fenced diagram
//!   block from a document and download the rendered image
//! - **Safe output**: results are written to a temporary file and renamed into
//!   place, so a failed run never leaves a complete-looking file behind
//!
//! # Example
//!
//! ```no_run
//! use diagram_poster::{PosterComposer, PosterConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PosterConfig {
//!     padding: 32,
//!     ..Default::default()
//! };
//!
//! let report = PosterComposer::new(config).run()?;
//! println!("Created {} ({}x{})", report.output.display(), report.width, report.height);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub mod error;
pub use error::{Error, Result};

pub mod extract;
pub mod output;
pub mod poster;
pub mod rendering;

// HTTP client for the Mermaid rendering endpoint
#[cfg(feature = "remote")]
pub mod remote;

pub use poster::{PosterComposer, PosterReport};
pub use rendering::font::{FontFallback, TitleFont};
pub use rendering::layout::PosterLayout;
pub use rendering::Cell;

#[cfg(feature = "remote")]
pub use remote::DiagramRenderer;

/// One of the four fixed cells of the poster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl GridPosition {
    /// Drawing and loading order
    pub const ALL: [GridPosition; 4] = [
        GridPosition::TopLeft,
        GridPosition::TopRight,
        GridPosition::BottomLeft,
        GridPosition::BottomRight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GridPosition::TopLeft => "top-left",
            GridPosition::TopRight => "top-right",
            GridPosition::BottomLeft => "bottom-left",
            GridPosition::BottomRight => "bottom-right",
        }
    }
}

/// A value for each of the four grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Quad<T> {
    pub top_left: T,
    pub top_right: T,
    pub bottom_left: T,
    pub bottom_right: T,
}

impl<T> Quad<T> {
    pub fn from_fn(mut f: impl FnMut(GridPosition) -> T) -> Self {
        Self {
            top_left: f(GridPosition::TopLeft),
            top_right: f(GridPosition::TopRight),
            bottom_left: f(GridPosition::BottomLeft),
            bottom_right: f(GridPosition::BottomRight),
        }
    }

    pub fn get(&self, pos: GridPosition) -> &T {
        match pos {
            GridPosition::TopLeft => &self.top_left,
            GridPosition::TopRight => &self.top_right,
            GridPosition::BottomLeft => &self.bottom_left,
            GridPosition::BottomRight => &self.bottom_right,
        }
    }

    /// Borrow every slot, like `array::each_ref`.
    pub fn each_ref(&self) -> Quad<&T> {
        Quad {
            top_left: &self.top_left,
            top_right: &self.top_right,
            bottom_left: &self.bottom_left,
            bottom_right: &self.bottom_right,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(GridPosition, T) -> U) -> Quad<U> {
        Quad {
            top_left: f(GridPosition::TopLeft, self.top_left),
            top_right: f(GridPosition::TopRight, self.top_right),
            bottom_left: f(GridPosition::BottomLeft, self.bottom_left),
            bottom_right: f(GridPosition::BottomRight, self.bottom_right),
        }
    }

    /// Like `map`, stopping at the first error in grid order.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(GridPosition, T) -> std::result::Result<U, E>,
    ) -> std::result::Result<Quad<U>, E> {
        Ok(Quad {
            top_left: f(GridPosition::TopLeft, self.top_left)?,
            top_right: f(GridPosition::TopRight, self.top_right)?,
            bottom_left: f(GridPosition::BottomLeft, self.bottom_left)?,
            bottom_right: f(GridPosition::BottomRight, self.bottom_right)?,
        })
    }

    /// Iterate in grid order
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, &T)> {
        GridPosition::ALL.into_iter().map(move |pos| (pos, self.get(pos)))
    }
}

/// An input image file and the title drawn above it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CellSource {
    pub path: PathBuf,
    pub title: String,
}

impl CellSource {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }
}

/// Configuration for poster composition
///
/// Defaults reproduce the system design poster: the four diagrams are read
/// from the working directory and the result is written next to them.
///
/// # Examples
///
/// ```
/// let cfg = diagram_poster::PosterConfig::default();
/// assert_eq!(cfg.padding, 40);
/// assert_eq!(cfg.title_height, 60);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Input images and their titles
    pub inputs: Quad<CellSource>,
    /// Output image path; the extension picks the format (PNG if unknown)
    pub output: PathBuf,
    /// Margin around and gap between cells, in pixels
    pub padding: u32,
    /// Strip reserved above each image for its title, in pixels
    pub title_height: u32,
    /// Preferred title font; `None` goes straight to the built-in font
    pub font_path: Option<PathBuf>,
    /// Title font size in pixels
    pub font_size: f32,
    /// Border thickness around each image (0 disables borders)
    pub border_width: u32,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            inputs: Quad {
                top_left: CellSource::new("conceptual_erd.png", "1. Entity Relationship Diagram"),
                top_right: CellSource::new("use_case.png", "2. Use Case Diagram"),
                bottom_left: CellSource::new(
                    "sequence_diagram.png",
                    "3. Sequence Diagram (Checkout)",
                ),
                bottom_right: CellSource::new("customer_journey.png", "4. Customer Journey Flow"),
            },
            output: PathBuf::from("system_design_poster.png"),
            padding: 40,
            title_height: 60,
            font_path: Some(PathBuf::from("arial.ttf")),
            font_size: 30.0,
            border_width: 2,
        }
    }
}

/// Configuration for the remote rendering endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Base URL; the encoded diagram is appended as the last path segment
    pub endpoint: String,
    /// HTTP timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://mermaid.ink/img/".to_string(),
            timeout_ms: 30000,
            user_agent: concat!("diagram-poster/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Where a diagram comes from and where the rendered image goes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Markdown document containing fenced diagram blocks
    pub document: PathBuf,
    /// Fence language tag
    pub language: String,
    /// Zero-based block index; the use case diagram is the second block
    pub index: usize,
    pub output: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("design_diagrams.md"),
            language: "mermaid".to_string(),
            index: 1,
            output: PathBuf::from("use_case.png"),
        }
    }
}

/// Root of the optional JSON configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub poster: PosterConfig,
    pub renderer: RendererConfig,
    pub fetch: FetchConfig,
}

impl AppConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config_error = |e: &dyn std::fmt::Display| {
            Error::ConfigError(format!("{}: {}", path.display(), e))
        };
        let text = std::fs::read_to_string(path).map_err(|e| config_error(&e))?;
        Self::from_json_str(&text).map_err(|e| config_error(&e))
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
