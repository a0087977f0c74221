//! Slide-deck model.
//!
//! Geometry is expressed in EMU (English Metric Units, 914 400 per inch), the
//! unit used by presentation formats.

use super::{Alignment, Run};
use serde::{Deserialize, Serialize};

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// A length in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMU (truncating).
    pub fn from_inches(inches: f64) -> Self {
        Emu((inches * EMU_PER_INCH as f64) as i64)
    }

    /// Convert to inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }
}

/// Position and size of a shape on the slide canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Distance from the left edge
    pub left: Emu,
    /// Distance from the top edge
    pub top: Emu,
    /// Shape width
    pub width: Emu,
    /// Shape height
    pub height: Emu,
}

impl Frame {
    /// Create a frame from inch measurements.
    pub fn inches(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Emu::from_inches(left),
            top: Emu::from_inches(top),
            width: Emu::from_inches(width),
            height: Emu::from_inches(height),
        }
    }

    /// A frame of the given size centered on a canvas.
    pub fn centered(width: Emu, height: Emu, canvas_width: Emu, canvas_height: Emu) -> Self {
        Self {
            left: Emu(canvas_width.0.saturating_sub(width.0) / 2),
            top: Emu(canvas_height.0.saturating_sub(height.0) / 2),
            width,
            height,
        }
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// White.
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Accent fill used for table header cells.
    pub const ACCENT: Rgb = Rgb(79, 129, 189);

    /// Hex form `RRGGBB`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// A slide deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Canvas width
    pub slide_width: Emu,

    /// Canvas height
    pub slide_height: Emu,

    /// Slides in document order
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty 16:9 deck (10 x 5.625 inches).
    pub fn widescreen() -> Self {
        Self {
            slide_width: Emu::from_inches(10.0),
            slide_height: Emu::from_inches(5.625),
            slides: Vec::new(),
        }
    }

    /// Add a slide.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get plain text content of all slides.
    pub fn plain_text(&self) -> String {
        self.slides
            .iter()
            .map(|s| s.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::widescreen()
    }
}

/// One slide: an optional title and its shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Title text
    pub title: Option<Run>,

    /// Shapes in document order
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Get plain text content of the slide.
    pub fn plain_text(&self) -> String {
        self.title
            .iter()
            .map(|t| t.text.clone())
            .chain(self.shapes.iter().filter_map(Shape::plain_text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A shape placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// A line of styled text (heading or paragraph)
    TextBlock(TextBlock),

    /// Itemized lines
    List(ListBlock),

    /// A picture
    Image(ImageShape),

    /// A grid
    Table(GridTable),
}

impl Shape {
    /// Text carried by the shape, if any.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Shape::TextBlock(t) => Some(t.run.text.clone()),
            Shape::List(l) => Some(
                l.items
                    .iter()
                    .map(|r| r.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Shape::Image(_) => None,
            Shape::Table(t) => Some(t.plain_text()),
        }
    }
}

/// Styled text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Text and font
    pub run: Run,

    /// Explicit paragraph alignment
    pub alignment: Option<Alignment>,

    /// Placement
    pub frame: Frame,
}

/// A list rendered as itemized lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Ordered (`ol`) or unordered (`ul`)
    pub ordered: bool,

    /// Indentation level of the items
    pub level: u8,

    /// One run per item
    pub items: Vec<Run>,

    /// Placement
    pub frame: Frame,
}

/// A picture shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    /// Image data or location
    pub source: ImageSource,

    /// Placement
    pub frame: Frame,
}

/// Where the picture bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    /// Local file referenced by path
    Path {
        /// File path as written in the markup
        path: String,
    },

    /// Remote image downloaded while mapping
    Remote {
        /// Source URL
        url: String,
        /// Downloaded bytes
        #[serde(skip)]
        data: Vec<u8>,
    },
}

/// A grid shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTable {
    /// Number of rows
    pub rows: usize,

    /// Number of columns (maximum cell count over all rows)
    pub cols: usize,

    /// Cells, `rows` x `cols`; short rows are padded with empty cells
    pub cells: Vec<Vec<GridCell>>,

    /// Placement
    pub frame: Frame,
}

impl GridTable {
    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Cell text
    pub text: String,

    /// Source was a `th` element
    pub header: bool,

    /// Bold text
    pub bold: bool,

    /// Solid fill color
    pub fill: Option<Rgb>,

    /// Text color
    pub text_color: Option<Rgb>,
}

impl GridCell {
    /// A regular data cell.
    pub fn data(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A header cell: accent fill, bold white text.
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            header: true,
            bold: true,
            fill: Some(Rgb::ACCENT),
            text_color: Some(Rgb::WHITE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_conversion() {
        assert_eq!(Emu::from_inches(1.0), Emu(914_400));
        assert_eq!(Emu::from_inches(5.625).0, 5_143_500);
        assert!((Emu(457_200).inches() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_centered_frame() {
        let deck = Presentation::widescreen();
        let frame = Frame::centered(
            Emu::from_inches(6.0),
            Emu::from_inches(4.0),
            deck.slide_width,
            deck.slide_height,
        );
        assert_eq!(frame.left, Emu::from_inches(2.0));
        assert_eq!(frame.top.0, (5_143_500 - 3_657_600) / 2);
    }

    #[test]
    fn test_centered_frame_saturates() {
        let frame = Frame::centered(Emu(i64::MIN), Emu(i64::MIN), Emu(100), Emu(100));
        assert_eq!(frame.left, Emu(i64::MAX / 2));
        assert_eq!(frame.top, Emu(i64::MAX / 2));
    }

    #[test]
    fn test_header_cell() {
        let cell = GridCell::header("Name");
        assert!(cell.bold);
        assert_eq!(cell.fill.map(Rgb::hex), Some("4F81BD".to_string()));
        assert_eq!(cell.text_color, Some(Rgb::WHITE));
    }
}
