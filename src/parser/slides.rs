//! HTML slide mapper.
//!
//! Each `div` carrying the slide marker class becomes one slide; without any
//! marker the whole body is a single slide. The first heading inside a
//! slide is its title and is excluded from the content walk.

use super::image::ImageFetcher;
use super::options::ParseOptions;
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Emu, Frame, GridCell, GridTable, ImageShape, ImageSource, ListBlock, Presentation,
    Run, Shape, Slide, StyleDefaults, TextBlock,
};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Image size used when the markup gives none, in inches.
pub const DEFAULT_IMAGE_WIDTH: f64 = 6.0;
/// See [`DEFAULT_IMAGE_WIDTH`].
pub const DEFAULT_IMAGE_HEIGHT: f64 = 4.0;

/// Largest accepted image width or height in inches.
pub const MAX_IMAGE_DIMENSION: f64 = 1_000.0;

fn heading_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap())
}

fn body_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("body").unwrap())
}

fn row_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("tr").unwrap())
}

/// Map slide markup to a presentation.
///
/// Never fails. Images that cannot be sized or downloaded are logged and
/// left out; everything else on the slide is kept.
pub fn map_slides(html: &str, options: &ParseOptions, fetcher: &dyn ImageFetcher) -> Presentation {
    let document = Html::parse_document(html);
    let mut presentation = Presentation::widescreen();
    let marker = options.slide_marker_class.as_str();

    let marked: Vec<ElementRef<'_>> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "div" && el.value().classes().any(|c| c == marker))
        .collect();

    let sources = if marked.is_empty() {
        let body = document
            .select(body_selector())
            .next()
            .unwrap_or_else(|| document.root_element());
        vec![body]
    } else {
        marked
    };

    log::debug!("Mapping {} slide(s)", sources.len());
    for source in sources {
        let slide = SlideBuilder::new(options, fetcher, &presentation).build(source);
        presentation.add_slide(slide);
    }
    presentation
}

/// How an element contributes to a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Heading(u8),
    Paragraph,
    List { ordered: bool },
    Image,
    Table,
    Container,
    Ignored,
}

impl ElementKind {
    fn of(name: &str) -> Self {
        match name {
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "p" => ElementKind::Paragraph,
            "ul" => ElementKind::List { ordered: false },
            "ol" => ElementKind::List { ordered: true },
            "img" => ElementKind::Image,
            "table" => ElementKind::Table,
            "div" | "section" | "article" | "main" | "header" | "footer" | "nav" | "aside" => {
                ElementKind::Container
            }
            _ => ElementKind::Ignored,
        }
    }
}

/// Point size for a heading of `level` relative to the body size.
fn heading_size(level: u8, base: u32) -> u32 {
    match level {
        1 => base + 6,
        2 => base + 4,
        3 => base + 2,
        _ => base,
    }
}

/// Depth-first walk over one slide's subtree.
struct SlideBuilder<'a, 'h> {
    style: StyleDefaults,
    fetcher: &'a dyn ImageFetcher,
    canvas: (Emu, Emu),
    title: Option<ElementRef<'h>>,
    slide: Slide,
}

impl<'a, 'h> SlideBuilder<'a, 'h> {
    fn new(options: &ParseOptions, fetcher: &'a dyn ImageFetcher, deck: &Presentation) -> Self {
        Self {
            style: options.style(),
            fetcher,
            canvas: (deck.slide_width, deck.slide_height),
            title: None,
            slide: Slide::new(),
        }
    }

    fn build(mut self, source: ElementRef<'h>) -> Slide {
        self.title = source.select(heading_selector()).next();
        if let Some(title) = self.title {
            let text = self.text_of(title);
            let size = self.style.font_size + 4;
            self.slide.title = (!text.is_empty()).then(|| Run::bold(text, &self.style.with_size(size)));
        }

        self.visit_children(source);
        log::debug!(
            "Slide {:?} has {} shape(s)",
            self.slide.title.as_ref().map(|t| t.text.as_str()),
            self.slide.shapes.len()
        );
        self.slide
    }

    fn visit_children(&mut self, parent: ElementRef<'h>) {
        for child in parent.children().filter_map(ElementRef::wrap) {
            if self.is_title(child) {
                continue;
            }
            self.visit(child);
        }
    }

    fn visit(&mut self, el: ElementRef<'h>) {
        match ElementKind::of(el.value().name()) {
            ElementKind::Heading(level) => self.add_heading(el, level),
            ElementKind::Paragraph => self.add_paragraph(el),
            ElementKind::List { ordered } => self.add_list(el, ordered),
            ElementKind::Image => self.add_image(el),
            ElementKind::Table => self.add_table(el),
            ElementKind::Container => self.visit_children(el),
            ElementKind::Ignored => {}
        }
    }

    fn add_heading(&mut self, el: ElementRef<'h>, level: u8) {
        let text = self.text_of(el);
        if text.is_empty() {
            return;
        }
        let style = self.style.with_size(heading_size(level, self.style.font_size));
        self.slide.add_shape(Shape::TextBlock(TextBlock {
            run: Run::bold(text, &style),
            alignment: None,
            frame: Frame::inches(1.0, 1.5, 8.0, 0.5),
        }));
    }

    fn add_paragraph(&mut self, el: ElementRef<'h>) {
        let text = self.text_of(el);
        if text.is_empty() {
            return;
        }
        self.slide.add_shape(Shape::TextBlock(TextBlock {
            run: Run::plain(text, &self.style),
            alignment: el.value().attr("align").and_then(Alignment::from_keyword),
            frame: Frame::inches(1.0, 1.5, 8.0, 0.5),
        }));
    }

    fn add_list(&mut self, el: ElementRef<'h>, ordered: bool) {
        let items: Vec<Run> = el
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li" && !self.is_title(*child))
            .map(|li| self.text_of(li))
            .filter(|text| !text.is_empty())
            .map(|text| Run::plain(text, &self.style))
            .collect();
        if items.is_empty() {
            return;
        }

        // unordered lists sit one level deeper and further right
        let (level, left) = if ordered { (0, 1.0) } else { (1, 1.5) };
        self.slide.add_shape(Shape::List(ListBlock {
            ordered,
            level,
            items,
            frame: Frame::inches(left, 1.5, 7.0, 0.5),
        }));
    }

    fn add_image(&mut self, el: ElementRef<'h>) {
        let Some(src) = el.value().attr("src").filter(|s| !s.is_empty()) else {
            return;
        };
        match self.image_shape(el, src) {
            Ok(shape) => self.slide.add_shape(Shape::Image(shape)),
            Err(e) => log::warn!("Image {} omitted: {}", src, e),
        }
    }

    fn image_shape(&self, el: ElementRef<'h>, src: &str) -> Result<ImageShape> {
        let width = parse_dimension(el.value().attr("width"), DEFAULT_IMAGE_WIDTH)?;
        let height = parse_dimension(el.value().attr("height"), DEFAULT_IMAGE_HEIGHT)?;

        let source = if src.starts_with("http") {
            ImageSource::Remote {
                url: src.to_string(),
                data: self.fetcher.fetch(src)?,
            }
        } else {
            ImageSource::Path {
                path: src.to_string(),
            }
        };

        let (canvas_width, canvas_height) = self.canvas;
        Ok(ImageShape {
            source,
            frame: Frame::centered(
                Emu::from_inches(width),
                Emu::from_inches(height),
                canvas_width,
                canvas_height,
            ),
        })
    }

    fn add_table(&mut self, el: ElementRef<'h>) {
        let rows: Vec<Vec<GridCell>> = el
            .select(row_selector())
            .map(|tr| {
                tr.children()
                    .filter_map(ElementRef::wrap)
                    .filter_map(|cell| match cell.value().name() {
                        "th" => Some(GridCell::header(self.text_of(cell))),
                        "td" => Some(GridCell::data(self.text_of(cell))),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if cols == 0 {
            log::debug!("Skipping table without cells");
            return;
        }

        let cells: Vec<Vec<GridCell>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize_with(cols, GridCell::default);
                row
            })
            .collect();
        self.slide.add_shape(Shape::Table(GridTable {
            rows: cells.len(),
            cols,
            cells,
            frame: Frame::inches(1.0, 1.5, 8.0, 4.0),
        }));
    }

    fn is_title(&self, el: ElementRef<'h>) -> bool {
        self.title.is_some_and(|title| title.id() == el.id())
    }

    /// Trimmed text of an element, leaving out the slide title.
    fn text_of(&self, el: ElementRef<'h>) -> String {
        let title = self.title.filter(|title| title.id() != el.id());
        let text: String = el
            .descendants()
            .filter(|node| match title {
                Some(title) => !node.ancestors().any(|a| a.id() == title.id()),
                None => true,
            })
            .filter_map(|node| node.value().as_text().map(|t| &**t))
            .collect();
        text.trim().to_string()
    }
}

/// Parse an inch dimension attribute, `default` when absent.
///
/// Values must be positive and at most [`MAX_IMAGE_DIMENSION`].
fn parse_dimension(raw: Option<&str>, default: f64) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value > 0.0 && value <= MAX_IMAGE_DIMENSION => Ok(value),
        _ => Err(Error::InvalidDimension(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeFetcher {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl ImageFetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(Error::ImageFetch("connection refused".to_string()))
            } else {
                Ok(vec![0x89, b'P', b'N', b'G'])
            }
        }
    }

    fn map(html: &str) -> Presentation {
        map_slides(html, &ParseOptions::default(), &FakeFetcher::default())
    }

    fn text_shape(shape: &Shape) -> &TextBlock {
        match shape {
            Shape::TextBlock(t) => t,
            other => panic!("expected text block, got {:?}", other),
        }
    }

    #[test]
    fn test_marked_slides() {
        let deck = map(
            r#"<div class="slide"><h1>One</h1><p>first</p></div>
               <div class="slide"><h2>Two</h2><p>second</p></div>"#,
        );
        assert_eq!(deck.slide_count(), 2);
        let title = deck.slides[0].title.as_ref().unwrap();
        assert_eq!(title.text, "One");
        assert!(title.bold);
        assert_eq!(title.font_size, 15);
        assert_eq!(deck.slides[1].title.as_ref().unwrap().text, "Two");
        assert_eq!(deck.slides[1].shapes.len(), 1);
    }

    #[test]
    fn test_whole_document_without_markers() {
        let deck = map("<h1>Deck</h1><p>body text</p><h2>Section</h2>");
        assert_eq!(deck.slide_count(), 1);
        let slide = &deck.slides[0];
        assert_eq!(slide.title.as_ref().unwrap().text, "Deck");
        assert_eq!(slide.shapes.len(), 2);
        assert_eq!(text_shape(&slide.shapes[0]).run.text, "body text");

        let heading = &text_shape(&slide.shapes[1]).run;
        assert!(heading.bold);
        assert_eq!(heading.font_size, 15);
    }

    #[test]
    fn test_paragraph_alignment() {
        let deck = map(r#"<p align="center">mid</p><p align="right">end</p><p>plain</p>"#);
        let shapes = &deck.slides[0].shapes;
        assert_eq!(text_shape(&shapes[0]).alignment, Some(Alignment::Center));
        assert_eq!(text_shape(&shapes[1]).alignment, Some(Alignment::Right));
        assert_eq!(text_shape(&shapes[2]).alignment, None);
    }

    #[test]
    fn test_lists() {
        let deck = map("<ul><li>a</li><li> </li><li>b</li></ul><ol><li>one</li></ol><ul></ul>");
        let shapes = &deck.slides[0].shapes;
        assert_eq!(shapes.len(), 2);
        match &shapes[0] {
            Shape::List(list) => {
                assert!(!list.ordered);
                assert_eq!(list.level, 1);
                assert_eq!(list.items.len(), 2);
                assert_eq!(list.frame.left, Emu::from_inches(1.5));
            }
            other => panic!("expected list, got {:?}", other),
        }
        match &shapes[1] {
            Shape::List(list) => {
                assert!(list.ordered);
                assert_eq!(list.level, 0);
                assert_eq!(list.frame.left, Emu::from_inches(1.0));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_remote_image_centered_with_default_size() {
        let fetcher = FakeFetcher::default();
        let deck = map_slides(
            r#"<img src="https://example.com/a.png">"#,
            &ParseOptions::default(),
            &fetcher,
        );
        match &deck.slides[0].shapes[0] {
            Shape::Image(image) => {
                assert!(matches!(&image.source, ImageSource::Remote { data, .. } if data.len() == 4));
                assert_eq!(image.frame.width, Emu(5_486_400));
                assert_eq!(image.frame.left, Emu(1_828_800));
                assert_eq!(image.frame.top, Emu(742_950));
            }
            other => panic!("expected image, got {:?}", other),
        }
        assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_image_is_omitted() {
        let fetcher = FakeFetcher {
            fail: true,
            ..FakeFetcher::default()
        };
        let deck = map_slides(
            r#"<p>before</p><img src="http://down/x.png"><p>after</p>"#,
            &ParseOptions::default(),
            &fetcher,
        );
        let shapes = &deck.slides[0].shapes;
        assert_eq!(shapes.len(), 2);
        assert_eq!(text_shape(&shapes[1]).run.text, "after");
    }

    #[test]
    fn test_invalid_dimension_skips_fetch() {
        let fetcher = FakeFetcher::default();
        let deck = map_slides(
            r#"<img src="http://host/x.png" width="wide">"#,
            &ParseOptions::default(),
            &fetcher,
        );
        assert!(deck.slides[0].shapes.is_empty());
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_dimensions_omit_image() {
        for size in ["-1e300", "0", "-2", "1e300", "NaN", "inf"] {
            let fetcher = FakeFetcher::default();
            let html = format!(
                r#"<p>kept</p><img src="a.png" width="{0}"><img src="http://host/x.png" height="{0}">"#,
                size
            );
            let deck = map_slides(&html, &ParseOptions::default(), &fetcher);
            let shapes = &deck.slides[0].shapes;
            assert_eq!(shapes.len(), 1, "width/height {}", size);
            assert_eq!(text_shape(&shapes[0]).run.text, "kept");
            assert!(fetcher.calls.lock().unwrap().is_empty());
        }
    }

    #[test]
    fn test_local_image_with_explicit_size() {
        let deck = map(r#"<img src="charts/q1.png" width="2" height="1.5">"#);
        match &deck.slides[0].shapes[0] {
            Shape::Image(image) => {
                assert_eq!(
                    image.source,
                    ImageSource::Path {
                        path: "charts/q1.png".to_string()
                    }
                );
                assert_eq!(image.frame.width, Emu::from_inches(2.0));
                assert_eq!(image.frame.height, Emu::from_inches(1.5));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_table_header_and_padding() {
        let deck = map("<table><tr><th>Name</th><th>Qty</th></tr><tr><td>apple</td></tr></table>");
        match &deck.slides[0].shapes[0] {
            Shape::Table(table) => {
                assert_eq!((table.rows, table.cols), (2, 2));
                assert_eq!(table.cells[0][0], GridCell::header("Name"));
                assert_eq!(table.cells[0][0].fill, Some(crate::model::Rgb::ACCENT));
                assert_eq!(table.cells[1][0].text, "apple");
                assert_eq!(table.cells[1][1], GridCell::default());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_skipped() {
        let deck = map("<table></table>");
        assert!(deck.slides[0].shapes.is_empty());
    }

    #[test]
    fn test_nested_title_removed_from_content() {
        let deck = map(r#"<div class="slide"><section><h3>Deep</h3><p>x</p></section></div>"#);
        let slide = &deck.slides[0];
        assert_eq!(slide.title.as_ref().unwrap().text, "Deep");
        assert_eq!(slide.shapes.len(), 1);
        assert_eq!(text_shape(&slide.shapes[0]).run.text, "x");
    }

    #[test]
    fn test_custom_marker_class() {
        let options = ParseOptions::default().with_slide_marker("page");
        let deck = map_slides(
            r#"<div class="page"><p>a</p></div><div class="page"><p>b</p></div><div class="slide"></div>"#,
            &options,
            &FakeFetcher::default(),
        );
        assert_eq!(deck.slide_count(), 2);
        assert!(deck.slides[0].title.is_none());
    }
}
