//! Rich text segmentation for draw.io labels.
//!
//! draw.io stores formatted labels as a small subset of HTML. [`segment`]
//! turns such markup into a sequence of [`StyledRun`]s, each carrying a
//! snapshot of the formatting that was active when its text was read.
//!
//! # Formatting model
//!
//! The segmenter keeps a single current [`TextFormat`] rather than a tag
//! stack. Opening a tag changes the current format; closing an emphasis tag
//! (`</b>`, `</i>`, `</u>`) clears that flag. Closing `</font>` or `</span>`
//! changes nothing, so a color set by an inner tag stays active after the tag
//! closes:
//!
//! ```
//! # use drawdeck_core::text::{segment, TextFormat};
//! let runs = segment(
//!     r#"<font color="red">a<font color="blue">b</font>c</font>"#,
//!     TextFormat::default(),
//! );
//! let colors: Vec<_> = runs.iter().map(|r| r.format().color().to_hex()).collect();
//! assert_eq!(colors, vec!["#ff0000", "#0000ff", "#0000ff"]);
//! ```
//!
//! Labels rely on this flattening, so it is kept as is.

use log::trace;
use serde::Serialize;

use crate::{color::Color, style::Style};

/// Pixel sizes for the legacy `<font size="1..7">` attribute.
const LEGACY_FONT_SIZES: [f32; 7] = [10.0, 13.0, 16.0, 18.0, 24.0, 32.0, 48.0];

/// `fontStyle` bitmask values used by draw.io.
const FONT_STYLE_BOLD: u32 = 1;
const FONT_STYLE_ITALIC: u32 = 2;
const FONT_STYLE_UNDERLINE: u32 = 4;

/// Formatting snapshot attached to each run.
///
/// The default is plain black text with no explicit size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f32>,
}

impl TextFormat {
    /// Builds the base format for a label from its owner's style.
    ///
    /// Reads `fontColor`, `fontSize` and the `fontStyle` bitmask
    /// (1 bold, 2 italic, 4 underline). `default_size` applies when
    /// `fontSize` is absent or invalid, black when `fontColor` is.
    pub fn from_style(style: &Style, default_size: f32) -> Self {
        let font_style = style.number_or("fontStyle", 0.0).max(0.0) as u32;

        Self {
            bold: font_style & FONT_STYLE_BOLD != 0,
            italic: font_style & FONT_STYLE_ITALIC != 0,
            underline: font_style & FONT_STYLE_UNDERLINE != 0,
            color: style.color("fontColor").unwrap_or_default(),
            size: Some(style.number_or("fontSize", default_size)),
        }
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> Option<f32> {
        self.size
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: Option<f32>) -> Self {
        self.size = size;
        self
    }
}

/// A fragment of label text with its formatting.
///
/// Line breaks are runs whose text is exactly `"\n"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    text: String,
    #[serde(flatten)]
    format: TextFormat,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, format: TextFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    /// Whether this run is a line break.
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}

/// Splits label markup into styled runs.
///
/// Text between tags is entity-decoded and emitted as one run carrying a copy
/// of the current format. `<br>` emits a line break run; opening `<div>`,
/// `<p>` or `<li>` emits one unless the output already ends with a break.
/// Unknown tags are skipped. A `<` that does not start a tag is kept as text.
///
/// # Examples
///
/// ```
/// # use drawdeck_core::text::{segment, TextFormat};
/// let runs = segment("<b>Hi</b> there", TextFormat::default());
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[0].text(), "Hi");
/// assert!(runs[0].format().bold());
/// assert_eq!(runs[1].text(), " there");
/// assert!(!runs[1].format().bold());
/// ```
pub fn segment(markup: &str, base: TextFormat) -> Vec<StyledRun> {
    let mut segmenter = Segmenter::new(base);
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let starts_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');

        match after.find('>') {
            Some(close) if starts_tag => {
                segmenter.pending.push_str(&rest[..open]);
                segmenter.apply_tag(&after[..close]);
                rest = &after[close + 1..];
            }
            Some(_) => {
                // Not a tag; keep the `<` as text and continue after it.
                segmenter.pending.push_str(&rest[..=open]);
                rest = after;
            }
            None => break,
        }
    }
    segmenter.pending.push_str(rest);
    segmenter.flush();

    trace!(runs = segmenter.runs.len(); "Segmented label markup");
    segmenter.runs
}

/// One-shot segmentation state.
struct Segmenter {
    current: TextFormat,
    pending: String,
    runs: Vec<StyledRun>,
}

impl Segmenter {
    fn new(base: TextFormat) -> Self {
        Self {
            current: base,
            pending: String::new(),
            runs: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = htmlize::unescape(&self.pending).into_owned();
        self.pending.clear();
        if !text.is_empty() {
            self.runs.push(StyledRun::new(text, self.current.clone()));
        }
    }

    fn line_break(&mut self) {
        self.runs.push(StyledRun::new("\n", self.current.clone()));
    }

    fn ends_with_break(&self) -> bool {
        self.runs.last().is_none_or(|run| run.text.ends_with('\n'))
    }

    fn apply_tag(&mut self, body: &str) {
        self.flush();

        let body = body.trim().trim_end_matches('/').trim_end();
        let (closing, body) = match body.strip_prefix('/') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, body),
        };
        let name_end = body
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(body.len());
        let name = body[..name_end].to_ascii_lowercase();
        let attributes = &body[name_end..];

        match (name.as_str(), closing) {
            ("b" | "strong", closing) => self.current.bold = !closing,
            ("i" | "em", closing) => self.current.italic = !closing,
            ("u", closing) => self.current.underline = !closing,
            ("br", _) => self.line_break(),
            ("div" | "p" | "li", false) => {
                if !self.ends_with_break() {
                    self.line_break();
                }
            }
            ("font" | "span", false) => self.apply_font_attributes(attributes),
            // Closing font/span keeps the current snapshot.
            _ => {}
        }
    }

    fn apply_font_attributes(&mut self, attributes: &str) {
        for (name, value) in parse_attributes(attributes) {
            match name.as_str() {
                "color" => self.set_color(&value),
                "size" => {
                    if let Some(size) = legacy_font_size(&value) {
                        self.current.size = Some(size);
                    }
                }
                "style" => self.apply_css(&value),
                _ => {}
            }
        }
    }

    fn apply_css(&mut self, css: &str) {
        for declaration in css.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match property.trim().to_ascii_lowercase().as_str() {
                "color" => self.set_color(value),
                "font-size" => {
                    if let Some(size) = css_font_size(value) {
                        self.current.size = Some(size);
                    }
                }
                "font-weight" => {
                    self.current.bold =
                        value == "bold" || value.parse::<u32>().is_ok_and(|w| w >= 600);
                }
                "font-style" => self.current.italic = value == "italic",
                "text-decoration" | "text-decoration-line" => {
                    self.current.underline = value.contains("underline");
                }
                _ => {}
            }
        }
    }

    fn set_color(&mut self, value: &str) {
        if let Ok(color) = Color::new(value) {
            self.current.color = color;
        }
    }
}

/// Parses a CSS length such as `14px`, `14pt` or `14`.
fn css_font_size(value: &str) -> Option<f32> {
    let number = value
        .trim()
        .trim_end_matches("px")
        .trim_end_matches("pt")
        .trim();
    number.parse::<f32>().ok().filter(|size| *size > 0.0)
}

/// Parses `<font size>`: `1` to `7` use the legacy table, anything else is a length.
fn legacy_font_size(value: &str) -> Option<f32> {
    match value.trim().parse::<usize>() {
        Ok(index @ 1..=7) => Some(LEGACY_FONT_SIZES[index - 1]),
        _ => css_font_size(value),
    }
}

/// Parses `name="value" name='value' name=value flag` attribute lists.
///
/// Attribute names are lowercased; values keep their case.
fn parse_attributes(input: &str) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let quote = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'');
            match quote {
                Some(quote) => {
                    let body = &after_eq[1..];
                    let end = body.find(quote).unwrap_or(body.len());
                    rest = body.get(end + 1..).unwrap_or("");
                    body[..end].to_string()
                }
                None => {
                    let end = after_eq
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    after_eq[..end].to_string()
                }
            }
        } else {
            String::new()
        };

        if !name.is_empty() {
            attributes.push((name, htmlize::unescape(&value).into_owned()));
        }
        rest = rest.trim_start();
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(runs: &[StyledRun]) -> Vec<&str> {
        runs.iter().map(StyledRun::text).collect()
    }

    #[test]
    fn test_plain_text_is_one_run() {
        let runs = segment("Hello world", TextFormat::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "Hello world");
        assert_eq!(runs[0].format(), &TextFormat::default());
    }

    #[test]
    fn test_empty_input_has_no_runs() {
        assert!(segment("", TextFormat::default()).is_empty());
        assert!(segment("<b></b>", TextFormat::default()).is_empty());
    }

    #[test]
    fn test_bold_then_plain() {
        let runs = segment("<b>Hi</b> there", TextFormat::default());
        assert_eq!(texts(&runs), vec!["Hi", " there"]);
        assert!(runs[0].format().bold());
        assert!(!runs[1].format().bold());
    }

    #[test]
    fn test_emphasis_aliases() {
        let runs = segment(
            "<strong>a</strong><em>b</em><i>c</i><u>d</u>",
            TextFormat::default(),
        );
        assert_eq!(texts(&runs), vec!["a", "b", "c", "d"]);
        assert!(runs[0].format().bold());
        assert!(runs[1].format().italic() && !runs[1].format().bold());
        assert!(runs[2].format().italic());
        assert!(runs[3].format().underline() && !runs[3].format().italic());
    }

    #[test]
    fn test_tags_are_case_insensitive() {
        let runs = segment("<B>x</B>y", TextFormat::default());
        assert!(runs[0].format().bold());
        assert!(!runs[1].format().bold());
    }

    #[test]
    fn test_font_color_and_size() {
        let runs = segment(
            r##"<font color="#ff0000" size="5">big</font>"##,
            TextFormat::default(),
        );
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].format().color().to_hex(), "#ff0000");
        assert_eq!(runs[0].format().size(), Some(24.0));
    }

    #[test]
    fn test_span_style() {
        let runs = segment(
            r#"<span style="color: rgb(0, 0, 255); font-size: 18px; font-weight: bold">x</span>"#,
            TextFormat::default(),
        );
        let format = runs[0].format();
        assert_eq!(format.color().to_hex(), "#0000ff");
        assert_eq!(format.size(), Some(18.0));
        assert!(format.bold());
    }

    #[test]
    fn test_closing_font_keeps_color() {
        let runs = segment(
            r#"<font color="red">a</font>b<font color="blue">c</font>d"#,
            TextFormat::default(),
        );
        assert_eq!(texts(&runs), vec!["a", "b", "c", "d"]);
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        assert_eq!(runs[1].format().color(), red);
        assert_eq!(runs[3].format().color(), blue);
    }

    #[test]
    fn test_line_breaks() {
        let runs = segment("one<br>two<br/>three", TextFormat::default());
        assert_eq!(texts(&runs), vec!["one", "\n", "two", "\n", "three"]);
        assert!(runs[1].is_line_break());
    }

    #[test]
    fn test_block_tags_break_only_between_content() {
        let runs = segment("<div>a</div><div>b</div><div><br></div>", TextFormat::default());
        assert_eq!(texts(&runs), vec!["a", "\n", "b", "\n", "\n"]);

        let runs = segment("<p>only</p>", TextFormat::default());
        assert_eq!(texts(&runs), vec!["only"]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let runs = segment("a &amp; b&nbsp;&lt;c&gt;", TextFormat::default());
        assert_eq!(texts(&runs), vec!["a & b\u{a0}<c>"]);
    }

    #[test]
    fn test_stray_angle_brackets_are_text() {
        let runs = segment("a < b", TextFormat::default());
        assert_eq!(texts(&runs), vec!["a < b"]);

        let runs = segment("x <3 y > z", TextFormat::default());
        assert_eq!(texts(&runs), vec!["x <3 y > z"]);

        let runs = segment("<b>bold <unterminated", TextFormat::default());
        assert_eq!(texts(&runs), vec!["bold <unterminated"]);
        assert!(runs[0].format().bold());
    }

    #[test]
    fn test_unknown_tags_are_skipped() {
        let runs = segment("<table><tr><td>cell</td></tr></table>", TextFormat::default());
        assert_eq!(texts(&runs), vec!["cell"]);
    }

    #[test]
    fn test_base_format_is_inherited() {
        let base = TextFormat::default().with_italic(true).with_size(Some(20.0));
        let runs = segment("<b>x</b>y", base);
        assert!(runs[0].format().italic() && runs[0].format().bold());
        assert!(runs[1].format().italic() && !runs[1].format().bold());
        assert_eq!(runs[1].format().size(), Some(20.0));
    }

    #[test]
    fn test_format_from_style() {
        let style = Style::parse("fontStyle=5;fontSize=16;fontColor=#00ff00");
        let format = TextFormat::from_style(&style, 12.0);
        assert!(format.bold());
        assert!(!format.italic());
        assert!(format.underline());
        assert_eq!(format.size(), Some(16.0));
        assert_eq!(format.color().to_hex(), "#00ff00");

        let fallback = TextFormat::from_style(&Style::parse("fontSize=huge"), 12.0);
        assert_eq!(fallback.size(), Some(12.0));
        assert_eq!(fallback.color(), Color::default());
    }

    #[test]
    fn test_default_text_is_black() {
        assert_eq!(TextFormat::default().color().to_hex(), "#000000");

        let unset = TextFormat::from_style(&Style::parse("fontColor=none;fontSize=10"), 12.0);
        assert_eq!(unset.color().to_hex(), "#000000");

        let runs = segment("<b>plain</b> text", TextFormat::default());
        assert!(runs.iter().all(|run| run.format().color().to_hex() == "#000000"));
    }

    #[test]
    fn test_parse_attributes() {
        let attributes = parse_attributes(r##"color="#FF0000" face='Arial' size=3 disabled"##);
        assert_eq!(
            attributes,
            vec![
                ("color".to_string(), "#FF0000".to_string()),
                ("face".to_string(), "Arial".to_string()),
                ("size".to_string(), "3".to_string()),
                ("disabled".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_font_sizes() {
        assert_eq!(css_font_size("14px"), Some(14.0));
        assert_eq!(css_font_size("11pt"), Some(11.0));
        assert_eq!(css_font_size("9"), Some(9.0));
        assert_eq!(css_font_size("1.2em"), None);
        assert_eq!(legacy_font_size("1"), Some(10.0));
        assert_eq!(legacy_font_size("7"), Some(48.0));
        assert_eq!(legacy_font_size("20"), Some(20.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Text without markup characters comes back as a single identical run.
    fn check_plain_text_single_run(text: &str) -> Result<(), TestCaseError> {
        let runs = segment(text, TextFormat::default());

        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(runs[0].text(), text);
        Ok(())
    }

    /// Tags never leak into run text.
    fn check_no_tag_leaks(words: &[String]) -> Result<(), TestCaseError> {
        let markup: String = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i % 2 == 0 {
                    format!("<b>{word}</b>")
                } else {
                    format!("<i>{word}</i>")
                }
            })
            .collect();
        let runs = segment(&markup, TextFormat::default());

        prop_assert_eq!(runs.len(), words.len());
        for (run, word) in runs.iter().zip(words) {
            prop_assert_eq!(run.text(), word.as_str());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn plain_text_single_run(text in "[a-zA-Z0-9 ,.!?]{1,40}") {
            check_plain_text_single_run(&text)?;
        }

        #[test]
        fn no_tag_leaks(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            check_no_tag_leaks(&words)?;
        }
    }
}
