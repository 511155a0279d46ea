//! Text labels and text measurement.
//!
//! [`TextDefinition`] is a reusable text style; [`Text`] pairs one with
//! content and can be measured or drawn. Measurement shapes the text with
//! `cosmic-text` against the system font database and falls back to an
//! average glyph width when no font produces layout runs.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Numeric font weight (100-900).
///
/// Serialized as `"normal"` or `"bold"` when it matches those keywords,
/// otherwise as the number in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontWeight(u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);

    /// Creates a weight, clamped into `1..=1000`.
    pub fn new(weight: u16) -> Self {
        Self(weight.clamp(1, 1000))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NORMAL => f.write_str("normal"),
            Self::BOLD => f.write_str("bold"),
            Self(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(Self::NORMAL),
            "bold" => Ok(Self::BOLD),
            other => other
                .parse::<u16>()
                .map(Self::new)
                .map_err(|_| format!("invalid font weight `{other}`")),
        }
    }
}

impl Serialize for FontWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self::new(value)),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

/// Visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `14` |
/// | Font weight | normal |
/// | Text color | `None` (SVG default, black) |
/// | Background | `None` |
/// | Padding | zero |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    font_weight: FontWeight,
    color: Option<Color>,
    background_color: Option<Color>,
    border_color: Option<Color>,
    padding: Insets,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// When set, the text is drawn on a rounded badge of this color.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Outline color of the badge; ignored without a background.
    pub fn set_border_color(&mut self, color: Option<Color>) {
        self.border_color = color;
    }

    /// Space between the text and the badge edges.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn background_color(&self) -> Option<&Color> {
        self.background_color.as_ref()
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 14.0,
            font_weight: FontWeight::default(),
            color: None,
            background_color: None,
            border_color: None,
            padding: Insets::default(),
        }
    }
}

/// Text content paired with its style.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Size of the text including padding.
    pub fn calculate_size(&self) -> Size {
        self.calculate_size_without_padding()
            .add_padding(self.definition.padding())
    }

    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    /// Draws the text centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;

        let lines: Vec<&str> = self.content.lines().collect();
        let content_size = self.calculate_size_without_padding();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            content_size.height() / lines.len() as f32
        };
        let y_offset = -(content_size.height() + line_height) / 2.0;

        if let Some(background) = definition.background_color() {
            let bounds = position.to_bounds(self.calculate_size());
            let min = bounds.min_point();
            let mut badge = svg_element::Rectangle::new()
                .set("x", min.x())
                .set("y", min.y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", 4.0)
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            if let Some(border) = &definition.border_color {
                badge = badge.set("stroke", border.to_string()).set("stroke-width", 1.0);
            }
            // Same layer as the text, added first so it sits underneath
            output.add_to_layer(RenderLayer::Label, Box::new(badge));
        }

        let mut rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", definition.font_family())
            .set("font-size", definition.font_size())
            .set("font-weight", definition.font_weight().value());

        if let Some(color) = definition.color() {
            rendered = rendered
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        output.add_to_layer(RenderLayer::Label, Box::new(rendered));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Shapes text against a shared `FontSystem`, which is expensive to create.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Measures `text` in pixels, one line height per layout run.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size = text_def.font_size();
        let metrics = Metrics::new(font_size, font_size * 1.2);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(Weight(text_def.font_weight().value()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        // No usable font: estimate from the character count
        if max_width <= 0.0 {
            let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * font_size * 0.55;
            total_height = text.lines().count().max(1) as f32 * metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
