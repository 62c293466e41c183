use super::{ensure_documents, render_error, render_svg, SvgArea, FONT};
use crate::config::RenderConfig;
use crate::counter::{count, WordCount};
use crate::error::{NlpError, Result};
use crate::registry::DocumentRegistry;
use plotters::prelude::*;

/// Average glyph width relative to font size
const GLYPH_RATIO: f64 = 0.6;
const LINE_SPACING: f64 = 1.2;
const WORD_SPACING: f64 = 8.0;
const PADDING: f64 = 10.0;

/// A word positioned inside a word-cloud panel
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    /// Font size in pixels
    pub size: f64,
    /// Top-left corner inside the panel
    pub x: i32,
    pub y: i32,
}

fn text_width(word: &str, size: f64) -> f64 {
    word.chars().count() as f64 * size * GLYPH_RATIO
}

/// Place the most frequent words of `counts` row by row.
///
/// Font size scales linearly with frequency between `min_font` and
/// `max_font`. Words are placed in descending frequency; placement stops at
/// the first word that no longer fits vertically.
pub fn layout_cloud(
    counts: &WordCount,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Vec<PlacedWord> {
    let words = counts.top_k(config.max_words);
    let Some(max_count) = words.iter().map(|(_, n)| n).max() else {
        return Vec::new();
    };

    let usable_width = width as f64 - 2.0 * PADDING;
    let bottom = height as f64 - PADDING;
    let span = config.max_font - config.min_font;

    let mut placed = Vec::with_capacity(words.len());
    let mut x = PADDING;
    let mut y = PADDING;
    let mut row_height: f64 = 0.0;

    for (word, n) in words.iter() {
        let mut size = config.min_font + span * n as f64 / max_count as f64;
        let full = text_width(word, size);
        if full > usable_width {
            size *= usable_width / full;
        }
        let w = text_width(word, size);

        if x + w > PADDING + usable_width && x > PADDING {
            x = PADDING;
            y += row_height;
            row_height = 0.0;
        }
        if y + size > bottom {
            break;
        }

        placed.push(PlacedWord {
            word: word.to_string(),
            count: n,
            size,
            x: x as i32,
            y: y as i32,
        });

        x += w + WORD_SPACING;
        row_height = row_height.max(size * LINE_SPACING);
    }

    placed
}

/// One word-cloud panel per document side by side, titled by label
pub fn word_clouds(registry: &DocumentRegistry, config: &RenderConfig) -> Result<String> {
    ensure_documents(registry)?;

    let texts: Vec<(&str, &str)> = registry.raw_texts().collect();
    let width = u32::try_from(texts.len())
        .ok()
        .and_then(|n| config.cloud_panel_width.checked_mul(n))
        .ok_or_else(|| {
            NlpError::Render(format!(
                "{} panels of width {} exceed the largest image size",
                texts.len(),
                config.cloud_panel_width
            ))
        })?;
    tracing::debug!(panels = texts.len(), "rendering word clouds");

    render_svg((width, config.cloud_height), |root| {
        let panels = root.split_evenly((1, texts.len()));
        for ((label, text), panel) in texts.iter().zip(panels.iter()) {
            draw_panel(panel, label, text, config)?;
        }
        Ok(())
    })
}

fn draw_panel(panel: &SvgArea<'_>, label: &str, text: &str, config: &RenderConfig) -> Result<()> {
    let area = panel.titled(label, (FONT, 20.0)).map_err(render_error)?;
    let (width, height) = area.dim_in_pixel();

    for (i, placed) in layout_cloud(&count(text), width, height, config)
        .into_iter()
        .enumerate()
    {
        let style = (FONT, placed.size).into_font().color(&Palette99::pick(i));
        area.draw(&Text::new(placed.word, (placed.x, placed.y), style))
            .map_err(render_error)?;
    }
    Ok(())
}
