//! Chart rendering on top of `plotters`.
//!
//! Every adapter reads the registry, leaves it untouched and returns an SVG
//! document as a string.

mod bars;
mod cloud;
mod flow;


pub use bars::sentiment_bars;
pub use cloud::{layout_cloud, word_clouds, PlacedWord};
pub use flow::{flow_links, flow_rows, render_flow, wordcount_sankey, FlowLink, FlowRow};

use crate::error::{NlpError, Result};
use crate::registry::DocumentRegistry;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Font family used for all chart text
pub(crate) const FONT: &str = "sans-serif";

pub(crate) type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub(crate) fn render_error<E: std::fmt::Display>(err: E) -> NlpError {
    NlpError::Render(err.to_string())
}

pub(crate) fn ensure_documents(registry: &DocumentRegistry) -> Result<()> {
    if registry.is_empty() {
        return Err(NlpError::EmptyRegistry);
    }
    Ok(())
}

/// Draw onto a white canvas of `size` pixels and return the SVG text
pub(crate) fn render_svg<F>(size: (u32, u32), draw: F) -> Result<String>
where
    F: FnOnce(&SvgArea<'_>) -> Result<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        draw(&root)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}
