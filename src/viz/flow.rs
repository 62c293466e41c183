use super::{ensure_documents, render_error, render_svg, SvgArea, FONT};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::registry::{DocumentRegistry, WordcountFilter};
use plotters::prelude::*;
use std::collections::HashMap;

/// One occurrence of `word` in the document labelled `label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRow {
    pub label: String,
    pub word: String,
}

/// Aggregated flow from a document to a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: usize,
}

/// Expand the current word counts into one row per occurrence
pub fn flow_rows(registry: &DocumentRegistry) -> Vec<FlowRow> {
    let mut rows = Vec::new();
    for (label, counts) in registry.wordcounts() {
        for (word, n) in counts.iter() {
            for _ in 0..n {
                rows.push(FlowRow {
                    label: label.to_string(),
                    word: word.to_string(),
                });
            }
        }
    }
    rows
}

/// Group rows into weighted links, in first-seen order.
///
/// Links with a value below `min_flow` are dropped.
pub fn flow_links(rows: &[FlowRow], min_flow: usize) -> Vec<FlowLink> {
    let mut links: Vec<FlowLink> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for row in rows {
        let key = (row.label.as_str(), row.word.as_str());
        match index.get(&key) {
            Some(&pos) => links[pos].value += 1,
            None => {
                index.insert(key, links.len());
                links.push(FlowLink {
                    source: row.label.clone(),
                    target: row.word.clone(),
                    value: 1,
                });
            }
        }
    }

    links.retain(|link| link.value >= min_flow);
    links
}

/// Filter the registry's word counts, then draw the flow diagram
pub fn wordcount_sankey(
    registry: &mut DocumentRegistry,
    filter: &WordcountFilter,
    config: &RenderConfig,
) -> Result<String> {
    ensure_documents(registry)?;
    registry.filter_wordcount(filter)?;
    render_flow(registry, config)
}

/// Draw documents on the left, words on the right, bands sized by count
pub fn render_flow(registry: &DocumentRegistry, config: &RenderConfig) -> Result<String> {
    ensure_documents(registry)?;
    let links = flow_links(&flow_rows(registry), config.min_flow);
    tracing::debug!(links = links.len(), "rendering flow diagram");

    render_svg((config.width, config.height), |root| {
        let area = root
            .titled("Word usage by document", (FONT, 24.0))
            .map_err(render_error)?;
        if links.is_empty() {
            return area
                .draw(&Text::new(
                    "No word counts to display",
                    (20, 20),
                    (FONT, 16.0),
                ))
                .map_err(render_error);
        }
        draw_flows(&area, &links)
    })
}

struct Node {
    name: String,
    value: usize,
    top: f64,
    /// Offset of the next band attached to this node
    cursor: f64,
}

const MARGIN: f64 = 20.0;
const NODE_GAP: f64 = 12.0;
const NODE_WIDTH: i32 = 14;

/// Stack nodes vertically, heights proportional to value
fn stack_nodes(names: Vec<(String, usize)>, height: f64, scale: f64) -> Vec<Node> {
    let used: f64 = names.iter().map(|(_, v)| *v as f64 * scale).sum::<f64>()
        + NODE_GAP * names.len().saturating_sub(1) as f64;
    let mut y = MARGIN + ((height - 2.0 * MARGIN - used) / 2.0).max(0.0);

    names
        .into_iter()
        .map(|(name, value)| {
            let node = Node {
                name,
                value,
                top: y,
                cursor: 0.0,
            };
            y += value as f64 * scale + NODE_GAP;
            node
        })
        .collect()
}

fn totals<'a>(links: &'a [FlowLink], key: impl Fn(&'a FlowLink) -> &'a str) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = Vec::new();
    for link in links {
        let name = key(link);
        match out.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v += link.value,
            None => out.push((name.to_string(), link.value)),
        }
    }
    out
}

fn draw_flows(area: &SvgArea<'_>, links: &[FlowLink]) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as f64, height as f64);

    let sources = totals(links, |l| l.source.as_str());
    let targets = totals(links, |l| l.target.as_str());
    let total: usize = links.iter().map(|l| l.value).sum();

    let max_nodes = sources.len().max(targets.len());
    let gaps = NODE_GAP * max_nodes.saturating_sub(1) as f64;
    let scale = ((height - 2.0 * MARGIN - gaps).max(1.0)) / total as f64;

    let left_x = (width * 0.25) as i32;
    let right_x = (width * 0.75) as i32 - NODE_WIDTH;

    let mut left = stack_nodes(sources, height, scale);
    let mut right = stack_nodes(targets, height, scale);

    let source_colors: HashMap<String, usize> = left
        .iter()
        .enumerate()
        .map(|(i, n)| (n.name.clone(), i))
        .collect();

    for link in links {
        let band = link.value as f64 * scale;
        let color = source_colors.get(&link.source).copied().unwrap_or(0);

        let (Some(src), Some(dst)) = (
            left.iter_mut().find(|n| n.name == link.source),
            right.iter_mut().find(|n| n.name == link.target),
        ) else {
            continue;
        };

        let sy = src.top + src.cursor;
        let ty = dst.top + dst.cursor;
        src.cursor += band;
        dst.cursor += band;

        let x0 = left_x + NODE_WIDTH;
        let x1 = right_x;
        let points = vec![
            (x0, sy as i32),
            (x1, ty as i32),
            (x1, (ty + band) as i32),
            (x0, (sy + band) as i32),
        ];
        area.draw(&Polygon::new(points, Palette99::pick(color).mix(0.45).filled()))
            .map_err(render_error)?;
    }

    for (i, node) in left.iter().enumerate() {
        draw_node(area, node, left_x, scale, Palette99::pick(i).filled())?;
        let label = format!("{} ({})", node.name, node.value);
        let x = (left_x - 10 - label.len() as i32 * 7).max(2);
        area.draw(&Text::new(label, (x, node.top as i32), (FONT, 13.0)))
            .map_err(render_error)?;
    }

    for node in &right {
        draw_node(area, node, right_x, scale, BLACK.mix(0.6).filled())?;
        let label = format!("{} ({})", node.name, node.value);
        area.draw(&Text::new(
            label,
            (right_x + NODE_WIDTH + 6, node.top as i32),
            (FONT, 13.0),
        ))
        .map_err(render_error)?;
    }

    Ok(())
}

fn draw_node(area: &SvgArea<'_>, node: &Node, x: i32, scale: f64, style: ShapeStyle) -> Result<()> {
    let bottom = node.top + (node.value as f64 * scale).max(1.0);
    area.draw(&Rectangle::new(
        [(x, node.top as i32), (x + NODE_WIDTH, bottom as i32)],
        style,
    ))
    .map_err(render_error)
}
