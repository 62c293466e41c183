use super::{ensure_documents, render_error, render_svg, FONT};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::registry::DocumentRegistry;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const BAR_WIDTH: f64 = 0.35;

/// Grouped bars of positive and negative score, one group per document
pub fn sentiment_bars(registry: &DocumentRegistry, config: &RenderConfig) -> Result<String> {
    ensure_documents(registry)?;

    let scores: Vec<(&str, f64, f64)> = registry
        .sentiments()
        .map(|(label, s)| (label, s.pos, s.neg))
        .collect();
    let n = scores.len() as f64;
    let peak = scores
        .iter()
        .map(|(_, pos, neg)| pos.max(*neg))
        .fold(0.0_f64, f64::max);
    let y_max = (peak * 1.15).max(0.1);
    tracing::debug!(documents = scores.len(), "rendering sentiment bars");

    render_svg((config.width, config.height), |root| {
        let mut chart = ChartBuilder::on(root)
            .caption("Sentiment scores for each document", (FONT, 24.0))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..n, 0.0..y_max)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(scores.len() + 1)
            .x_label_formatter(&|_| String::new())
            .x_desc("Document")
            .y_desc("Sentiment score")
            .axis_desc_style((FONT, 15.0))
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(scores.iter().enumerate().map(|(i, (_, pos, _))| {
                let x = i as f64 + 0.5;
                Rectangle::new([(x - BAR_WIDTH, 0.0), (x, *pos)], BLUE.filled())
            }))
            .map_err(render_error)?
            .label("positive")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled()));

        chart
            .draw_series(scores.iter().enumerate().map(|(i, (_, _, neg))| {
                let x = i as f64 + 0.5;
                Rectangle::new([(x, 0.0), (x + BAR_WIDTH, *neg)], RED.filled())
            }))
            .map_err(render_error)?
            .label("negative")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.filled()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;

        // Group labels under each pair of bars
        let label_style = TextStyle::from((FONT, 14.0).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        for (i, (label, _, _)) in scores.iter().enumerate() {
            let (px, py) = chart.backend_coord(&(i as f64 + 0.5, 0.0));
            root.draw(&Text::new(label.to_string(), (px, py + 6), label_style.clone()))
                .map_err(render_error)?;
        }

        Ok(())
    })
}
