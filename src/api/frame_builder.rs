use super::GraphEngine;
use crate::error::GraphResult;
use crate::render::{DrawContext, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

impl<R: Renderer> GraphEngine<R> {
    /// Materializes one frame: grid, axis chrome, tick labels and every
    /// series' visible slice.
    ///
    /// Horizontal label generation runs first because it may snap the
    /// viewport; everything afterwards sees the snapped window.
    pub fn build_render_frame(&mut self) -> GraphResult<RenderFrame> {
        let horizontal = self.ensure_horizontal_labels()?;
        let vertical = self.ensure_vertical_labels()?;

        let surface = self.config.surface;
        let border = self.border();
        let plot_width = self.plot_width();
        let plot_height = self.plot_height();
        let height = f64::from(surface.height);
        let palette = self.config.palette;
        let font = self.config.font_size_px;

        let mut frame = RenderFrame::new(surface);

        // One horizontal gridline per vertical tick.
        let vertical_intervals = vertical.len().saturating_sub(1).max(1);
        for i in 0..vertical.len() {
            let y = plot_height / vertical_intervals as f64 * i as f64 + border;
            frame.push_line(LinePrimitive::new(0.0, y, plot_width, y, 1.0, palette.grid));
        }

        // Axis chrome: value axis at the left edge, time axis along the bottom.
        frame.push_line(LinePrimitive::new(
            0.0,
            plot_height + border,
            0.0,
            0.0,
            1.0,
            palette.axis,
        ));
        frame.push_line(LinePrimitive::new(
            0.0,
            plot_height + border + 1.0,
            plot_width,
            plot_height + border + 1.0,
            1.0,
            palette.axis,
        ));

        // Time labels along the bottom edge; the outermost ticks align
        // inward so their text stays on the surface.
        let horizontal_intervals = horizontal.len().saturating_sub(1).max(1);
        for (i, text) in horizontal.labels.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let x = plot_width / horizontal_intervals as f64 * i as f64;
            let h_align = if i == 0 {
                TextHAlign::Left
            } else if i == horizontal.len() - 1 {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            };
            frame.push_text(TextPrimitive::new(
                text.clone(),
                x,
                height - 5.0,
                font,
                palette.horizontal_labels,
                h_align,
            ));
        }

        // Value labels in the left gutter, largest first.
        for (i, text) in vertical.labels.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let y = plot_height / vertical_intervals as f64 * i as f64 + border;
            frame.push_text(TextPrimitive::new(
                text.clone(),
                0.0,
                y,
                font,
                palette.vertical_labels,
                TextHAlign::Left,
            ));
        }

        // Series content over the snapped window.
        let slices = self.visible_slices();
        let extent = self.derive_extent(&slices);
        let (min_x, max_x) = self.effective_domain();
        // Degenerate domains render as a unit span instead of dividing by
        // zero.
        let span_x = if max_x == min_x { 1.0 } else { max_x - min_x };

        let ctx = DrawContext {
            plot_width,
            plot_height,
            border,
            min_x,
            min_y: extent.min,
            span_x,
            span_y: extent.span(),
            origin_x: 0.0,
        };

        for (id, slice) in &slices {
            let paint = self
                .store
                .get(*id)
                .map(|series| series.paint())
                .unwrap_or_default();
            self.chart_style
                .render_visible_slice(slice, &ctx, paint, &mut frame);
        }

        Ok(frame)
    }

    /// Builds and renders one frame.
    pub fn render(&mut self) -> GraphResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }
}
