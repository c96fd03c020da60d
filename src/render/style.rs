use crate::core::{DataPoint, SeriesPaint};
use crate::render::{CirclePrimitive, LinePrimitive, RenderFrame};

/// Geometry handed to a chart style for one series draw pass.
///
/// `min_x/min_y/span_x/span_y` are the exact values used for tick
/// placement, so the style's coordinate mapping stays aligned with the
/// axis gridlines: `pixel_x = origin_x + (x - min_x) / span_x * plot_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    pub plot_width: f64,
    pub plot_height: f64,
    pub border: f64,
    pub min_x: f64,
    pub min_y: f64,
    pub span_x: f64,
    pub span_y: f64,
    pub origin_x: f64,
}

impl DrawContext {
    #[must_use]
    pub fn map_x(&self, x: f64) -> f64 {
        self.origin_x + (x - self.min_x) / self.span_x * self.plot_width
    }

    #[must_use]
    pub fn map_y(&self, y: f64) -> f64 {
        self.border + self.plot_height - (y - self.min_y) / self.span_y * self.plot_height
    }
}

/// Per-style drawing strategy.
///
/// Implementations receive the windowed slice (X-ascending, one overscan
/// sentinel on each side) and emit primitives into the frame.
/// One type per chart style keeps the styles decoupled from the windowing
/// and label machinery.
pub trait ChartStyle {
    fn render_visible_slice(
        &self,
        slice: &[DataPoint],
        ctx: &DrawContext,
        paint: SeriesPaint,
        frame: &mut RenderFrame,
    );
}

/// Line chart: one segment between each pair of consecutive samples, with
/// optional markers at the sample positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub draw_markers: bool,
    pub marker_radius: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            draw_markers: false,
            marker_radius: 3.0,
        }
    }
}

impl ChartStyle for LineStyle {
    fn render_visible_slice(
        &self,
        slice: &[DataPoint],
        ctx: &DrawContext,
        paint: SeriesPaint,
        frame: &mut RenderFrame,
    ) {
        let mut previous: Option<(f64, f64)> = None;
        for point in slice {
            let mapped = (ctx.map_x(point.x), ctx.map_y(point.y));
            if let Some((px, py)) = previous {
                frame.push_line(LinePrimitive::new(
                    px,
                    py,
                    mapped.0,
                    mapped.1,
                    paint.stroke_width,
                    paint.color,
                ));
                if self.draw_markers {
                    frame.push_circle(CirclePrimitive::new(
                        px,
                        py,
                        self.marker_radius,
                        paint.color,
                    ));
                }
            }
            previous = Some(mapped);
        }

        if self.draw_markers {
            if let Some((px, py)) = previous {
                frame.push_circle(CirclePrimitive::new(
                    px,
                    py,
                    self.marker_radius,
                    paint.color,
                ));
            }
        }
    }
}
