//! Glucose Chart Component
//!
//! Time-series line chart using HTML5 Canvas, with the display target
//! range shaded behind the line.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::stats::{ChartPoint, DISPLAY_RANGE};

const LINE_COLOR: &str = "#3b82f6"; // blue-500
const BAND_FILL: &str = "rgba(220, 252, 231, 0.4)"; // green-100
const BAND_EDGE: &str = "#22c55e"; // green-500
const GRID_COLOR: &str = "#f0f0f0";
const LABEL_COLOR: &str = "#6b7280"; // gray-500

/// Glucose trend chart
#[component]
pub fn GlucoseChart(
    /// Chart-ready points, ascending by timestamp
    #[prop(into)]
    series: Signal<Vec<ChartPoint>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the series changes
    create_effect(move |_| {
        let points = series.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="400"
            class="w-full h-64 md:h-96 rounded-lg"
        />
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, points: &[ChartPoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 50.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for selected range", width / 2.0 - 90.0, height / 2.0);
        return;
    }

    // Y domain: 0 to the highest level plus headroom, but never below the
    // top of the target band so the band stays visible
    let data_max = points.iter().map(|p| p.level).fold(f64::NEG_INFINITY, f64::max);
    let y_max = (data_max + 50.0).max(*DISPLAY_RANGE.end() + 50.0);
    let y_min = 0.0;

    let x_at = |i: usize| {
        if points.len() == 1 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (points.len() - 1) as f64) * chart_width
        }
    };
    let y_at = |level: f64| margin_top + ((y_max - level) / (y_max - y_min)) * chart_height;

    // Horizontal grid lines and y-axis labels
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{value:.0}"), 8.0, y + 4.0);
    }

    // Target range band with dashed boundary lines
    let band_top = y_at(*DISPLAY_RANGE.end());
    let band_bottom = y_at(*DISPLAY_RANGE.start());
    ctx.set_fill_style(&BAND_FILL.into());
    ctx.fill_rect(margin_left, band_top, chart_width, band_bottom - band_top);

    let dash = js_sys::Array::of2(&3.0.into(), &3.0.into());
    let _ = ctx.set_line_dash(&dash);
    ctx.set_stroke_style(&BAND_EDGE.into());
    for boundary in [*DISPLAY_RANGE.start(), *DISPLAY_RANGE.end()] {
        let y = y_at(boundary);
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    // Data line
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(3.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let x = x_at(i);
        let y = y_at(point.level);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Data points
    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, point) in points.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(x_at(i), y_at(point.level), 4.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X-axis labels: first, last, and a handful in between
    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("12px sans-serif");
    let step = (points.len() / 6).max(1);
    for (i, point) in points.iter().enumerate() {
        if i % step == 0 || i == points.len() - 1 {
            let _ = ctx.fill_text(&point.label, x_at(i) - 18.0, height - 12.0);
        }
    }
}
