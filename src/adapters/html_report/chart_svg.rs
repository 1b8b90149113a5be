//! SVG rendering of the expected value map.
//!
//! One standalone SVG: the expectancy surface as a colored cell grid, the
//! breakeven curve as a dashed black line, and one marker per evaluated
//! order at (win rate %, P/L ratio). Markers carry `<title>` hover text.

use super::tables;
use crate::domain::analysis::Analysis;
use crate::domain::expectancy::{ExpectancySurface, RATIO_MAX, breakeven_curve};

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 700.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const X_MAX: f64 = 100.0;

fn plot_right() -> f64 {
    WIDTH - MARGIN_RIGHT
}

fn plot_bottom() -> f64 {
    HEIGHT - MARGIN_BOTTOM
}

fn plot_width() -> f64 {
    plot_right() - MARGIN_LEFT
}

fn plot_height() -> f64 {
    plot_bottom() - MARGIN_TOP
}

fn scale_x(value: f64) -> f64 {
    MARGIN_LEFT + value / X_MAX * plot_width()
}

fn scale_y(value: f64) -> f64 {
    plot_bottom() - value / RATIO_MAX * plot_height()
}

/// The RdYlGn diverging scale, red for losing expectancy through green for
/// winning, sampled at eleven anchor colors.
const RDYLGN: [(f64, (u8, u8, u8)); 11] = [
    (0.0, (165, 0, 38)),
    (0.1, (215, 48, 39)),
    (0.2, (244, 109, 67)),
    (0.3, (253, 174, 97)),
    (0.4, (254, 224, 139)),
    (0.5, (255, 255, 191)),
    (0.6, (217, 239, 139)),
    (0.7, (166, 217, 106)),
    (0.8, (102, 189, 99)),
    (0.9, (26, 152, 80)),
    (1.0, (0, 104, 55)),
];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

fn colorscale(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    for window in RDYLGN.windows(2) {
        let (t0, c0) = window[0];
        let (t1, c1) = window[1];
        if t <= t1 {
            let frac = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return (
                lerp(c0.0, c1.0, frac),
                lerp(c0.1, c1.1, frac),
                lerp(c0.2, c1.2, frac),
            );
        }
    }
    RDYLGN[RDYLGN.len() - 1].1
}

pub fn render_expectancy_map(analysis: &Analysis, decimals: usize) -> String {
    if analysis.is_empty() {
        return "No orders to chart.".to_string();
    }

    let surface = ExpectancySurface::sample();
    let z_span = surface.z_max - surface.z_min;
    let cell_w = scale_x(surface.win_rates[1] * 100.0) - scale_x(surface.win_rates[0] * 100.0);
    let cell_h = scale_y(surface.ratios[0]) - scale_y(surface.ratios[1]);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         xmlns=\"http://www.w3.org/2000/svg\" font-family=\"sans-serif\">\n"
    ));

    svg.push_str("<defs>\n");
    svg.push_str(&format!(
        "  <clipPath id=\"plot-area\"><rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\"/></clipPath>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        plot_width(),
        plot_height()
    ));
    svg.push_str("  <linearGradient id=\"ev-scale\" x1=\"0\" y1=\"1\" x2=\"0\" y2=\"0\">\n");
    for (stop, (r, g, b)) in RDYLGN {
        svg.push_str(&format!(
            "    <stop offset=\"{}%\" stop-color=\"rgb({},{},{})\"/>\n",
            stop * 100.0,
            r,
            g,
            b
        ));
    }
    svg.push_str("  </linearGradient>\n");
    svg.push_str("</defs>\n");

    svg.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"white\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"{:.0}\" y=\"28\" text-anchor=\"middle\" font-size=\"18\">Expected Value Heatmap</text>\n",
        WIDTH / 2.0
    ));

    // Surface cells, one rect per grid sample.
    svg.push_str("<g opacity=\"0.7\" clip-path=\"url(#plot-area)\">\n");
    for (i, row) in surface.z.iter().enumerate() {
        let ratio = surface.ratios[i];
        for (j, &value) in row.iter().enumerate() {
            let win_rate = surface.win_rates[j];
            let (r, g, b) = colorscale((value - surface.z_min) / z_span);
            svg.push_str(&format!(
                "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{w:.1}\" height=\"{h:.1}\" fill=\"rgb({r},{g},{b})\"/>\n",
                x = scale_x(win_rate * 100.0) - cell_w / 2.0,
                y = scale_y(ratio) - cell_h / 2.0,
                w = cell_w,
                h = cell_h,
            ));
        }
    }
    svg.push_str("</g>\n");

    // Breakeven curve.
    let points: Vec<String> = breakeven_curve()
        .iter()
        .map(|&(pct, ratio)| format!("{:.1},{:.1}", scale_x(pct), scale_y(ratio)))
        .collect();
    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"3\" \
         stroke-dasharray=\"9,6\" clip-path=\"url(#plot-area)\"/>\n",
        points.join(" ")
    ));

    // Order markers.
    for (i, eval) in analysis.evaluations.iter().enumerate() {
        let cx = scale_x(eval.win_rate * 100.0);
        let cy = scale_y(eval.profit_loss_ratio);
        let fill = if eval.direction.is_long() {
            "green"
        } else {
            "red"
        };
        svg.push_str("<g clip-path=\"url(#plot-area)\">\n");
        svg.push_str(&format!(
            "  <title>{}</title>\n",
            tables::hover_text(eval, i + 1, decimals)
        ));
        svg.push_str(&format!(
            "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"7.5\" fill=\"{fill}\" stroke=\"black\" stroke-width=\"2\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{cx:.1}\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"12\">{n}</text>\n",
            y = cy - 12.0,
            n = i + 1,
        ));
        svg.push_str("</g>\n");
    }

    // Axes and ticks.
    svg.push_str(&format!(
        "<line x1=\"{l:.1}\" y1=\"{b:.1}\" x2=\"{r:.1}\" y2=\"{b:.1}\" stroke=\"black\"/>\n",
        l = MARGIN_LEFT,
        b = plot_bottom(),
        r = plot_right(),
    ));
    svg.push_str(&format!(
        "<line x1=\"{l:.1}\" y1=\"{t:.1}\" x2=\"{l:.1}\" y2=\"{b:.1}\" stroke=\"black\"/>\n",
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = plot_bottom(),
    ));
    for step in 0..=5 {
        let value = step as f64 * 20.0;
        let x = scale_x(value);
        svg.push_str(&format!(
            "<line x1=\"{x:.1}\" y1=\"{b:.1}\" x2=\"{x:.1}\" y2=\"{t:.1}\" stroke=\"black\"/>\n",
            b = plot_bottom(),
            t = plot_bottom() + 5.0,
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"12\">{value:.0}</text>\n",
            y = plot_bottom() + 18.0,
        ));
    }
    for step in 0..=5 {
        let value = step as f64;
        let y = scale_y(value);
        svg.push_str(&format!(
            "<line x1=\"{l:.1}\" y1=\"{y:.1}\" x2=\"{l2:.1}\" y2=\"{y:.1}\" stroke=\"black\"/>\n",
            l = MARGIN_LEFT - 5.0,
            l2 = MARGIN_LEFT,
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"end\" font-size=\"12\">{value:.0}</text>\n",
            x = MARGIN_LEFT - 9.0,
            y = y + 4.0,
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{x:.0}\" y=\"{y:.0}\" text-anchor=\"middle\" font-size=\"13\">Win Rate (%)</text>\n",
        x = (MARGIN_LEFT + plot_right()) / 2.0,
        y = HEIGHT - 15.0,
    ));
    svg.push_str(&format!(
        "<text x=\"18\" y=\"{y:.0}\" text-anchor=\"middle\" font-size=\"13\" \
         transform=\"rotate(-90 18 {y:.0})\">Profit/Loss Ratio</text>\n",
        y = (MARGIN_TOP + plot_bottom()) / 2.0,
    ));

    // Colorbar legend.
    let bar_x = plot_right() + 30.0;
    svg.push_str(&format!(
        "<rect x=\"{bar_x:.1}\" y=\"{t:.1}\" width=\"18\" height=\"{h:.1}\" \
         fill=\"url(#ev-scale)\" stroke=\"black\" stroke-width=\"0.5\"/>\n",
        t = MARGIN_TOP,
        h = plot_height(),
    ));
    svg.push_str(&format!(
        "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"12\">Expected Value</text>\n",
        x = bar_x + 9.0,
        y = MARGIN_TOP - 12.0,
    ));
    let label_x = bar_x + 24.0;
    svg.push_str(&format!(
        "<text x=\"{label_x:.1}\" y=\"{y:.1}\" font-size=\"11\">{v:.1}</text>\n",
        y = MARGIN_TOP + 10.0,
        v = surface.z_max,
    ));
    let zero_y = plot_bottom() - (0.0 - surface.z_min) / z_span * plot_height();
    svg.push_str(&format!(
        "<text x=\"{label_x:.1}\" y=\"{y:.1}\" font-size=\"11\">0.0</text>\n",
        y = zero_y + 4.0,
    ));
    svg.push_str(&format!(
        "<text x=\"{label_x:.1}\" y=\"{y:.1}\" font-size=\"11\">{v:.1}</text>\n",
        y = plot_bottom(),
        v = surface.z_min,
    ));

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::analyze_orders;
    use crate::domain::direction::Direction;
    use crate::domain::order::OrderSpec;
    use crate::domain::price_spec::PriceSpec;

    fn sample_analysis() -> Analysis {
        let orders = vec![
            OrderSpec {
                direction: Direction::Long,
                win_rate: 0.5,
                entry_price: 100.0,
                take_profit: PriceSpec::Absolute(110.0),
                stop_loss: PriceSpec::Absolute(95.0),
            },
            OrderSpec {
                direction: Direction::Short,
                win_rate: 0.4,
                entry_price: 100.0,
                take_profit: PriceSpec::Absolute(90.0),
                stop_loss: PriceSpec::Absolute(105.0),
            },
        ];
        analyze_orders(&orders, 1000.0, 1.0)
    }

    #[test]
    fn empty_analysis_renders_sentinel() {
        let analysis = analyze_orders(&[], 1000.0, 1.0);
        assert_eq!(render_expectancy_map(&analysis, 2), "No orders to chart.");
    }

    #[test]
    fn svg_has_fixed_dimensions() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.starts_with("<svg width=\"900\" height=\"700\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn surface_cells_are_translucent() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("<g opacity=\"0.7\""));
        assert!(svg.contains("fill=\"rgb("));
    }

    #[test]
    fn breakeven_curve_is_dashed_black() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("stroke-dasharray=\"9,6\""));
        assert!(svg.contains("stroke-width=\"3\""));
    }

    #[test]
    fn markers_are_colored_by_direction() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("fill=\"green\""));
        assert!(svg.contains("fill=\"red\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn marker_lands_at_win_rate_and_ratio() {
        // First order: win rate 50%, ratio 2. The plot area maps
        // [0,100]x[0,5] onto [60,780]x[640,50].
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("cx=\"420.0\""));
        assert!(svg.contains("cy=\"404.0\""));
    }

    #[test]
    fn markers_carry_hover_text() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("<title>Order 1 (long)"));
        assert!(svg.contains("<title>Order 2 (short)"));
        assert!(svg.contains("expected value:"));
    }

    #[test]
    fn markers_are_clipped_to_plot_area() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("<clipPath id=\"plot-area\">"));
        assert!(svg.contains("<g clip-path=\"url(#plot-area)\">"));
    }

    #[test]
    fn axes_are_labelled() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("Win Rate (%)"));
        assert!(svg.contains("Profit/Loss Ratio"));
        assert!(svg.contains(">100<"));
        assert!(svg.contains(">5<"));
    }

    #[test]
    fn colorbar_is_titled() {
        let svg = render_expectancy_map(&sample_analysis(), 2);
        assert!(svg.contains("Expected Value</text>"));
        assert!(svg.contains("url(#ev-scale)"));
    }

    #[test]
    fn colorscale_endpoints() {
        assert_eq!(colorscale(0.0), (165, 0, 38));
        assert_eq!(colorscale(1.0), (0, 104, 55));
        assert_eq!(colorscale(0.5), (255, 255, 191));
    }

    #[test]
    fn colorscale_interpolates_between_stops() {
        let (r, g, b) = colorscale(0.05);
        assert_eq!((r, g, b), (190, 24, 39));
    }

    #[test]
    fn colorscale_clamps_out_of_range() {
        assert_eq!(colorscale(-1.0), colorscale(0.0));
        assert_eq!(colorscale(2.0), colorscale(1.0));
    }
}
