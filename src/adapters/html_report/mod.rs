//! Self-contained HTML report generation.
//!
//! Builds a single HTML page: account summary, results table, skipped
//! orders, and the expected value map as inline SVG. No external assets.

pub mod chart_svg;
pub mod tables;

use std::fs;
use std::path::Path;

use crate::domain::analysis::Analysis;
use crate::domain::error::EdgemapError;
use crate::ports::report_port::ReportPort;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }
h1 { margin-bottom: 0.2em; }
.meta { color: #666; margin-top: 0; }
table { border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: right; }
th { background: #f0f0f0; }
td.long, td.pos { color: #006400; }
td.short, td.neg { color: #8b0000; }
ul.skipped li { color: #8b0000; }
";

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub struct HtmlReportAdapter {
    title: String,
    decimals: usize,
}

impl HtmlReportAdapter {
    pub fn new(title: String, decimals: usize) -> Self {
        Self { title, decimals }
    }

    pub fn render_page(&self, analysis: &Analysis) -> String {
        let title = escape_html(&self.title);
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{title}</title>\n"));
        html.push_str(&format!("<style>\n{STYLE}</style>\n"));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{title}</h1>\n"));
        html.push_str(&format!("<p class=\"meta\">Generated {generated}</p>\n"));

        html.push_str("<h2>Account</h2>\n");
        html.push_str(&tables::render_account_summary(analysis, self.decimals));

        html.push_str("<h2>Orders</h2>\n");
        html.push_str(&tables::render_results_table(
            &analysis.evaluations,
            self.decimals,
        ));

        if !analysis.skipped.is_empty() {
            html.push_str("<h2>Skipped Orders</h2>\n");
            html.push_str(&tables::render_skipped_list(&analysis.skipped));
        }

        html.push_str("<h2>Expected Value Map</h2>\n");
        html.push_str(&chart_svg::render_expectancy_map(analysis, self.decimals));

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(&self, analysis: &Analysis, output_path: &str) -> Result<(), EdgemapError> {
        let html = self.render_page(analysis);

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(EdgemapError::Io)?;
        }
        fs::write(path, html).map_err(EdgemapError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::analyze_orders;
    use crate::domain::direction::Direction;
    use crate::domain::order::OrderSpec;
    use crate::domain::price_spec::PriceSpec;
    use std::fs;
    use tempfile::tempdir;

    fn sample_adapter() -> HtmlReportAdapter {
        HtmlReportAdapter::new("Order Risk/Reward Report".to_string(), 2)
    }

    fn sample_analysis() -> Analysis {
        let orders = vec![
            OrderSpec {
                direction: Direction::Long,
                win_rate: 0.6,
                entry_price: 4420.0,
                take_profit: "3%".parse().unwrap(),
                stop_loss: "-8.7%".parse().unwrap(),
            },
            OrderSpec {
                direction: Direction::Short,
                win_rate: 0.5,
                entry_price: 4420.0,
                take_profit: PriceSpec::Absolute(4000.0),
                stop_loss: PriceSpec::Absolute(5000.0),
            },
        ];
        analyze_orders(&orders, 100.0, 20.0)
    }

    #[test]
    fn write_creates_report_file() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("report.html");
        let output_str = output_path.to_str().unwrap();

        sample_adapter().write(&sample_analysis(), output_str).unwrap();

        assert!(output_path.exists());
        let contents = fs::read_to_string(&output_path).unwrap();
        assert!(contents.contains("Order Risk/Reward Report"));
        assert!(contents.contains("Generated "));
        assert!(contents.contains("<svg"));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("nested/deep/path/report.html");
        let output_str = output_path.to_str().unwrap();

        sample_adapter().write(&sample_analysis(), output_str).unwrap();

        assert!(output_path.exists());
    }

    #[test]
    fn page_includes_account_and_results() {
        let html = sample_adapter().render_page(&sample_analysis());
        assert!(html.contains("<h2>Account</h2>"));
        assert!(html.contains("<th>Leverage</th><td>20x</td>"));
        assert!(html.contains("<h2>Orders</h2>"));
        assert!(html.contains("4552.60"));
        assert!(html.contains("<h2>Expected Value Map</h2>"));
    }

    #[test]
    fn page_omits_skipped_section_when_none() {
        let html = sample_adapter().render_page(&sample_analysis());
        assert!(!html.contains("Skipped Orders"));
    }

    #[test]
    fn page_lists_skipped_orders() {
        let orders = vec![
            OrderSpec {
                direction: Direction::Long,
                win_rate: 0.6,
                entry_price: 100.0,
                take_profit: PriceSpec::Absolute(110.0),
                stop_loss: PriceSpec::Absolute(95.0),
            },
            OrderSpec {
                direction: Direction::Long,
                win_rate: 0.6,
                entry_price: 100.0,
                take_profit: PriceSpec::Absolute(90.0),
                stop_loss: PriceSpec::Absolute(95.0),
            },
        ];
        let analysis = analyze_orders(&orders, 1000.0, 1.0);
        let html = sample_adapter().render_page(&analysis);
        assert!(html.contains("<h2>Skipped Orders</h2>"));
        assert!(html.contains("order 2: long @ 100"));
    }

    #[test]
    fn title_is_escaped() {
        let adapter = HtmlReportAdapter::new("Q3 <orders> & more".to_string(), 2);
        let html = adapter.render_page(&sample_analysis());
        assert!(html.contains("Q3 &lt;orders&gt; &amp; more"));
        assert!(!html.contains("<orders>"));
    }

    #[test]
    fn decimals_setting_reaches_the_tables() {
        let adapter = HtmlReportAdapter::new("t".to_string(), 3);
        let html = adapter.render_page(&sample_analysis());
        assert!(html.contains("4552.600"));
    }
}
