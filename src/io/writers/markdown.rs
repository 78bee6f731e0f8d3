use crate::config::Section;
use crate::dashboard::{DashboardView, HeatmapRow, RetentionHeatmap};
use crate::errors::Result;
use crate::formatting::{format_count, format_currency, format_duration, format_percent};
use crate::io::output::OutputWriter;
use crate::metrics::RetentionCell;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_view(&mut self, view: &DashboardView) -> Result<()> {
        self.write_header(view)?;
        for section in &view.sections {
            self.write_section(view, *section)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, view: &DashboardView) -> Result<()> {
        writeln!(self.writer, "# Analytics Dashboard")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Source: {}", view.source)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_section(&mut self, view: &DashboardView, section: Section) -> Result<()> {
        writeln!(self.writer, "## {}", section.title())?;
        writeln!(self.writer)?;
        let symbol = view.currency_symbol.as_str();

        match section {
            Section::Kpis => {
                self.table_header(&["Metric", "Value", "Change"])?;
                for card in view.kpis.iter().flatten() {
                    let change = card
                        .delta
                        .map(|d| d.signed_label())
                        .unwrap_or_else(|| "n/a".to_string());
                    self.row(&[&card.label, &card.display, &change])?;
                }
            }
            Section::Trend => {
                self.table_header(&["Period", "DAU", "MRR"])?;
                for row in view.trend.iter().flatten() {
                    self.row(&[
                        &row.date,
                        &format_count(row.dau),
                        &format_currency(row.mrr, symbol),
                    ])?;
                }
            }
            Section::Retention => {
                if let Some(heatmap) = &view.retention {
                    self.write_heatmap(heatmap)?;
                }
            }
            Section::Queries => {
                self.table_header(&["Query", "Calls", "Avg latency", "Error rate"])?;
                for q in view.queries.iter().flatten() {
                    self.row(&[
                        &q.query,
                        &format_count(q.calls),
                        &format!("{:.1} ms", q.avg_latency_ms),
                        &format_percent(q.error_rate),
                    ])?;
                }
            }
            Section::Tags => {
                self.table_header(&["Tag", "Count", "Share"])?;
                for t in view.tags.iter().flatten() {
                    self.row(&[&t.tag, &format_count(t.count), &optional_percent(t.share)])?;
                }
            }
            Section::Regions => {
                self.table_header(&["Region", "Revenue", "Share", "Growth"])?;
                for r in view.regions.iter().flatten() {
                    self.row(&[
                        &r.region,
                        &format_currency(r.revenue, symbol),
                        &optional_percent(r.share),
                        &format!("{:+.1}%", r.growth),
                    ])?;
                }
            }
            Section::Payments => {
                self.table_header(&["Method", "Share"])?;
                for p in view.payments.iter().flatten() {
                    self.row(&[&p.method, &format_percent(p.share)])?;
                }
            }
            Section::Jobs => {
                if let Some(panel) = &view.jobs {
                    let s = panel.summary;
                    writeln!(
                        self.writer,
                        "{} succeeded, {} running, {} failed, {} queued",
                        s.succeeded, s.running, s.failed, s.queued
                    )?;
                    writeln!(self.writer)?;
                    self.table_header(&["Job", "State", "Duration", "Last run"])?;
                    for job in &panel.jobs {
                        self.row(&[
                            &job.name,
                            &job.state.to_string(),
                            &format_duration(job.duration_secs),
                            &job.last_run,
                        ])?;
                    }
                }
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_heatmap(&mut self, heatmap: &RetentionHeatmap) -> Result<()> {
        let mut headers = vec!["Cohort".to_string()];
        headers.extend((0..heatmap.weeks).map(|w| format!("W{w}")));
        let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
        self.table_header(&headers)?;

        for row in heatmap.rows.iter().chain(std::iter::once(&heatmap.average)) {
            self.heatmap_row(row)?;
        }

        writeln!(self.writer)?;
        let legend: Vec<String> = heatmap
            .legend
            .iter()
            .map(|e| format!("{} `{}`", e.tier.short_label(), e.range))
            .collect();
        writeln!(self.writer, "Legend: {}", legend.join(", "))?;
        Ok(())
    }

    fn heatmap_row(&mut self, row: &HeatmapRow) -> Result<()> {
        let cells: Vec<String> = row.cells.iter().map(heat_cell).collect();
        let mut fields: Vec<&str> = vec![row.label.as_str()];
        fields.extend(cells.iter().map(String::as_str));
        self.row(&fields)
    }

    fn table_header(&mut self, columns: &[&str]) -> Result<()> {
        self.row(columns)?;
        let rule: Vec<&str> = columns.iter().map(|_| "---").collect();
        self.row(&rule)
    }

    fn row(&mut self, fields: &[&str]) -> Result<()> {
        // A table row must stay on one line
        let escaped: Vec<String> = fields
            .iter()
            .map(|f| f.replace('|', "\\|").replace(['\r', '\n'], " "))
            .collect();
        writeln!(self.writer, "| {} |", escaped.join(" | "))?;
        Ok(())
    }
}

fn heat_cell(cell: &RetentionCell) -> String {
    match (cell.value, cell.classification) {
        (Some(value), Some(c)) => format!("{value:.1} ({})", c.tier.short_label()),
        _ => String::new(),
    }
}

fn optional_percent(value: Option<f64>) -> String {
    value.map(format_percent).unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dashboard::DashboardBuilder;
    use crate::data::builtin_snapshot;

    fn render(sections: Vec<Section>) -> String {
        let view = DashboardBuilder::new(&DashboardConfig::default())
            .with_source("built-in sample data")
            .with_sections(sections)
            .build(&builtin_snapshot());
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf).write_view(&view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn kpi_table_shows_signed_deltas() {
        let out = render(vec![Section::Kpis]);
        assert!(out.contains("## Key Metrics"));
        assert!(out.contains("| Daily Active Users | 9,000 | +11% |"));
        assert!(out.contains("| Query Volume | 156,936 | n/a |"));
    }

    #[test]
    fn heatmap_leaves_unobserved_cells_blank() {
        let out = render(vec![Section::Retention]);
        assert!(out.contains("| Feb 19 | 100.0 (T4) |  |  |  |  |  |  |  |"));
        assert!(out.contains("Legend: T1 `< 15`, T2 `15-30`, T3 `30-50`, T4 `>= 50`"));
    }

    #[test]
    fn only_requested_sections_are_written() {
        let out = render(vec![Section::Jobs]);
        assert!(out.contains("## Jobs"));
        assert!(out.contains("1 succeeded, 1 running, 1 failed, 1 queued"));
        assert!(!out.contains("## Key Metrics"));
    }

    #[test]
    fn pipes_in_cells_are_escaped() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf).row(&["a|b"]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "| a\\|b |\n");
    }

    #[test]
    fn newlines_in_cells_become_spaces() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf)
            .row(&["line one\nline two", "a\r\nb"])
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "| line one line two | a  b |\n"
        );
    }
}
