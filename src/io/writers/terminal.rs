use crate::config::Section;
use crate::dashboard::{DashboardView, HeatmapRow, KpiCard, RetentionHeatmap, TrendRow};
use crate::data::JobState;
use crate::errors::Result;
use crate::formatting::{
    format_count, format_currency, format_duration, format_percent, formatter_for,
    FormattingConfig, OutputFormatter,
};
use crate::io::output::OutputWriter;
use crate::metrics::{Rgb, TierStyle};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

const DIVIDER: &str = "═══════════════════════════════════════════";

pub struct TerminalWriter<W: Write> {
    writer: W,
    config: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            config,
            formatter: formatter_for(config),
        }
    }

    fn use_color(&self) -> bool {
        self.config.color.should_use_color()
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.use_color() {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn header_cells(&self, titles: &[&str]) -> Vec<Cell> {
        titles
            .iter()
            .map(|t| {
                let cell = Cell::new(t);
                if self.use_color() {
                    cell.add_attribute(comfy_table::Attribute::Bold)
                } else {
                    cell
                }
            })
            .collect()
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_view(&mut self, view: &DashboardView) -> Result<()> {
        self.write_banner(view)?;
        for section in &view.sections {
            self.write_section_title(*section)?;
            match section {
                Section::Kpis => self.write_kpis(view.kpis.as_deref().unwrap_or_default())?,
                Section::Trend => self.write_trend(
                    view.trend.as_deref().unwrap_or_default(),
                    &view.currency_symbol,
                )?,
                Section::Retention => {
                    if let Some(heatmap) = &view.retention {
                        self.write_heatmap(heatmap)?;
                    }
                }
                Section::Queries => self.write_queries(view)?,
                Section::Tags => self.write_tags(view)?,
                Section::Regions => self.write_regions(view)?,
                Section::Payments => self.write_payments(view)?,
                Section::Jobs => self.write_jobs(view)?,
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_banner(&mut self, view: &DashboardView) -> Result<()> {
        let f = &self.formatter;
        writeln!(self.writer, "{}", f.info(DIVIDER))?;
        writeln!(
            self.writer,
            "{} {}",
            f.emoji("📊", "[DASHBOARD]"),
            f.header("ANALYTICS DASHBOARD")
        )?;
        writeln!(self.writer, "{}", f.info(DIVIDER))?;
        writeln!(
            self.writer,
            "{}",
            f.dim(&format!(
                "Source: {}  |  Generated: {}",
                view.source,
                view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
        )?;
        Ok(())
    }

    fn write_section_title(&mut self, section: Section) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.formatter.bold(section.title()))?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        Ok(())
    }

    fn write_kpis(&mut self, cards: &[KpiCard]) -> Result<()> {
        let mut table = self.table();
        table.set_header(self.header_cells(&["Metric", "Value", "Change"]));
        for card in cards {
            let change = match card.delta {
                Some(delta) => {
                    let cell = Cell::new(delta.signed_label());
                    match (self.use_color(), delta.positive) {
                        (true, true) => cell.fg(Color::Green),
                        (true, false) => cell.fg(Color::Red),
                        _ => cell,
                    }
                }
                None => Cell::new("n/a"),
            };
            table.add_row(vec![
                Cell::new(&card.label),
                Cell::new(&card.display).set_alignment(CellAlignment::Right),
                change.set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_trend(&mut self, rows: &[TrendRow], symbol: &str) -> Result<()> {
        let label_width = rows.iter().map(|r| r.date.width()).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(rows.len() * 2);
        for row in rows {
            let pad = " ".repeat(label_width - row.date.width());
            lines.push(format!(
                "{}{pad}  DAU {} {}",
                row.date,
                self.formatter.info(&"█".repeat(row.dau_bar)),
                format_count(row.dau)
            ));
            lines.push(format!(
                "{}  MRR {} {}",
                " ".repeat(label_width),
                self.formatter.success(&"█".repeat(row.mrr_bar)),
                format_currency(row.mrr, symbol)
            ));
        }
        for line in lines {
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }

    fn write_heatmap(&mut self, heatmap: &RetentionHeatmap) -> Result<()> {
        let mut table = self.table();
        let mut headers = vec!["Cohort".to_string()];
        headers.extend((0..heatmap.weeks).map(|w| format!("W{w}")));
        let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
        table.set_header(self.header_cells(&headers));

        for row in heatmap.rows.iter().chain(std::iter::once(&heatmap.average)) {
            table.add_row(self.heatmap_cells(row));
        }
        writeln!(self.writer, "{table}")?;

        let legend: Vec<String> = heatmap
            .legend
            .iter()
            .map(|e| {
                let label = format!(" {} ", e.tier.short_label());
                let swatch = self.formatter.tier_cell(&label, e.style);
                format!("{swatch} {}", e.range)
            })
            .collect();
        writeln!(self.writer, "Legend: {}", legend.join("  "))?;
        Ok(())
    }

    fn heatmap_cells(&self, row: &HeatmapRow) -> Vec<Cell> {
        let mut cells = vec![Cell::new(&row.label)];
        cells.extend(row.cells.iter().map(|cell| match (cell.value, cell.classification) {
            (Some(value), Some(c)) => {
                let text = if self.use_color() {
                    format!("{value:.1}")
                } else {
                    format!("{value:.1} {}", c.tier.short_label())
                };
                self.styled(Cell::new(text), c.style)
                    .set_alignment(CellAlignment::Right)
            }
            _ => Cell::new(""),
        }));
        cells
    }

    fn styled(&self, cell: Cell, style: TierStyle) -> Cell {
        if self.use_color() {
            cell.bg(color(style.background)).fg(color(style.foreground))
        } else {
            cell
        }
    }

    fn write_queries(&mut self, view: &DashboardView) -> Result<()> {
        let mut table = self.table();
        table.set_header(self.header_cells(&["Query", "Calls", "Avg latency", "Error rate"]));
        for q in view.queries.iter().flatten() {
            table.add_row(vec![
                Cell::new(&q.query),
                Cell::new(format_count(q.calls)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1} ms", q.avg_latency_ms))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_percent(q.error_rate)).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_tags(&mut self, view: &DashboardView) -> Result<()> {
        let mut table = self.table();
        table.set_header(self.header_cells(&["Tag", "Count", "Share"]));
        for t in view.tags.iter().flatten() {
            table.add_row(vec![
                Cell::new(&t.tag),
                Cell::new(format_count(t.count)).set_alignment(CellAlignment::Right),
                Cell::new(t.share.map(format_percent).unwrap_or_else(|| "n/a".into()))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_regions(&mut self, view: &DashboardView) -> Result<()> {
        let mut table = self.table();
        table.set_header(self.header_cells(&["Region", "Revenue", "Share", "Growth"]));
        for r in view.regions.iter().flatten() {
            let growth = Cell::new(format!("{:+.1}%", r.growth));
            let growth = match (self.use_color(), r.growth >= 0.0) {
                (true, true) => growth.fg(Color::Green),
                (true, false) => growth.fg(Color::Red),
                _ => growth,
            };
            table.add_row(vec![
                Cell::new(&r.region),
                Cell::new(format_currency(r.revenue, &view.currency_symbol))
                    .set_alignment(CellAlignment::Right),
                Cell::new(r.share.map(format_percent).unwrap_or_else(|| "n/a".into()))
                    .set_alignment(CellAlignment::Right),
                growth.set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_payments(&mut self, view: &DashboardView) -> Result<()> {
        let mut table = self.table();
        table.set_header(self.header_cells(&["Method", "Share"]));
        for p in view.payments.iter().flatten() {
            table.add_row(vec![
                Cell::new(&p.method),
                Cell::new(format_percent(p.share)).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_jobs(&mut self, view: &DashboardView) -> Result<()> {
        let Some(panel) = &view.jobs else {
            return Ok(());
        };
        let s = panel.summary;
        writeln!(
            self.writer,
            "{} succeeded  {} running  {} failed  {} queued",
            self.formatter.success(&s.succeeded.to_string()),
            self.formatter.info(&s.running.to_string()),
            self.formatter.error(&s.failed.to_string()),
            self.formatter.dim(&s.queued.to_string()),
        )?;

        let mut table = self.table();
        table.set_header(self.header_cells(&["Job", "State", "Duration", "Last run"]));
        for job in &panel.jobs {
            let state = Cell::new(job.state.to_string());
            let state = if self.use_color() {
                state.fg(match job.state {
                    JobState::Succeeded => Color::Green,
                    JobState::Running => Color::Cyan,
                    JobState::Failed => Color::Red,
                    JobState::Queued => Color::DarkGrey,
                })
            } else {
                state
            };
            table.add_row(vec![
                Cell::new(&job.name),
                state,
                Cell::new(format_duration(job.duration_secs)).set_alignment(CellAlignment::Right),
                Cell::new(&job.last_run),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dashboard::DashboardBuilder;
    use crate::data::builtin_snapshot;

    fn render_plain(sections: Vec<Section>) -> String {
        let view = DashboardBuilder::new(&DashboardConfig::default())
            .with_source("built-in sample data")
            .with_sections(sections)
            .build(&builtin_snapshot());
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf, FormattingConfig::plain())
            .write_view(&view)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let out = render_plain(Section::ALL.to_vec());
        assert!(!out.contains('\u{1b}'));
        assert!(out.contains("[DASHBOARD] ANALYTICS DASHBOARD"));
    }

    #[test]
    fn kpis_show_values_and_changes() {
        let out = render_plain(vec![Section::Kpis]);
        assert!(out.contains("Daily Active Users"));
        assert!(out.contains("9,000"));
        assert!(out.contains("+11%"));
        assert!(out.contains("$46,900"));
    }

    #[test]
    fn plain_heatmap_spells_out_tiers() {
        let out = render_plain(vec![Section::Retention]);
        assert!(out.contains("62.4 T4"));
        assert!(out.contains("29.1 T2"));
        assert!(out.contains("Legend:  T1  < 15"));
    }

    #[test]
    fn trend_lines_are_aligned() {
        let out = render_plain(vec![Section::Trend]);
        assert!(out.contains("Dec  DAU ████████████████████████████████████████ 9,000"));
        assert!(out.contains("     MRR ████████████████████████████████████████ $46,900"));
    }

    #[test]
    fn jobs_summary_line() {
        let out = render_plain(vec![Section::Jobs]);
        assert!(out.contains("1 succeeded  1 running  1 failed  1 queued"));
        assert!(out.contains("30m 42s"));
    }
}
