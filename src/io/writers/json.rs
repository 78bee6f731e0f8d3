use crate::dashboard::DashboardView;
use crate::errors::Result;
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_view(&mut self, view: &DashboardView) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, view)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dashboard::DashboardBuilder;
    use crate::data::builtin_snapshot;
    use serde_json::Value;

    #[test]
    fn writes_kpis_and_heatmap() {
        let view = DashboardBuilder::new(&DashboardConfig::default()).build(&builtin_snapshot());
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_view(&view).unwrap();

        let json: Value = serde_json::from_slice(&buf).unwrap();
        let dau = &json["kpis"][0];
        assert_eq!(dau["id"], "daily_active_users");
        assert_eq!(dau["delta"]["magnitude"], 11);
        assert_eq!(dau["delta"]["positive"], true);

        let newest = &json["retention"]["rows"][7]["cells"];
        assert_eq!(newest[0]["classification"]["tier"], "tier4");
        assert_eq!(
            newest[0]["classification"]["style"]["background"],
            "#2563eb"
        );
        assert!(newest[1]["value"].is_null());
        assert!(newest[1]["classification"].is_null());
    }

    #[test]
    fn skipped_sections_are_absent() {
        let view = DashboardBuilder::new(&DashboardConfig::default())
            .with_sections(vec![crate::config::Section::Tags])
            .build(&builtin_snapshot());
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_view(&view).unwrap();

        let json: Value = serde_json::from_slice(&buf).unwrap();
        assert!(json.get("tags").is_some());
        assert!(json.get("kpis").is_none());
        assert_eq!(json["sections"], serde_json::json!(["tags"]));
    }
}
