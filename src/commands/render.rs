use crate::config::{resolve_config, DashboardConfig, Section, ThresholdPreset};
use crate::dashboard::{DashboardBuilder, DashboardView};
use crate::data::{source_for, validate_snapshot, DataSource};
use crate::errors::Result;
use crate::formatting::{ColorMode, FormattingConfig};
use crate::io::{create_writer, open_destination, OutputFormat};
use crate::observability::{set_phase, set_source, RenderPhase};
use crate::validation::run_validation;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Everything `kpiboard render` needs, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub data: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub sections: Vec<Section>,
    pub config: Option<PathBuf>,
    pub threshold_preset: Option<ThresholdPreset>,
    pub plain: bool,
}

/// Load, validate, build and write a dashboard.
pub fn handle_render(options: RenderConfig) -> Result<()> {
    let config = {
        let _phase = set_phase(RenderPhase::ConfigLoading);
        resolve_config(options.config.as_deref())?
    };

    let source = source_for(options.data.as_deref());
    let view = build_view(source.as_ref(), &config, &options)?;

    let format = resolve_format(options.format, &config);
    let formatting = resolve_formatting(options.plain, &config);

    let _phase = set_phase(RenderPhase::OutputGeneration);
    let destination = open_destination(options.output.as_deref())?;
    write_view(&view, format, destination, formatting)?;

    if let Some(path) = &options.output {
        info!("Wrote {:?} report to {}", format, path.display());
    }
    Ok(())
}

/// Load and validate a snapshot, then build its view.
pub fn build_view(
    source: &dyn DataSource,
    config: &DashboardConfig,
    options: &RenderConfig,
) -> Result<DashboardView> {
    let _source = set_source(source.describe());

    let data = {
        let _phase = set_phase(RenderPhase::DataLoading);
        source.load()?
    };

    {
        let _phase = set_phase(RenderPhase::Validation);
        run_validation(validate_snapshot(&data))?;
    }

    let _phase = set_phase(RenderPhase::ViewBuilding);
    let mut builder = DashboardBuilder::new(config)
        .with_source(source.describe())
        .with_sections(options.sections.clone());
    if let Some(preset) = options.threshold_preset {
        builder = builder.with_thresholds(preset.thresholds());
    }
    Ok(builder.build(&data))
}

pub fn write_view<'a>(
    view: &DashboardView,
    format: OutputFormat,
    destination: Box<dyn Write + 'a>,
    formatting: FormattingConfig,
) -> Result<()> {
    let mut writer = create_writer(format, destination, formatting);
    writer.write_view(view)
}

/// Command-line format, then the config's default, then terminal.
pub fn resolve_format(cli: Option<OutputFormat>, config: &DashboardConfig) -> OutputFormat {
    cli.or_else(|| {
        config
            .output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
            .and_then(OutputFormat::parse)
    })
    .unwrap_or_default()
}

/// `--plain` wins; otherwise environment variables, then the config's `use_color`.
pub fn resolve_formatting(plain: bool, config: &DashboardConfig) -> FormattingConfig {
    if plain {
        return FormattingConfig::plain();
    }
    let mut formatting = FormattingConfig::from_env();
    if formatting.color == ColorMode::Auto {
        match config.output.as_ref().and_then(|o| o.use_color) {
            Some(true) => formatting.color = ColorMode::Always,
            Some(false) => formatting.color = ColorMode::Never,
            None => {}
        }
    }
    formatting
}
