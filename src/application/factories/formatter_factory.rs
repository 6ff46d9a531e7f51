use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::TreeFormatter;

/// Factory for creating tree formatters
///
/// This factory encapsulates the creation logic for the formatter
/// implementations. It belongs in the application layer as it selects
/// infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for `format`
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `color` - Whether text output may use ANSI colours; ignored for JSON
    ///
    /// # Examples
    /// ```
    /// use cps_dependencies::application::dto::OutputFormat;
    /// use cps_dependencies::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, color: bool) -> Box<dyn TreeFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new().with_color(color)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the status line shown before rendering
    ///
    /// # Examples
    /// ```
    /// use cps_dependencies::application::dto::OutputFormat;
    /// use cps_dependencies::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Rendering JSON output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Rendering dependency tree...",
            OutputFormat::Json => "📝 Rendering JSON output...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{DiagnosticsView, TargetListView};

    #[test]
    fn test_create_json_formatter_renders_json() {
        let formatter = FormatterFactory::create(OutputFormat::Json, true);
        let output = formatter
            .format_diagnostics(&DiagnosticsView {
                target: None,
                messages: Vec::new(),
            })
            .unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_create_text_formatter_respects_color() {
        let formatter = FormatterFactory::create(OutputFormat::Text, false);
        let output = formatter
            .format_targets(&TargetListView {
                project_name: Some("App".to_string()),
                targets: Vec::new(),
            })
            .unwrap();
        assert!(!output.contains('\u{1b}'));
        assert!(output.starts_with("App\n"));
    }

    #[test]
    fn test_progress_messages() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Text),
            "📝 Rendering dependency tree..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Rendering JSON output..."
        );
    }
}
