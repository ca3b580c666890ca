use super::component::UiState;
use colored::{ColoredString, Colorize};

const BAR_WIDTH: usize = 40;

pub const SUBMIT_LABEL: &str = "Analyze Sentiment";
pub const BUSY_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Green,
    Red,
}

impl IndicatorColor {
    fn paint(&self, input: &str) -> ColoredString {
        match self {
            IndicatorColor::Green => input.green(),
            IndicatorColor::Red => input.red(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub label: String,
    pub color: IndicatorColor,
    pub confidence_text: String,
    /// Filled share of the bar, `confidence * 100`.
    pub bar_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerView {
    pub input_disabled: bool,
    pub busy: bool,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub clear_visible: bool,
    pub clear_disabled: bool,
    pub result: Option<ResultPanel>,
}

pub fn render(state: &UiState) -> AnalyzerView {
    let result = state.result.as_ref().map(|result| ResultPanel {
        label: capitalize(result.sentiment.as_str()),
        color: if result.sentiment.is_positive() {
            IndicatorColor::Green
        } else {
            IndicatorColor::Red
        },
        confidence_text: format_confidence(result.confidence),
        bar_percent: result.confidence * 100.0,
    });

    AnalyzerView {
        input_disabled: state.is_loading,
        busy: state.is_loading,
        submit_label: if state.is_loading {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        },
        submit_disabled: state.is_loading || state.text.trim().is_empty(),
        clear_visible: !state.text.is_empty() || state.result.is_some(),
        clear_disabled: state.is_loading,
        result,
    }
}

/// `0.87` becomes `87.0%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ResultPanel {
    fn filled_cells(&self) -> usize {
        let share = (self.bar_percent / 100.0).clamp(0.0, 1.0);
        (share * BAR_WIDTH as f64).round() as usize
    }

    pub fn to_terminal(&self) -> String {
        let filled = self.filled_cells();
        let bar = format!(
            "{}{}",
            self.color.paint(&"█".repeat(filled)),
            "░".repeat(BAR_WIDTH - filled).dimmed()
        );

        format!(
            "{}\n{} {:<28} {} {}\n{}",
            "Result".white().bold(),
            self.color.paint("●"),
            self.label.bold(),
            "Confidence".dimmed(),
            self.confidence_text.bold(),
            bar
        )
    }
}

impl AnalyzerView {
    pub fn to_terminal(&self) -> String {
        match (&self.result, self.busy) {
            (_, true) => BUSY_LABEL.to_string(),
            (Some(panel), false) => panel.to_terminal(),
            (None, false) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::prelude::{AnalysisResult, Sentiment};

    fn state_with(result: Option<AnalysisResult>, text: &str, is_loading: bool) -> UiState {
        UiState {
            text: text.to_string(),
            result,
            is_loading,
        }
    }

    #[test]
    fn test_positive_result_panel() {
        let view = render(&state_with(
            Some(AnalysisResult::new(Sentiment::Positive, 0.87)),
            "nice",
            false,
        ));

        let panel = view.result.unwrap();
        assert_eq!("87.0%", panel.confidence_text);
        assert_eq!(IndicatorColor::Green, panel.color);
        assert_eq!("Positive", panel.label);
        assert!((panel.bar_percent - 87.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_and_unknown_labels_are_red() {
        for sentiment in [Sentiment::Negative, Sentiment::Other("neutral".to_string())] {
            let view = render(&state_with(
                Some(AnalysisResult::new(sentiment, 0.5)),
                "",
                false,
            ));
            assert_eq!(IndicatorColor::Red, view.result.unwrap().color);
        }
    }

    #[test]
    fn test_loading_disables_input() {
        let view = render(&state_with(None, "hello", true));

        assert!(view.input_disabled);
        assert!(view.busy);
        assert!(view.submit_disabled);
        assert!(view.clear_disabled);
        assert_eq!(BUSY_LABEL, view.submit_label);
        assert_eq!(BUSY_LABEL, view.to_terminal());
    }

    #[test]
    fn test_idle_view() {
        let view = render(&UiState::default());

        assert!(!view.input_disabled);
        assert_eq!(SUBMIT_LABEL, view.submit_label);
        assert!(view.submit_disabled);
        assert!(!view.clear_visible);
        assert!(view.result.is_none());

        let view = render(&state_with(None, "typed", false));
        assert!(!view.submit_disabled);
        assert!(view.clear_visible);
    }

    #[test]
    fn test_format_confidence_rounds_to_one_decimal() {
        assert_eq!("87.0%", format_confidence(0.87));
        assert_eq!("60.0%", format_confidence(0.6));
        assert_eq!("99.9%", format_confidence(0.9994));
        assert_eq!("100.0%", format_confidence(1.0));
    }

    #[test]
    fn test_terminal_bar_is_proportional() {
        colored::control::set_override(false);
        let panel = render(&state_with(
            Some(AnalysisResult::new(Sentiment::Negative, 0.5)),
            "x",
            false,
        ))
        .result
        .unwrap();

        let rendered = panel.to_terminal();
        assert!(rendered.contains("Negative"));
        assert!(rendered.contains("50.0%"));
        assert!(rendered.contains(&format!("{}{}", "█".repeat(20), "░".repeat(20))));
    }
}
