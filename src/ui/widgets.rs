use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use exam_score_predictor::form::{Field, FormState, PART_TIME_JOB_OPTIONS};
use exam_score_predictor::session::PredictionView;

use super::theme::Theme;

pub const APP_TITLE: &str = "Student Exam Score Predictor";
const CAPTION: &str = "Enter one observation (a student) and get a prediction.";
const DISCLAIMER: &str = "This prediction is indicative. It may be less accurate for extreme \
                          profiles or profiles outside the training domain.";
const BAR_WIDTH: usize = 20;

pub fn header() -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(APP_TITLE, Theme::title())),
        Line::from(Span::styled(CAPTION, Theme::dim())),
    ];
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL))
}

pub fn form(state: &FormState) -> Paragraph<'static> {
    let mut lines = Vec::new();
    for field in Field::ALL {
        let focused = state.focus() == field;
        let label_style = if focused { Theme::focused() } else { Theme::text() };

        lines.push(Line::from(Span::styled(field.label(), label_style)));
        let control = match state.fraction(field) {
            Some(f) => format!("  {} {}", bar(f), state.display(field)),
            None => format!("  {}", radio(state.part_time_job_label())),
        };
        lines.push(Line::from(Span::styled(control, Theme::text())));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Manual input"),
    )
}

pub fn metric(view: &PredictionView) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(view.metric.clone(), Theme::metric()))).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Predicted Exam Score"),
    )
}

pub fn gauge(view: &PredictionView) -> Gauge<'static> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Theme::gauge())
        .ratio(view.ratio)
        .label(format!("{:.0}%", view.ratio * 100.0))
}

pub fn params(view: &PredictionView) -> Paragraph<'static> {
    Paragraph::new(view.params_pretty()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Parameters used"),
    )
}

/// Error or hint box.
pub fn message(title: &'static str, text: String, style: ratatui::style::Style) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true })
}

pub fn footer() -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(DISCLAIMER, Theme::warn())),
        Line::from(Span::styled(
            "up/down: field  left/right: adjust  enter: predict  r: reset  q: quit",
            Theme::dim(),
        )),
    ];
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn radio(selected: &str) -> String {
    PART_TIME_JOB_OPTIONS
        .iter()
        .map(|opt| {
            let mark = if *opt == selected { "(x)" } else { "( )" };
            format!("{mark} {opt}")
        })
        .collect::<Vec<_>>()
        .join("   ")
}
