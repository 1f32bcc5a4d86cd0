//! Result pane: validation errors, prediction failures and the risk report.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::AssessmentReport;
use crate::domain::{translate, Language, MessageKey, RiskLevel};
use crate::tui::styles::MedicalTheme;

/// What the result pane currently shows
#[derive(Debug, Clone, Default)]
pub enum OutputState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Submission rejected before prediction
    Invalid(MessageKey),
    /// Prediction failed
    Failed,
    /// Successful assessment
    Report(Box<AssessmentReport>),
}

impl OutputState {
    /// Whether the pane shows an error that editing the form should clear.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Invalid(_) | Self::Failed)
    }
}

/// Render the result pane
pub fn render_output(f: &mut Frame, area: Rect, state: &OutputState, lang: Language) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", translate(MessageKey::OutputTitle, lang)),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let lines = match state {
        OutputState::Idle => vec![
            Line::from(""),
            Line::from(Span::styled(
                translate(MessageKey::OutputIdle, lang),
                MedicalTheme::text_muted(),
            )),
        ],
        OutputState::Invalid(key) => error_lines(*key, lang),
        OutputState::Failed => error_lines(MessageKey::ErrorPrediction, lang),
        OutputState::Report(report) => report_lines(report, lang),
    };

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(content, area);
}

fn error_lines(key: MessageKey, lang: Language) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(translate(key, lang), MedicalTheme::danger()),
        ]),
    ]
}

fn report_lines(report: &AssessmentReport, lang: Language) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(report.header(lang), MedicalTheme::title())),
        Line::from(""),
        Line::from(Span::styled(
            report.risk_line(lang),
            MedicalTheme::risk(report.risk),
        )),
        Line::from(""),
        Line::from(Span::styled(
            translate(MessageKey::ProbabilityBreakdown, lang),
            MedicalTheme::subtitle(),
        )),
    ];

    for level in RiskLevel::ALL {
        lines.push(Line::from(vec![
            Span::styled("  ● ", Style::default().fg(MedicalTheme::risk_color(level))),
            Span::styled(report.probability_line(level, lang), MedicalTheme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        report.advisory_text(lang),
        MedicalTheme::advisory(report.advisory()),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        report.timestamp_line(lang),
        MedicalTheme::info(),
    )));

    lines
}
