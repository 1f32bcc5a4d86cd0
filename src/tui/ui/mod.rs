//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{translate, Language, MessageKey};
use crate::tui::styles::MedicalTheme;

use form::{render_form, FormState};
use result::{render_output, OutputState};

/// Render the whole screen: title, form, result pane and disclaimer.
pub fn render(f: &mut Frame, form: &FormState, output: &OutputState) {
    let lang = form.language;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Form + result
            Constraint::Length(3), // Disclaimer
        ])
        .split(f.area());

    render_title(f, chunks[0], lang);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_form(f, body[0], form);
    render_output(f, body[1], output, lang);
    render_disclaimer(f, chunks[2], lang);
}

fn render_title(f: &mut Frame, area: Rect, lang: Language) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ✚ ", MedicalTheme::subtitle()),
        Span::styled(translate(MessageKey::Title, lang), MedicalTheme::title()),
        Span::styled(
            format!(" │ {}", lang.display_name()),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// The disclaimer is drawn on every frame, whatever the result pane shows.
pub fn render_disclaimer(f: &mut Frame, area: Rect, lang: Language) {
    let text = vec![Line::from(vec![Span::styled(
        translate(MessageKey::Disclaimer, lang),
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AssessmentReport;
    use crate::domain::{ClassProbabilities, DecodedRisk};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(form: &FormState, output: &OutputState) -> Vec<String> {
        let backend = TestBackend::new(160, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| render(f, form, output))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn shows(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    fn high_risk_report() -> OutputState {
        OutputState::Report(Box::new(AssessmentReport {
            child_name: "Amara".to_string(),
            age: 2,
            class: 2,
            risk: DecodedRisk::decode(2),
            probabilities: ClassProbabilities::from([0.05, 0.15, 0.80]),
            assessed_at: chrono::Utc::now(),
        }))
    }

    #[test]
    fn test_idle_screen_shows_form_and_disclaimer() {
        let lines = rendered(&FormState::default(), &OutputState::Idle);

        assert!(shows(&lines, "Child Illness Risk Checker"));
        assert!(shows(&lines, "Select Language / Chagua Lugha"));
        assert!(shows(&lines, "Child Name"));
        assert!(shows(&lines, "Lethargy"));
        assert!(shows(&lines, "Predict Risk Level"));
        assert!(shows(&lines, "does NOT replace a healthcare professional"));
    }

    #[test]
    fn test_high_risk_report_rendering() {
        let mut form = FormState::default();
        form.name = "Amara".to_string();
        form.age = 2;

        let lines = rendered(&form, &high_risk_report());

        assert!(shows(&lines, "Risk Assessment for Amara (2 years)"));
        assert!(shows(&lines, "Risk Level: High"));
        assert!(shows(&lines, "High Risk: 80.0%"));
        assert!(shows(&lines, "Medium Risk: 15.0%"));
        assert!(shows(&lines, "Low Risk: 5.0%"));
        assert!(shows(&lines, "HIGH RISK: Please visit a nearby healthcare facility"));
        assert!(shows(&lines, "does NOT replace a healthcare professional"));
    }

    #[test]
    fn test_swahili_rendering_of_same_report() {
        let form = FormState::new(Language::Swahili);
        let lines = rendered(&form, &high_risk_report());

        assert!(shows(&lines, "Jina la Mtoto"));
        assert!(shows(&lines, "Kiwango cha Hatari: Kubwa"));
        assert!(shows(&lines, "Hatari Kubwa: 80.0%"));
        assert!(shows(&lines, "HATARI KUBWA"));
        assert!(shows(&lines, "HAIJABADILI mtaalamu wa afya"));
        assert!(!shows(&lines, "Risk Level: High"));
    }

    #[test]
    fn test_validation_error_rendering() {
        let lines = rendered(
            &FormState::default(),
            &OutputState::Invalid(MessageKey::ErrorName),
        );
        assert!(shows(&lines, "Please enter the child's name."));
        assert!(!shows(&lines, "Risk Level:"));
        assert!(!shows(&lines, "Risk Assessment for"));
        assert!(!shows(&lines, "Probability Breakdown"));
    }

    #[test]
    fn test_prediction_failure_rendering() {
        let lines = rendered(&FormState::new(Language::Swahili), &OutputState::Failed);
        assert!(shows(&lines, "Hatari haikuweza kukadiriwa."));
        assert!(shows(&lines, "HAIJABADILI mtaalamu wa afya"));
    }
}
