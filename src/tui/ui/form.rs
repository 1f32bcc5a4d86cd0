//! Child details form: language selector, name, age, symptoms, submit.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    translate, Language, MessageKey, Symptom, LANGUAGE_SELECTOR_CAPTION, MAX_AGE, MIN_AGE,
};
use crate::tui::styles::MedicalTheme;

/// Age shown when the form opens.
pub const DEFAULT_AGE: u8 = 1;

/// Longest accepted name, in characters.
const MAX_NAME_CHARS: usize = 64;

/// Focusable form element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Language,
    Name,
    Age,
    Symptom(Symptom),
    Submit,
}

impl FormField {
    /// Focus order, top to bottom.
    pub const ORDER: [FormField; 11] = [
        Self::Language,
        Self::Name,
        Self::Age,
        Self::Symptom(Symptom::Fever),
        Self::Symptom(Symptom::Cough),
        Self::Symptom(Symptom::Vomiting),
        Self::Symptom(Symptom::Diarrhea),
        Self::Symptom(Symptom::Fatigue),
        Self::Symptom(Symptom::Lethargy),
        Self::Symptom(Symptom::Rash),
        Self::Submit,
    ];
}

/// Form state. Survives language switches and submissions.
#[derive(Debug, Clone)]
pub struct FormState {
    pub language: Language,
    pub name: String,
    pub age: u8,
    checked: [bool; 7],
    selected_field: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl FormState {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            name: String::new(),
            age: DEFAULT_AGE,
            checked: [false; 7],
            selected_field: 0,
        }
    }

    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FormField::ORDER[self.selected_field]
    }

    /// Move focus to `field`.
    pub fn focus(&mut self, field: FormField) {
        if let Some(pos) = FormField::ORDER.iter().position(|f| *f == field) {
            self.selected_field = pos;
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % FormField::ORDER.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = FormField::ORDER.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    #[must_use]
    pub fn is_checked(&self, symptom: Symptom) -> bool {
        self.checked[symptom.index()]
    }

    /// Checked symptoms in feature order.
    pub fn checked_symptoms(&self) -> impl Iterator<Item = Symptom> + '_ {
        Symptom::ALL.into_iter().filter(|s| self.is_checked(*s))
    }

    pub fn toggle_symptom(&mut self, symptom: Symptom) {
        self.checked[symptom.index()] = !self.checked[symptom.index()];
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    /// Apply a typed character to the focused field.
    ///
    /// Returns whether the form changed.
    pub fn input_char(&mut self, c: char) -> bool {
        match self.selected_field() {
            FormField::Name => {
                if c.is_control() || self.name.chars().count() >= MAX_NAME_CHARS {
                    return false;
                }
                self.name.push(c);
                true
            }
            FormField::Age => match c.to_digit(10) {
                Some(d) => {
                    // Append the digit; restart from it when the result overflows.
                    let appended = u32::from(self.age) * 10 + d;
                    let next = if appended > u32::from(MAX_AGE) { d } else { appended };
                    self.age = u8::try_from(next).unwrap_or(MAX_AGE).min(MAX_AGE);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Delete the last character of the name, or the last digit of the age.
    pub fn delete_char(&mut self) -> bool {
        match self.selected_field() {
            FormField::Name => self.name.pop().is_some(),
            FormField::Age => {
                let before = self.age;
                self.age /= 10;
                before != self.age
            }
            _ => false,
        }
    }

    /// Step the age by `delta`, clamped to the accepted range.
    pub fn adjust_age(&mut self, delta: i16) -> bool {
        let before = self.age;
        let next = (i16::from(self.age) + delta).clamp(i16::from(MIN_AGE), i16::from(MAX_AGE));
        self.age = u8::try_from(next).unwrap_or(before);
        before != self.age
    }
}

/// Render the details form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let lang = state.language;
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", translate(MessageKey::EnterDetails, lang)),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Language
            Constraint::Length(3), // Name
            Constraint::Length(3), // Age
            Constraint::Length(Symptom::ALL.len() as u16 + 2),
            Constraint::Length(3), // Submit
            Constraint::Min(0),
            Constraint::Length(2), // Key hints
        ])
        .split(inner);

    render_language(f, chunks[0], state);
    render_name(f, chunks[1], state);
    render_age(f, chunks[2], state);
    render_symptoms(f, chunks[3], state);
    render_submit(f, chunks[4], state);
    render_key_hints(f, chunks[6], lang);
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let (border_style, title_style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    Block::default()
        .title(Span::styled(format!(" {title} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn cursor(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▌", MedicalTheme::focused())
    } else {
        Span::raw("")
    }
}

fn render_language(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.selected_field() == FormField::Language;

    let mut spans = vec![Span::raw(" ")];
    for lang in Language::ALL {
        let style = if lang == state.language {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_muted()
        };
        let marker = if lang == state.language { "(•)" } else { "( )" };
        spans.push(Span::styled(format!("{marker} {}  ", lang.display_name()), style));
    }

    let content =
        Paragraph::new(Line::from(spans)).block(field_block(LANGUAGE_SELECTOR_CAPTION, focused));
    f.render_widget(content, area);
}

fn render_name(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.selected_field() == FormField::Name;
    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(state.name.clone(), MedicalTheme::text()),
        cursor(focused),
    ]))
    .block(field_block(
        translate(MessageKey::ChildName, state.language),
        focused,
    ));
    f.render_widget(content, area);
}

fn render_age(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.selected_field() == FormField::Age;
    let content = Paragraph::new(Line::from(vec![
        Span::styled(" ◂ ", MedicalTheme::text_muted()),
        Span::styled(state.age.to_string(), MedicalTheme::text()),
        cursor(focused),
        Span::styled(" ▸", MedicalTheme::text_muted()),
        Span::styled(format!("   ({MIN_AGE}-{MAX_AGE})"), MedicalTheme::text_muted()),
    ]))
    .block(field_block(
        translate(MessageKey::ChildAge, state.language),
        focused,
    ));
    f.render_widget(content, area);
}

fn render_symptoms(f: &mut Frame, area: Rect, state: &FormState) {
    let focused_symptom = match state.selected_field() {
        FormField::Symptom(s) => Some(s),
        _ => None,
    };

    let lines: Vec<Line> = Symptom::ALL
        .iter()
        .map(|&symptom| {
            let box_mark = if state.is_checked(symptom) { "[x]" } else { "[ ]" };
            let is_focused = focused_symptom == Some(symptom);
            let style = if is_focused {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text()
            };
            Line::from(vec![
                Span::styled(if is_focused { " › " } else { "   " }, style),
                Span::styled(format!("{box_mark} "), style),
                Span::styled(translate(MessageKey::Symptom(symptom), state.language), style),
            ])
        })
        .collect();

    let content = Paragraph::new(lines).block(field_block(
        translate(MessageKey::SelectSymptoms, state.language),
        focused_symptom.is_some(),
    ));
    f.render_widget(content, area);
}

fn render_submit(f: &mut Frame, area: Rect, state: &FormState) {
    let focused = state.selected_field() == FormField::Submit;
    let style = if focused {
        MedicalTheme::selected()
    } else {
        MedicalTheme::text()
    };
    let button = Paragraph::new(Line::from(Span::styled(
        format!("  {}  ", translate(MessageKey::PredictButton, state.language)),
        style,
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                MedicalTheme::border_focused()
            } else {
                MedicalTheme::border()
            }),
    );
    f.render_widget(button, area);
}

fn render_key_hints(f: &mut Frame, area: Rect, lang: Language) {
    let hints = Line::from(vec![
        Span::styled("[↑↓/Tab] ", MedicalTheme::key_hint()),
        Span::styled(
            format!("{} ", translate(MessageKey::HintNavigate, lang)),
            MedicalTheme::key_desc(),
        ),
        Span::styled("[Space/←→] ", MedicalTheme::key_hint()),
        Span::styled(
            format!("{} ", translate(MessageKey::HintToggle, lang)),
            MedicalTheme::key_desc(),
        ),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled(
            format!("{} ", translate(MessageKey::HintSubmit, lang)),
            MedicalTheme::key_desc(),
        ),
        Span::styled("[F2] ", MedicalTheme::key_hint()),
        Span::styled(
            format!("{} ", translate(MessageKey::HintLanguage, lang)),
            MedicalTheme::key_desc(),
        ),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled(translate(MessageKey::HintQuit, lang), MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(hints)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(footer, area);
}
