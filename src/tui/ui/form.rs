//! Step form rendering.
//!
//! Each wizard step renders from the same field-box layout; which fields
//! appear is driven by `Step::fields()`, so adding a field to a step never
//! touches this module's layout code.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::Step;
use crate::domain::{FieldId, FormData};
use crate::tui::styles::MedicalTheme;

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-typed number
    Numeric,
    /// Cycles through a fixed set of options
    Choice,
    /// Yes/no checkbox
    Toggle,
}

/// Editing mode for a field.
#[must_use]
pub fn field_kind(field: FieldId) -> FieldKind {
    match field {
        FieldId::Age
        | FieldId::SystolicBp
        | FieldId::TotalCholesterol
        | FieldId::HdlCholesterol
        | FieldId::Bmi => FieldKind::Numeric,
        FieldId::Gender | FieldId::PhysicalActivity => FieldKind::Choice,
        FieldId::Smoker | FieldId::Diabetes | FieldId::FamilyHistory => FieldKind::Toggle,
    }
}

fn field_label(field: FieldId) -> &'static str {
    match field {
        FieldId::Age => "Age",
        FieldId::Gender => "Gender",
        FieldId::SystolicBp => "Systolic BP",
        FieldId::TotalCholesterol => "Total Cholesterol",
        FieldId::HdlCholesterol => "HDL Cholesterol",
        FieldId::Bmi => "BMI",
        FieldId::PhysicalActivity => "Physical Activity",
        FieldId::Smoker => "Current Smoker",
        FieldId::Diabetes => "Diabetes",
        FieldId::FamilyHistory => "Family History of Heart Disease",
    }
}

// Hints carry the ranges the scoring service accepts.
fn field_hint(field: FieldId) -> &'static str {
    match field {
        FieldId::Age => "years (20-100)",
        FieldId::Gender => "press Space to choose",
        FieldId::SystolicBp => "mmHg (80-300)",
        FieldId::TotalCholesterol => "mg/dL (100-500)",
        FieldId::HdlCholesterol => "mg/dL (10-150)",
        FieldId::Bmi => "kg/m2 (15.0-50.0)",
        FieldId::PhysicalActivity => "press Space to choose",
        FieldId::Smoker | FieldId::Diabetes | FieldId::FamilyHistory => "press Space to toggle",
    }
}

/// Display value for a field; `None` renders the hint instead.
fn field_value(form: &FormData, field: FieldId) -> Option<String> {
    match field_kind(field) {
        FieldKind::Numeric => form
            .text(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        FieldKind::Choice => match field {
            FieldId::Gender => form.gender().map(|g| g.label().to_string()),
            FieldId::PhysicalActivity => form.physical_activity().map(|a| a.label().to_string()),
            _ => None,
        },
        FieldKind::Toggle => form
            .flag(field)
            .map(|v| if v { "Yes" } else { "No" }.to_string()),
    }
}

/// Everything the form screen needs from the application state.
pub struct FormView<'a> {
    pub step: Step,
    pub form: &'a FormData,
    pub selected: usize,
    pub error: Option<&'a str>,
    pub submitting: bool,
    pub can_advance: bool,
}

/// Render one wizard step.
pub fn render_form(f: &mut Frame, area: Rect, view: &FormView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], view.step);
    render_form_fields(f, chunks[1], view);
    render_form_footer(f, chunks[2], view);
}

fn render_form_header(f: &mut Frame, area: Rect, step: Step) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("CVD Risk Assessment", MedicalTheme::title()),
        Span::styled(
            format!(" │ Step {} of 4 · {}", step.number(), step.title()),
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

fn render_form_fields(f: &mut Frame, area: Rect, view: &FormView) {
    let fields = view.step.fields();

    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (i, &field) in fields.iter().enumerate() {
        let is_selected = i == view.selected;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field_label(field)), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match field_value(view.form, field) {
            Some(value) => Span::styled(value, MedicalTheme::text()),
            None => Span::styled(field_hint(field), MedicalTheme::text_muted()),
        };

        let cursor = if is_selected && field_kind(field) == FieldKind::Numeric {
            Span::styled("▌", MedicalTheme::focused())
        } else {
            Span::raw("")
        };

        let content =
            Paragraph::new(Line::from(vec![Span::raw(" "), value_display, cursor])).block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, view: &FormView) {
    let content = if let Some(err) = view.error {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.to_string(), MedicalTheme::danger()),
        ])
    } else if view.submitting {
        Line::from(vec![Span::styled(
            "Submitting assessment...",
            MedicalTheme::info(),
        )])
    } else {
        let mut spans = vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Space/←→] ", MedicalTheme::key_hint()),
            Span::styled("Change ", MedicalTheme::key_desc()),
        ];

        let (action_key, action) = if view.step == Step::History {
            ("[Enter] ", "Submit ")
        } else {
            ("[Enter] ", "Next ")
        };
        let action_style = if view.can_advance {
            MedicalTheme::key_desc()
        } else {
            MedicalTheme::text_muted()
        };
        spans.push(Span::styled(action_key, MedicalTheme::key_hint()));
        spans.push(Span::styled(action, action_style));

        if view.step != Step::Demographics {
            spans.push(Span::styled("[Esc] ", MedicalTheme::key_hint()));
            spans.push(Span::styled("Back ", MedicalTheme::key_desc()));
        }
        spans.push(Span::styled("[S] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Sample Data", MedicalTheme::key_desc()));

        Line::from(spans)
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
