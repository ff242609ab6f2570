//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::RiskAssessment;
use crate::tui::styles::MedicalTheme;

/// Render the scored assessment.
pub fn render_results(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_results_header(f, chunks[0]);
    render_results_content(f, chunks[1], assessment);
    render_results_footer(f, chunks[2]);
}

fn render_results_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment Results", MedicalTheme::title()),
        Span::styled(" │ 10-Year CVD Risk Estimate", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_results_content(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let block = Block::default()
        .title(Span::styled(" Your Risk Score ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Band
            Constraint::Length(4), // Percentage gauge
            Constraint::Min(0),    // Recommendations
        ])
        .margin(1)
        .split(inner);

    let band_style = MedicalTheme::risk_band(assessment.risk_level);

    let band_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(
                "{} {} ({})",
                assessment.risk_level.icon(),
                assessment.risk_category,
                assessment.risk_level.band_label()
            ),
            band_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            assessment.risk_level.description(),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(band_display, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " 10-Year Risk ",
                    MedicalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(band_style)
        .percent(gauge_percent(assessment.risk_percentage))
        .label(percent_label(assessment.risk_percentage));
    f.render_widget(gauge, chunks[1]);

    render_recommendations(f, chunks[2], &assessment.recommendations);
}

fn render_recommendations(f: &mut Frame, area: Rect, recommendations: &[String]) {
    // Order is the service's ranking; render as received.
    let mut lines = vec![Line::from(Span::styled(
        "Recommendations",
        MedicalTheme::subtitle(),
    ))];
    for item in recommendations {
        lines.push(Line::from(vec![
            Span::styled(" • ", MedicalTheme::text_secondary()),
            Span::styled(item.clone(), MedicalTheme::text()),
        ]));
    }

    let list = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(list, area);
}

fn render_results_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[N] ", MedicalTheme::key_hint()),
        Span::styled("New Assessment ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

/// Gauge position, clamped to the widget's 0-100 range.
fn gauge_percent(risk_percentage: f64) -> u16 {
    risk_percentage.clamp(0.0, 100.0).round() as u16
}

/// Risk percentage as displayed, one decimal place.
pub(crate) fn percent_label(risk_percentage: f64) -> String {
    format!("{risk_percentage:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_label_one_decimal() {
        assert_eq!(percent_label(8.2), "8.2%");
        assert_eq!(percent_label(8.0), "8.0%");
        assert_eq!(percent_label(19.95), "20.0%");
    }

    #[test]
    fn test_gauge_percent_clamped() {
        assert_eq!(gauge_percent(8.2), 8);
        assert_eq!(gauge_percent(-1.0), 0);
        assert_eq!(gauge_percent(250.0), 100);
    }
}
