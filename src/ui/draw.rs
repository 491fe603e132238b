use ratatui::Frame;

use exam_score_predictor::session::{Feedback, Session};

use super::theme::Theme;
use super::{layout, widgets};

/// Draws the entire UI.
pub fn draw(f: &mut Frame, session: &Session) {
    let (header_area, body_area, footer_area) = layout::vertical(f.size());

    f.render_widget(widgets::header(), header_area);
    f.render_widget(widgets::footer(), footer_area);

    if let Some(err) = session.model_status().error_message() {
        f.render_widget(widgets::message("Error", err, Theme::error()), body_area);
        return;
    }

    let (form_area, result_area) = layout::body(body_area);
    f.render_widget(widgets::form(session.form()), form_area);

    match session.feedback() {
        Some(Feedback::Prediction(view)) => {
            let (metric_area, gauge_area, params_area) = layout::result(result_area);
            f.render_widget(widgets::metric(view), metric_area);
            f.render_widget(widgets::gauge(view), gauge_area);
            f.render_widget(widgets::params(view), params_area);
        }
        Some(Feedback::Failed(msg)) => {
            f.render_widget(
                widgets::message("Result", msg.clone(), Theme::error()),
                result_area,
            );
        }
        None => {
            f.render_widget(
                widgets::message("Result", "Press Enter to predict.".into(), Theme::dim()),
                result_area,
            );
        }
    }
}
