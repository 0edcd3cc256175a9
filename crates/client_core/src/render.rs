//! Plain-text rendering of the form status.

use shared::protocol::{ModelOutcome, PredictionResult};

use crate::controller::UiStatus;

pub const RESULT_HEADING: &str = "Prediction Result";
pub const LOADING_LABEL: &str = "Loading...";

/// Lines shown under a model's heading.
pub fn outcome_lines(outcome: &ModelOutcome) -> Vec<String> {
    match outcome {
        ModelOutcome::Failed { error } => vec![error.clone()],
        ModelOutcome::Predicted { date, prediction } => {
            let mut lines = Vec::with_capacity(7);
            lines.push(format!("Prediction Date: {date}"));
            lines.extend(
                prediction
                    .iter()
                    .map(|(pollutant, value)| format!("{pollutant}: {value}")),
            );
            lines
        }
    }
}

pub fn render_result(result: &PredictionResult) -> String {
    let mut out = String::from(RESULT_HEADING);
    for (model, outcome) in result.iter() {
        out.push_str("\n\n");
        out.push_str(model);
        for line in outcome_lines(outcome) {
            out.push_str("\n  ");
            out.push_str(&line);
        }
    }
    out
}

pub fn render_status(status: &UiStatus) -> String {
    match status {
        UiStatus::Idle => String::new(),
        UiStatus::Loading => LOADING_LABEL.to_string(),
        UiStatus::Success(result) => render_result(result),
        UiStatus::Failure(message) => message.clone(),
    }
}
