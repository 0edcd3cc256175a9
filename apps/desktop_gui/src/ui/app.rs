use std::time::Duration;

use client_core::{
    render::{outcome_lines, LOADING_LABEL, RESULT_HEADING},
    FormField, PredictionFormController, MIN_YEAR,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ModelName;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::submit_form};

const ABOUT_TEXT: &str = "Predicts urban air quality for a chosen day using deep learning \
models trained on pollutant and weather data from South Tangerang. Pick a date and one of \
the trained models (CNN, RNN, GRU, LSTM, ResNet or ReXNet, each also with an attention \
variant) to see the predicted PM2.5, PM10, SO2, CO, O3 and NO2 levels.";

const SELECT_MODEL_LABEL: &str = "Select Model";
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(198, 40, 40);

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: PredictionFormController,
    status: String,
}

impl PredictorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: PredictionFormController::new(),
            status: "Backend worker starting...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::PredictionSettled(outcome) => {
                    self.controller.settle(outcome);
                }
                UiEvent::BackendFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
            }
        }
    }

    fn show_about(&self, ui: &mut egui::Ui) {
        ui.heading("About This Project");
        ui.add_space(6.0);
        ui.label(ABOUT_TEXT);
    }

    fn show_date_input(&mut self, ui: &mut egui::Ui, field: FormField, hint: &str) {
        let mut value = self.controller.form().get(field).to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(hint)
                .desired_width(220.0),
        );
        // Numeric widget: edits that introduce anything but digits are dropped.
        if response.changed() && field.accepts(&value) {
            self.controller.update_field(field, value);
        }
    }

    fn show_model_select(&mut self, ui: &mut egui::Ui) {
        let selected = self.controller.form().selected_model();
        let mut choice = selected;
        egui::ComboBox::from_id_salt("model_select")
            .selected_text(selected.map_or(SELECT_MODEL_LABEL, ModelName::as_str))
            .width(220.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice, None, SELECT_MODEL_LABEL);
                for model in ModelName::ALL {
                    ui.selectable_value(&mut choice, Some(model), model.as_str());
                }
            });
        if choice != selected {
            self.controller
                .update_field(FormField::Model, choice.map_or("", ModelName::as_str));
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Air Quality Predictor 🌏");
        ui.add_space(10.0);

        self.show_date_input(ui, FormField::Year, "Year");
        self.show_date_input(ui, FormField::Month, "Month");
        self.show_date_input(ui, FormField::Day, "Day");
        self.show_model_select(ui);
        ui.add_space(8.0);

        let label = if self.controller.status().is_loading() {
            LOADING_LABEL
        } else {
            "Predict"
        };
        let ready = self.controller.form().date_widgets_complete();
        let clicked = ui
            .add_enabled(ready, egui::Button::new(label))
            .on_disabled_hover_text(format!(
                "Fill in year ({MIN_YEAR} or later), month and day"
            ))
            .clicked();
        if clicked {
            submit_form(&self.cmd_tx, &mut self.controller);
        }
    }

    fn show_outcome(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = self.controller.status().failure_message() {
            ui.add_space(8.0);
            ui.colored_label(ERROR_COLOR, message);
        }

        let mut reset_requested = false;
        if let Some(result) = self.controller.status().result() {
            ui.separator();
            ui.heading(RESULT_HEADING);
            egui::ScrollArea::vertical()
                .max_height(280.0)
                .show(ui, |ui| {
                    for (model, outcome) in result.iter() {
                        ui.add_space(6.0);
                        ui.strong(model);
                        for line in outcome_lines(outcome) {
                            ui.label(line);
                        }
                    }
                });
            ui.add_space(8.0);
            reset_requested = ui.button("Reset").clicked();
        }
        if reset_requested {
            self.controller.reset();
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(&self.status);
        });
        egui::SidePanel::left("about_panel")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| self.show_about(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_form(ui);
            self.show_outcome(ui);
        });

        if self.controller.status().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
