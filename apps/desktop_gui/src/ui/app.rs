use client_core::{HistoryRegion, ResultRegion, UiController, ViewState};
use crossbeam_channel::Receiver;
use eframe::egui;

use crate::backend_bridge::runtime::BackendRuntime;
use crate::controller::{
    events::UiEvent,
    orchestration::{actions_for, dispatch_ui_actions, FrameClicks},
};

pub struct ConverterApp {
    input: String,
    view: ViewState,
    server_url: String,
    ui_rx: Receiver<UiEvent>,
    controller: UiController,
    // dropped last; shuts down request tasks still in flight
    _backend: BackendRuntime,
}

impl ConverterApp {
    pub fn new(
        controller: UiController,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
        backend: BackendRuntime,
    ) -> Self {
        Self {
            input: String::new(),
            view: ViewState::default(),
            server_url,
            ui_rx,
            controller,
            _backend: backend,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Region(update) => self.view.apply(update),
            }
        }
    }

    fn show_input_row(&mut self, ui: &mut egui::Ui, clicks: &mut FrameClicks) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("Measurement string, e.g. dz_a_aazzaaa")
                    .desired_width(320.0),
            );
            clicks.submit =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            clicks.convert = ui.button("Convert").clicked();
            clicks.clear_result = ui.button("Clear Result").clicked();
        });
    }

    fn show_history_buttons(ui: &mut egui::Ui, clicks: &mut FrameClicks) {
        ui.horizontal(|ui| {
            clicks.show_history = ui.button("Show History").clicked();
            clicks.clear_history = ui.button("Clear History").clicked();
        });
    }
}

fn show_result(ui: &mut egui::Ui, result: &ResultRegion) {
    let error_color = ui.visuals().error_fg_color;
    ui.horizontal_wrapped(|ui| match result {
        ResultRegion::Empty => {}
        ResultRegion::Loading => {
            ui.spinner();
            ui.label(result.text());
        }
        ResultRegion::Success(text) => {
            ui.label(egui::RichText::new(text.as_str()).monospace());
        }
        ResultRegion::Error(text) => {
            ui.colored_label(error_color, text.as_str());
        }
    });
}

fn show_history(ui: &mut egui::Ui, history: &HistoryRegion) {
    let error_color = ui.visuals().error_fg_color;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for line in history.lines() {
                if line.is_error {
                    ui.colored_label(error_color, line.text);
                } else {
                    ui.label(format!("• {}", line.text));
                }
            }
        });
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut clicks = FrameClicks::default();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(format!("Service: {}", self.server_url));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Measurement Converter");
            ui.add_space(8.0);

            self.show_input_row(ui, &mut clicks);
            ui.add_space(4.0);
            show_result(ui, &self.view.result);

            ui.add_space(8.0);
            ui.separator();
            Self::show_history_buttons(ui, &mut clicks);
            show_history(ui, &self.view.history);
        });

        dispatch_ui_actions(&self.controller, actions_for(clicks, &self.input));
    }
}
