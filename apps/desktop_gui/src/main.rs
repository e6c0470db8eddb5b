use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{config::load_settings, ConverterClient, UiController};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::runtime::BackendRuntime,
    controller::events::{GuiRegionSink, UiEvent},
    ui::ConverterApp,
};

const UI_EVENT_QUEUE_CAPACITY: usize = 256;

#[derive(Parser, Debug)]
struct Args {
    /// Base address of the conversion service.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = ConverterClient::new(settings.server_url.clone())
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let backend = BackendRuntime::start()?;
    let (ui_tx, ui_rx) = bounded::<UiEvent>(UI_EVENT_QUEUE_CAPACITY);
    tracing::info!(server_url = client.server_url(), "starting desktop converter");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Measurement Converter")
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };
    let server_url = client.server_url().to_string();
    eframe::run_native(
        "Measurement Converter",
        options,
        Box::new(move |cc| {
            let sink = GuiRegionSink::new(ui_tx, cc.egui_ctx.clone());
            let controller =
                UiController::new(Arc::new(client), Arc::new(sink), backend.handle());
            Ok(Box::new(ConverterApp::new(controller, ui_rx, server_url, backend)))
        }),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
