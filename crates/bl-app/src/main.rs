mod app;
mod cli;

use std::process::ExitCode;

use clap::Parser;
use eframe::egui;

use app::BitlensApp;
use cli::Cli;

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // help and version go to stdout and are not failures
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            let _ = e.print();
            return code;
        }
    };

    let config = match cli.view_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("bitlens: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} - {}", bl_core::APP_NAME, cli.file.display()))
            .with_inner_size([config.window.width as f32, config.window.height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    let result = eframe::run_native(
        bl_core::APP_NAME,
        options,
        Box::new(move |cc| {
            if let Some(font) = &cli.font {
                bl_ui::install_font_file(&cc.egui_ctx, font)?;
            }
            let app = BitlensApp::new(&cc.egui_ctx, &cli.file, &config)?;
            Ok(Box::new(app))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("display surface failed: {}", e);
            eprintln!("bitlens: {}", e);
            ExitCode::FAILURE
        }
    }
}
