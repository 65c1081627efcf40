use std::fs::File;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};

use eframe::egui;
use bl_core::{banner, Event, KeyMap, SessionLoop, ThreadTimer, ViewConfig};
use bl_ui::{default_key_map, scroll_events, EguiSurface};

enum Screen {
    Viewing {
        session: SessionLoop<File, ThreadTimer>,
        ticks: Receiver<Event>,
        keys: KeyMap<egui::Key>,
        surface: EguiSurface,
    },
    /// The file could not be opened; Enter closes the window.
    OpenFailed { lines: Vec<String> },
}

pub struct BitlensApp {
    screen: Screen,
    font_size: f32,
}

impl BitlensApp {
    /// Open `path` and start the repeat timer. An unopenable file gives the failure screen.
    pub fn new(ctx: &egui::Context, path: &Path, config: &ViewConfig) -> std::io::Result<Self> {
        let (tx, ticks) = mpsc::channel();
        let wake_ctx = ctx.clone();
        let timer = ThreadTimer::spawn(tx, move || wake_ctx.request_repaint())?;

        let screen = match SessionLoop::open(path, config, timer) {
            Ok(session) => {
                log::info!("session started for {}", path.display());
                Screen::Viewing {
                    session,
                    ticks,
                    keys: default_key_map(),
                    surface: EguiSurface::new(
                        config.window.width as usize,
                        config.window.height as usize,
                        config.font_size as f32,
                    ),
                }
            }
            Err(e) => {
                log::error!("{}", e);
                Screen::OpenFailed {
                    lines: vec![banner(), e.to_string(), "Hit ENTER to continue . . .".to_owned()],
                }
            }
        };

        Ok(Self { screen, font_size: config.font_size as f32 })
    }
}

impl eframe::App for BitlensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let panel = egui::CentralPanel::default().frame(egui::Frame::none().fill(egui::Color32::BLACK));

        match &mut self.screen {
            Screen::Viewing { session, ticks, keys, surface } => {
                for event in ctx.input(|i| scroll_events(&i.events, keys)) {
                    session.handle_event(event);
                }
                session.pump(ticks);
                session.render_if_dirty(surface);

                panel.show(ctx, |ui| surface.show(ui));
            }
            Screen::OpenFailed { lines } => {
                if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                let font_size = self.font_size;
                panel.show(ctx, |ui| EguiSurface::show_message(ui, lines, font_size));
            }
        }
    }
}
