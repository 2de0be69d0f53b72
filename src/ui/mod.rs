//! Simple Writer window: egui/eframe front end for a [`Workspace`].
//!
//! # Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┬──────────────┐
//! │ toolbar: Read  Stop  New  [x] Auto-read  ...  │              │
//! ├───────────────────────────────────────────────┤  Files /     │
//! │                                               │  Settings    │
//! │   document (caret and selection drawn)        │  side panel  │
//! │                                               │              │
//! ├───────────────────────────────────────────────┴──────────────┤
//! │ on-screen keyboard (rows of the configured layout)           │
//! ├──────────────────────────────────────────────────────────────┤
//! │ status line                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! On-screen key clicks and the physical keyboard both end up in
//! [`WriterSession::press`](crate::app::WriterSession::press), so auto-read
//! behaves the same whichever is used.  Physical keys are only taken while
//! no text field has focus.

pub mod keys;

use std::path::Path;

use eframe::egui;

use crate::config::{KeyboardConfig, KeyboardLayout};
use crate::keyboard::{rows, Key};
use crate::workspace::Workspace;

use keys::{is_latched, key_fill, key_label, key_width, KEY_HEIGHT};

const DOCUMENT_FONT_SIZE: f32 = 24.0;

// ---------------------------------------------------------------------------
// Physical keys
// ---------------------------------------------------------------------------

/// What a physical key does to the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Same as clicking the on-screen key.
    Press(Key),
    /// Arrow key; `extend` when Shift is held.
    Move { forward: bool, extend: bool },
}

/// Map a physical key event to an action.  Printable characters arrive
/// separately as text events and are not handled here.
pub fn key_action(key: egui::Key, modifiers: egui::Modifiers) -> Option<KeyAction> {
    let action = match key {
        egui::Key::Enter => KeyAction::Press(Key::Return),
        egui::Key::Backspace => KeyAction::Press(Key::Delete),
        egui::Key::Tab => KeyAction::Press(Key::Tab),
        egui::Key::ArrowLeft => KeyAction::Move {
            forward: false,
            extend: modifiers.shift,
        },
        egui::Key::ArrowRight => KeyAction::Move {
            forward: true,
            extend: modifiers.shift,
        },
        _ => return None,
    };
    Some(action)
}

pub fn layout_label(layout: KeyboardLayout) -> &'static str {
    match layout {
        KeyboardLayout::Basic => "Basic",
        KeyboardLayout::WithNumbers => "With numbers",
        KeyboardLayout::None => "Hidden",
    }
}

// ---------------------------------------------------------------------------
// WriterApp
// ---------------------------------------------------------------------------

/// Which side panel is open.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SidePanel {
    Closed,
    Files,
    Settings,
}

/// eframe application: the editor window.
pub struct WriterApp {
    workspace: Workspace,
    /// Program (or "silent") speaking for this run, shown on the status line.
    engine_name: String,

    // ── UI state ─────────────────────────────────────────────────────────
    side_panel: SidePanel,
    /// Name used by Save and Rename.
    document_name: String,
    /// `.txt` path for import / export.
    txt_path: String,
    /// `.json` path for settings export / import.
    settings_path: String,
    voice_input: String,
    /// Last outcome shown on the status line; `true` for errors.
    status: Option<(String, bool)>,
}

impl WriterApp {
    pub fn new(workspace: Workspace, engine_name: impl Into<String>) -> Self {
        let voice_input = workspace
            .session()
            .config()
            .speech
            .voice
            .clone()
            .unwrap_or_default();
        Self {
            workspace,
            engine_name: engine_name.into(),
            side_panel: SidePanel::Closed,
            document_name: String::new(),
            txt_path: String::new(),
            settings_path: String::new(),
            voice_input,
            status: None,
        }
    }

    // ── Status ───────────────────────────────────────────────────────────

    fn report<T, E: std::fmt::Display>(&mut self, result: Result<T, E>, done: &str) {
        self.status = Some(match result {
            Ok(_) => (done.to_string(), false),
            Err(e) => {
                log::warn!("{e:#}");
                (format!("{e:#}"), true)
            }
        });
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.workspace.save_settings() {
            log::warn!("Failed to save settings: {e:#}");
            self.status = Some((format!("settings not saved: {e:#}"), true));
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Feed physical keyboard input to the session.
    fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let events = ctx.input(|i| i.events.clone());
        let session = self.workspace.session_mut();
        for event in events {
            match event {
                egui::Event::Text(text) | egui::Event::Paste(text) => session.type_text(&text),
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => match key_action(key, modifiers) {
                    Some(KeyAction::Press(key)) => session.press(key),
                    Some(KeyAction::Move { forward, extend }) => {
                        session.document_mut().move_caret(forward, extend)
                    }
                    None => {}
                },
                _ => {}
            }
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Read").clicked() {
                self.workspace.session().read_aloud();
            }
            if ui.button("Stop").clicked() {
                self.workspace.session().stop_speech();
            }
            if ui.button("New").clicked() {
                self.workspace.new_document();
                self.document_name.clear();
            }

            let mut auto_read = self.workspace.session().is_auto_read_enabled();
            if ui.checkbox(&mut auto_read, "Auto-read").changed() {
                self.workspace.session_mut().set_auto_read_enabled(auto_read);
                self.persist_settings();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for (panel, label) in [(SidePanel::Settings, "Settings"), (SidePanel::Files, "Files")] {
                    if ui.selectable_label(self.side_panel == panel, label).clicked() {
                        self.side_panel = if self.side_panel == panel {
                            SidePanel::Closed
                        } else {
                            panel
                        };
                    }
                }
            });
        });
    }

    /// Render the document with its selection highlighted, or a caret bar
    /// when nothing is selected.
    fn draw_document(&self, ui: &mut egui::Ui) {
        let (before, selected, after) = self.workspace.session().document().split_at_selection();

        let font_id = egui::FontId::proportional(DOCUMENT_FONT_SIZE);
        let plain = egui::TextFormat {
            font_id: font_id.clone(),
            color: egui::Color32::from_rgb(30, 30, 35),
            ..Default::default()
        };
        let highlighted = egui::TextFormat {
            background: egui::Color32::from_rgb(180, 210, 250),
            ..plain.clone()
        };
        let caret = egui::TextFormat {
            font_id,
            color: egui::Color32::from_rgb(70, 150, 240),
            ..Default::default()
        };

        let mut job = egui::text::LayoutJob::default();
        job.append(before, 0.0, plain.clone());
        if selected.is_empty() {
            job.append("|", 0.0, caret);
        } else {
            job.append(selected, 0.0, highlighted);
        }
        job.append(after, 0.0, plain);
        job.wrap.max_width = ui.available_width();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.label(job);
            });
    }

    /// Draw the on-screen keyboard and press whichever key was clicked.
    fn draw_keyboard(&mut self, ui: &mut egui::Ui) {
        let session = self.workspace.session();
        let KeyboardConfig {
            layout,
            color_coding,
        } = session.config().keyboard;
        let state = *session.keyboard();

        let mut clicked = None;
        ui.add_space(6.0);
        for row in rows(layout) {
            ui.horizontal(|ui| {
                for key in row {
                    let text_color = if is_latched(&key, &state) {
                        egui::Color32::WHITE
                    } else {
                        egui::Color32::from_rgb(50, 50, 60)
                    };
                    let button = egui::Button::new(
                        egui::RichText::new(key_label(&key, &state))
                            .color(text_color)
                            .size(20.0),
                    )
                    .fill(key_fill(&key, &state, color_coding))
                    .min_size(egui::vec2(key_width(&key), KEY_HEIGHT));
                    if ui.add(button).clicked() {
                        clicked = Some(key);
                    }
                }
            });
        }
        ui.add_space(6.0);

        if let Some(key) = clicked {
            self.workspace.session_mut().press(key);
        }
    }

    fn draw_files(&mut self, ui: &mut egui::Ui) {
        ui.heading("Files");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.document_name);
            if ui.button("Save").clicked() {
                let name = self.document_name.trim().to_string();
                let name = if name.is_empty() { "Untitled" } else { name.as_str() };
                let result = self.workspace.save(name);
                self.report(result, "saved");
            }
        });

        ui.separator();
        let current = self.workspace.current_id().map(String::from);
        egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
            for meta in self.workspace.documents() {
                ui.horizontal(|ui| {
                    let is_current = current.as_deref() == Some(meta.id.as_str());
                    ui.label(egui::RichText::new(&meta.name).strong().color(if is_current {
                        egui::Color32::from_rgb(70, 150, 240)
                    } else {
                        egui::Color32::from_rgb(60, 60, 70)
                    }));
                    if ui.small_button("Open").clicked() {
                        let result = self.workspace.open_document(&meta.id);
                        if result.is_ok() {
                            self.document_name = meta.name.clone();
                            self.voice_input = self
                                .workspace
                                .session()
                                .config()
                                .speech
                                .voice
                                .clone()
                                .unwrap_or_default();
                        }
                        self.report(result, "opened");
                    }
                    if ui.small_button("Rename").clicked() {
                        let result = self.workspace.rename(&meta.id, self.document_name.trim());
                        self.report(result, "renamed");
                    }
                    if ui.small_button("Delete").clicked() {
                        let result = self.workspace.delete(&meta.id);
                        self.report(result, "deleted");
                    }
                });
            }
        });

        ui.separator();
        ui.label("Text file");
        ui.text_edit_singleline(&mut self.txt_path);
        ui.horizontal(|ui| {
            let path = self.txt_path.trim().to_string();
            if ui.button("Import .txt").clicked() {
                let result = self.workspace.import_txt(Path::new(&path));
                self.report(result, "imported");
            }
            if ui.button("Export .txt").clicked() {
                let result = self.workspace.export_txt(Path::new(&path));
                self.report(result, "exported");
            }
        });
    }

    fn draw_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");

        ui.label("Voice (empty for the default)");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.voice_input);
            if ui.button("Apply").clicked() {
                let voice = Some(self.voice_input.trim().to_string());
                self.workspace.session_mut().set_voice(voice);
                self.persist_settings();
            }
        });

        let mut rate = self.workspace.session().config().speech.rate;
        if ui
            .add(egui::Slider::new(&mut rate, 0.5..=2.0).text("Rate"))
            .changed()
        {
            self.workspace.session_mut().set_rate(rate);
            self.persist_settings();
        }

        ui.separator();
        let mut keyboard = self.workspace.session().config().keyboard.clone();
        egui::ComboBox::from_label("Keyboard")
            .selected_text(layout_label(keyboard.layout))
            .show_ui(ui, |ui| {
                for layout in [
                    KeyboardLayout::Basic,
                    KeyboardLayout::WithNumbers,
                    KeyboardLayout::None,
                ] {
                    ui.selectable_value(&mut keyboard.layout, layout, layout_label(layout));
                }
            });
        ui.checkbox(&mut keyboard.color_coding, "Colour-coded keys");
        if keyboard != self.workspace.session().config().keyboard {
            self.workspace.session_mut().set_keyboard_config(keyboard);
            self.persist_settings();
        }

        ui.separator();
        ui.label("Settings file (.json)");
        ui.text_edit_singleline(&mut self.settings_path);
        ui.horizontal(|ui| {
            let path = self.settings_path.trim().to_string();
            if ui.button("Export").clicked() {
                let result = self.workspace.export_settings(Path::new(&path));
                self.report(result, "settings exported");
            }
            if ui.button("Import").clicked() {
                let result = self.workspace.import_settings(Path::new(&path));
                self.report(result, "settings imported");
                self.sync_voice_input();
            }
        });

        ui.separator();
        if ui.button("Reset to defaults").clicked() {
            let result = self.workspace.reset_settings();
            self.report(result, "settings reset");
            self.sync_voice_input();
        }
    }

    fn sync_voice_input(&mut self) {
        self.voice_input = self
            .workspace
            .session()
            .config()
            .speech
            .voice
            .clone()
            .unwrap_or_default();
    }

    fn draw_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("speech: {}", self.engine_name))
                    .color(egui::Color32::from_rgb(120, 120, 120))
                    .size(12.0),
            );
            if let Some((message, is_error)) = &self.status {
                let color = if *is_error {
                    egui::Color32::from_rgb(220, 90, 40)
                } else {
                    egui::Color32::from_rgb(60, 160, 90)
                };
                ui.label(egui::RichText::new(message).color(color).size(12.0));
            }
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for WriterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.draw(ctx);
    }

    /// Save settings and silence speech before the window goes away.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.workspace.save_settings() {
            log::warn!("Failed to save settings: {e:#}");
        }
        self.workspace.session().stop_speech();
        log::info!("Simple Writer closing");
    }
}

impl WriterApp {
    /// Lay out every panel for one frame.
    fn draw(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_toolbar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.draw_status(ui));

        if self.workspace.session().config().keyboard.layout != KeyboardLayout::None {
            egui::TopBottomPanel::bottom("keyboard").show(ctx, |ui| self.draw_keyboard(ui));
        }

        match self.side_panel {
            SidePanel::Closed => {}
            SidePanel::Files => {
                egui::SidePanel::right("files")
                    .min_width(260.0)
                    .show(ctx, |ui| self.draw_files(ui));
            }
            SidePanel::Settings => {
                egui::SidePanel::right("settings")
                    .min_width(260.0)
                    .show(ctx, |ui| self.draw_settings(ui));
            }
        }

        let frame = egui::Frame::new()
            .fill(egui::Color32::from_rgb(252, 252, 250))
            .inner_margin(egui::Margin::same(16));
        egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| self.draw_document(ui));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
