//! Simple Writer: an on-screen-keyboard editor that reads aloud as you type.
//!
//! | Module       | Role                                                  |
//! |--------------|-------------------------------------------------------|
//! | [`text`]     | normalisation and word / sentence boundaries          |
//! | [`speech`]   | dispatcher, engine trait, system TTS process engine   |
//! | [`editor`]   | document model and the read-only [`editor::EditorPort`] |
//! | [`autoread`] | SPACE / PERIOD / RETURN trigger engine                |
//! | [`keyboard`] | keys, modifiers, layouts                              |
//! | [`config`]   | settings file and platform paths                      |
//! | [`store`]    | saved documents and `.txt` import / export            |
//! | [`app`]      | [`app::WriterSession`], the object a front end drives |
//! | [`workspace`] | session plus its document store and settings file    |
//! | [`ui`]       | egui window with the on-screen keyboard               |

pub mod app;
pub mod autoread;
pub mod config;
pub mod editor;
pub mod keyboard;
pub mod speech;
pub mod store;
pub mod text;
pub mod ui;
pub mod workspace;
