//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a bilingual medical-themed interface for:
//! - Child details and symptom entry
//! - Risk level, probability breakdown and guidance
//! - A disclaimer on every screen

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
pub use ui::form::{FormField, FormState};
pub use ui::result::OutputState;
