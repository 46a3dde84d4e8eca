//! UI layer: app shell, onboarding modal, theme, and per-route views.

pub mod app;
pub mod onboarding;
pub mod theme;
pub mod views;

pub use app::DashboardApp;
