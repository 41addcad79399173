//! Cross-module tests driving a whole [`UiManager`](crate::ui::UiManager) frame

mod frame_integration;
