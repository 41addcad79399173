//! Draw layer ordinals
//!
//! Higher values paint later. Bands are a thousand apart so content can be
//! slotted between the named values.

/// Named layer values
#[derive(Debug, Clone, Copy)]
pub struct LayerConstants;

impl LayerConstants {
    // Backgrounds: 0..1000
    pub const BACKGROUND: i32 = 0;
    pub const BACKGROUND_EFFECT: i32 = 500;

    // Characters: 1000..2000
    pub const CHARACTER_BACK: i32 = 1000;
    pub const CHARACTER_MIDDLE: i32 = 1500;
    pub const CHARACTER_FRONT: i32 = 1900;

    // Dialogue and HUD: 2000..3000
    pub const DIALOGUE_BOX: i32 = 2000;
    pub const DIALOGUE_TEXT: i32 = 2100;
    pub const UI_BACKGROUND: i32 = 2500;
    pub const UI_ELEMENTS: i32 = 2700;
    pub const UI_TEXT: i32 = 2800;

    // Menus: 3000..4000
    pub const MENU_BACKGROUND: i32 = 3000;
    pub const MENU_ELEMENTS: i32 = 3500;
    pub const MENU_TEXT: i32 = 3800;

    pub const TRANSITION_EFFECT: i32 = 4000;
    pub const CURSOR: i32 = 5000;
}
