//! Immediate-mode drawing and input capability.
//!
//! A host implements [`Ui`] once per frame and hands it to panels. The trait
//! mirrors what an immediate-mode GUI exposes: a scrollable child region,
//! per-frame input queries and a handful of draw primitives. Coordinates are
//! in screen space; inside a child region the content origin already has the
//! scroll offset applied.

use crate::{Color, Key, Modifiers, MouseButton, Vec2};

pub trait Ui {
    // Text metrics

    /// Size of `text` rendered in the current font.
    fn calc_text_size(&self, text: &str) -> Vec2;

    /// Height of one text line including the font's line gap.
    fn text_line_height_with_spacing(&self) -> f32;

    // Layout

    /// Size still available in the current region.
    fn content_region_avail(&self) -> Vec2;

    /// Open a scrollable child region. A zero size component fills the
    /// available space along that axis.
    fn begin_child(&mut self, id: &str, size: Vec2, border: bool, background: Color);

    fn end_child(&mut self);

    /// Screen position of the current region's content origin (scroll applied).
    fn cursor_screen_pos(&self) -> Vec2;

    /// Bottom-right corner of the region, in region-local coordinates.
    fn content_region_max(&self) -> Vec2;

    /// Visible size of the current region.
    fn window_size(&self) -> Vec2;

    /// Report the total content size so the host can scroll it.
    fn dummy(&mut self, size: Vec2);

    fn scroll_x(&self) -> f32;
    fn scroll_y(&self) -> f32;
    fn set_scroll_x(&mut self, x: f32);
    fn set_scroll_y(&mut self, y: f32);

    fn is_window_focused(&self) -> bool;
    fn is_window_hovered(&self) -> bool;

    // Keyboard

    fn modifiers(&self) -> Modifiers;

    /// Key went down this frame (including auto-repeat).
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Drain the characters typed this frame.
    fn take_input_characters(&mut self) -> Vec<char>;

    // Mouse

    fn mouse_pos(&self) -> Vec2;
    fn is_mouse_clicked(&self, button: MouseButton) -> bool;
    fn is_mouse_down(&self, button: MouseButton) -> bool;
    fn is_mouse_dragging(&self, button: MouseButton) -> bool;
    fn is_mouse_hovering_rect(&self, min: Vec2, max: Vec2) -> bool;

    /// Maximum delay between clicks that still counts as a multi-click.
    fn double_click_time_ms(&self) -> u64;

    // Drawing

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: Color);
    fn add_rect(&mut self, min: Vec2, max: Vec2, color: Color, thickness: f32);
    fn add_text(&mut self, pos: Vec2, color: Color, text: &str);

    /// Show a tooltip near the mouse. Sections are separated by a rule.
    fn tooltip(&mut self, sections: &[(Color, String)]);
}
