//! Scripted `Ui` for driving editor frames in tests.
//!
//! One character is one unit wide and one line is one unit tall. Input is set
//! directly on the public fields; draw calls are recorded for inspection.

use lunar_clipboard::MemoryClipboard;
use lunar_core::{Color, Key, ManualClock, Modifiers, MouseButton, Ui, Vec2};

use crate::TextEditor;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Draw {
    RectFilled { min: Vec2, max: Vec2, color: Color },
    Rect { min: Vec2, max: Vec2, color: Color },
    Text { pos: Vec2, color: Color, text: String },
}

pub(crate) struct FakeUi {
    pub focused: bool,
    pub hovered: bool,
    pub modifiers: Modifiers,
    pub pressed: Vec<Key>,
    pub chars: Vec<char>,
    pub mouse_pos: Vec2,
    pub clicked: bool,
    pub down: bool,
    pub dragging: bool,
    pub scroll: Vec2,
    pub size: Vec2,
    pub draws: Vec<Draw>,
    pub tooltips: Vec<Vec<(Color, String)>>,
    pub dummy_size: Option<Vec2>,
    pub child_depth: i32,
}

impl FakeUi {
    pub fn new() -> Self {
        Self {
            focused: true,
            hovered: true,
            modifiers: Modifiers::NONE,
            pressed: Vec::new(),
            chars: Vec::new(),
            mouse_pos: Vec2::ZERO,
            clicked: false,
            down: false,
            dragging: false,
            scroll: Vec2::ZERO,
            size: Vec2::new(80.0, 24.0),
            draws: Vec::new(),
            tooltips: Vec::new(),
            dummy_size: None,
            child_depth: 0,
        }
    }

    /// Forget the previous frame's output.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
        self.tooltips.clear();
        self.dummy_size = None;
    }

    pub fn texts_with_color(&self, color: Color) -> Vec<String> {
        self.draws
            .iter()
            .filter_map(|d| match d {
                Draw::Text { color: c, text, .. } if *c == color => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Position and color of the first text draw equal to `text`.
    pub fn text_draw(&self, text: &str) -> Option<(Vec2, Color)> {
        self.draws.iter().find_map(|d| match d {
            Draw::Text { pos, color, text: t } if t == text => Some((*pos, *color)),
            _ => None,
        })
    }

    pub fn filled_rects_with_color(&self, color: Color) -> Vec<(Vec2, Vec2)> {
        self.draws
            .iter()
            .filter_map(|d| match d {
                Draw::RectFilled { min, max, color: c } if *c == color => Some((*min, *max)),
                _ => None,
            })
            .collect()
    }
}

impl Ui for FakeUi {
    fn calc_text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32, 1.0)
    }

    fn text_line_height_with_spacing(&self) -> f32 {
        1.0
    }

    fn content_region_avail(&self) -> Vec2 {
        self.size
    }

    fn begin_child(&mut self, _id: &str, _size: Vec2, _border: bool, _background: Color) {
        self.child_depth += 1;
    }

    fn end_child(&mut self) {
        self.child_depth -= 1;
    }

    fn cursor_screen_pos(&self) -> Vec2 {
        Vec2::new(-self.scroll.x, -self.scroll.y)
    }

    fn content_region_max(&self) -> Vec2 {
        self.size
    }

    fn window_size(&self) -> Vec2 {
        self.size
    }

    fn dummy(&mut self, size: Vec2) {
        self.dummy_size = Some(size);
    }

    fn scroll_x(&self) -> f32 {
        self.scroll.x
    }

    fn scroll_y(&self) -> f32 {
        self.scroll.y
    }

    fn set_scroll_x(&mut self, x: f32) {
        self.scroll.x = x;
    }

    fn set_scroll_y(&mut self, y: f32) {
        self.scroll.y = y;
    }

    fn is_window_focused(&self) -> bool {
        self.focused
    }

    fn is_window_hovered(&self) -> bool {
        self.hovered
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn take_input_characters(&mut self) -> Vec<char> {
        std::mem::take(&mut self.chars)
    }

    fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    fn is_mouse_clicked(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.clicked
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.down
    }

    fn is_mouse_dragging(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.dragging
    }

    fn is_mouse_hovering_rect(&self, min: Vec2, max: Vec2) -> bool {
        let p = self.mouse_pos;
        p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
    }

    fn double_click_time_ms(&self) -> u64 {
        500
    }

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.draws.push(Draw::RectFilled { min, max, color });
    }

    fn add_rect(&mut self, min: Vec2, max: Vec2, color: Color, _thickness: f32) {
        self.draws.push(Draw::Rect { min, max, color });
    }

    fn add_text(&mut self, pos: Vec2, color: Color, text: &str) {
        self.draws.push(Draw::Text {
            pos,
            color,
            text: text.to_string(),
        });
    }

    fn tooltip(&mut self, sections: &[(Color, String)]) {
        self.tooltips.push(sections.to_vec());
    }
}

pub(crate) fn editor_with(
    text: &str,
    clock: ManualClock,
    clipboard: MemoryClipboard,
) -> TextEditor {
    let mut editor = TextEditor::new(Box::new(clock), Box::new(clipboard));
    editor.set_text(text);
    editor
}

pub(crate) fn editor(text: &str) -> TextEditor {
    editor_with(text, ManualClock::new(0), MemoryClipboard::new())
}

pub(crate) fn editor_with_clipboard(text: &str, clipboard: MemoryClipboard) -> TextEditor {
    editor_with(text, ManualClock::new(0), clipboard)
}

pub(crate) fn editor_with_clock(text: &str, clock: ManualClock) -> TextEditor {
    editor_with(text, clock, MemoryClipboard::new())
}
