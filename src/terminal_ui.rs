//! `Ui` implementation drawing into a ratatui buffer.
//!
//! One terminal cell is one unit: every character advances by its display
//! width and every line is one row tall. Colors are alpha-blended over the
//! cell background, since cells cannot be layered.

use std::collections::HashMap;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton as CtMouseButton, MouseEvent, MouseEventKind,
};
use lunar_core::{Color, Key, Modifiers, MouseButton, Ui, Vec2};
use ratatui::buffer::Buffer;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color as TermColor, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Rows scrolled per mouse wheel notch.
const WHEEL_STEP: f32 = 3.0;

const TOOLTIP_BACKGROUND: TermColor = TermColor::Rgb(45, 45, 48);

/// Input collected from terminal events for the next frame.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub pressed: Vec<Key>,
    pub chars: Vec<char>,
    pub modifiers: Modifiers,
    pub mouse_pos: Vec2,
    pub clicked: bool,
    pub down: bool,
    pub dragging: bool,
    /// Wheel notches this frame, positive scrolls down / right
    pub wheel: Vec2,
    pub focused: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            pressed: Vec::new(),
            chars: Vec::new(),
            modifiers: Modifiers::NONE,
            mouse_pos: Vec2::ZERO,
            clicked: false,
            down: false,
            dragging: false,
            wheel: Vec2::ZERO,
            focused: true,
        }
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

impl FrameInput {
    pub fn push_key(&mut self, key: KeyEvent) {
        self.modifiers = convert_modifiers(key.modifiers);

        let converted = match key.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => {
                self.modifiers.shift = true;
                Key::Tab
            }
            KeyCode::Esc => Key::Escape,
            KeyCode::Char(c) => {
                // shortcuts are not text
                if !self.modifiers.ctrl && !self.modifiers.alt {
                    self.chars.push(c);
                }
                Key::Char(c.to_ascii_lowercase())
            }
            _ => return,
        };
        self.pressed.push(converted);
    }

    pub fn push_mouse(&mut self, mouse: MouseEvent) {
        self.mouse_pos = Vec2::new(mouse.column as f32, mouse.row as f32);
        self.modifiers = convert_modifiers(mouse.modifiers);

        match mouse.kind {
            MouseEventKind::Down(CtMouseButton::Left) => {
                self.clicked = true;
                self.down = true;
            }
            MouseEventKind::Drag(CtMouseButton::Left) => {
                self.dragging = true;
                self.down = true;
            }
            MouseEventKind::Up(CtMouseButton::Left) => {
                self.down = false;
                self.dragging = false;
            }
            MouseEventKind::ScrollDown => self.wheel.y += 1.0,
            MouseEventKind::ScrollUp => self.wheel.y -= 1.0,
            MouseEventKind::ScrollRight => self.wheel.x += 1.0,
            MouseEventKind::ScrollLeft => self.wheel.x -= 1.0,
            _ => {}
        }
    }

    /// Queue pasted text as typed characters.
    pub fn push_paste(&mut self, text: &str) {
        self.chars.extend(text.chars().filter(|&c| c != '\r'));
    }

    /// Drop per-frame input. Button state and focus persist.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.chars.clear();
        self.clicked = false;
        self.wheel = Vec2::ZERO;
        if !self.down {
            self.dragging = false;
            self.modifiers = Modifiers::NONE;
        }
    }
}

/// Scroll state of a child region, kept between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChildState {
    pub scroll: Vec2,
    /// Content size reported through `dummy`
    pub content: Vec2,
}

impl ChildState {
    fn clamp(&mut self, rect: Rect) {
        let max_x = (self.content.x - rect.width as f32).max(0.0);
        let max_y = (self.content.y - rect.height as f32).max(0.0);
        self.scroll.x = self.scroll.x.clamp(0.0, max_x);
        self.scroll.y = self.scroll.y.clamp(0.0, max_y);
    }
}

struct OpenChild {
    id: String,
    rect: Rect,
    state: ChildState,
    background: Color,
}

/// Cells needed for `len` columns or rows plus a border on both sides.
fn bordered_span(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX).saturating_add(2)
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// One frame of drawing into `buf`.
pub struct TerminalUi<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    input: &'a mut FrameInput,
    children: &'a mut HashMap<String, ChildState>,
    double_click_ms: u64,
    child: Option<OpenChild>,
    tooltip: Option<Vec<(Color, String)>>,
}

impl<'a> TerminalUi<'a> {
    pub fn new(
        buf: &'a mut Buffer,
        area: Rect,
        input: &'a mut FrameInput,
        children: &'a mut HashMap<String, ChildState>,
        double_click_ms: u64,
    ) -> Self {
        Self {
            buf,
            area,
            input,
            children,
            double_click_ms,
            child: None,
            tooltip: None,
        }
    }

    /// Draw the pending tooltip on top of everything.
    pub fn finish(self) {
        let Self {
            buf,
            input,
            tooltip,
            ..
        } = self;
        let Some(sections) = tooltip else {
            return;
        };

        let inner_width = sections
            .iter()
            .map(|(_, text)| text.width())
            .max()
            .unwrap_or(0);
        let mut lines = Vec::new();
        for (i, (color, text)) in sections.iter().enumerate() {
            if i > 0 {
                lines.push(Line::raw("─".repeat(inner_width)));
            }
            lines.push(Line::styled(text.clone(), Style::default().fg(to_term_color(*color))));
        }

        let bounds = buf.area;
        let width = bordered_span(inner_width).min(bounds.width);
        let height = bordered_span(lines.len()).min(bounds.height);
        let x = (input.mouse_pos.x as u16)
            .saturating_add(1)
            .min(bounds.right().saturating_sub(width));
        let y = (input.mouse_pos.y as u16)
            .saturating_add(1)
            .min(bounds.bottom().saturating_sub(height));
        let rect = Rect::new(x, y, width, height);

        Clear.render(rect, buf);
        Paragraph::new(lines)
            .block(Block::bordered())
            .style(Style::default().bg(TOOLTIP_BACKGROUND))
            .render(rect, buf);
    }

    /// Region drawing is clipped to.
    fn clip(&self) -> Rect {
        self.child.as_ref().map_or(self.area, |c| c.rect)
    }

    fn fallback_background(&self) -> Color {
        self.child.as_ref().map_or(Color::BLACK, |c| c.background)
    }

    /// Blend `color` over the background of the cell at `(x, y)`.
    fn blend_cell_bg(&mut self, x: u16, y: u16, color: Color) {
        let fallback = self.fallback_background();
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            let below = match cell.bg {
                TermColor::Rgb(r, g, b) => Color::rgb(r, g, b),
                _ => fallback,
            };
            cell.set_bg(to_term_color(color.blend_over(below)));
        }
    }

    /// Cells covered by `[min, max)`, clipped to the current region.
    fn cell_span(&self, min: Vec2, max: Vec2) -> Option<Rect> {
        let clip = self.clip();
        let x0 = (min.x.floor().max(clip.left() as f32)) as u16;
        let y0 = (min.y.floor().max(clip.top() as f32)) as u16;
        let x1 = (max.x.ceil().min(clip.right() as f32)).max(0.0) as u16;
        let y1 = (max.y.ceil().min(clip.bottom() as f32)).max(0.0) as u16;
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    fn mouse_in(&self, rect: Rect) -> bool {
        let p = self.input.mouse_pos;
        p.x >= rect.left() as f32
            && p.x < rect.right() as f32
            && p.y >= rect.top() as f32
            && p.y < rect.bottom() as f32
    }
}

impl Ui for TerminalUi<'_> {
    fn calc_text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.width() as f32, 1.0)
    }

    fn text_line_height_with_spacing(&self) -> f32 {
        1.0
    }

    fn content_region_avail(&self) -> Vec2 {
        let clip = self.clip();
        Vec2::new(clip.width as f32, clip.height as f32)
    }

    fn begin_child(&mut self, id: &str, size: Vec2, border: bool, background: Color) {
        let avail = self.area;
        let width = if size.x <= 0.0 {
            avail.width
        } else {
            (size.x as u16).min(avail.width)
        };
        let height = if size.y <= 0.0 {
            avail.height
        } else {
            (size.y as u16).min(avail.height)
        };
        let mut rect = Rect::new(avail.x, avail.y, width, height);

        let bg = to_term_color(background);
        if border {
            Block::bordered()
                .style(Style::default().bg(bg))
                .render(rect, self.buf);
            rect = rect.inner(Margin::new(1, 1));
        }
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(bg);
                }
            }
        }

        let mut state = self.children.get(id).copied().unwrap_or_default();
        if self.mouse_in(rect) && self.input.wheel != Vec2::ZERO {
            state.scroll.x += self.input.wheel.x * WHEEL_STEP;
            state.scroll.y += self.input.wheel.y * WHEEL_STEP;
            state.clamp(rect);
        }

        self.child = Some(OpenChild {
            id: id.to_string(),
            rect,
            state,
            background,
        });
    }

    fn end_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            child.state.clamp(child.rect);
            self.children.insert(child.id, child.state);
        }
    }

    fn cursor_screen_pos(&self) -> Vec2 {
        match &self.child {
            Some(c) => Vec2::new(
                c.rect.x as f32 - c.state.scroll.x,
                c.rect.y as f32 - c.state.scroll.y,
            ),
            None => Vec2::new(self.area.x as f32, self.area.y as f32),
        }
    }

    fn content_region_max(&self) -> Vec2 {
        self.content_region_avail()
    }

    fn window_size(&self) -> Vec2 {
        self.content_region_avail()
    }

    fn dummy(&mut self, size: Vec2) {
        if let Some(child) = self.child.as_mut() {
            child.state.content = size;
        }
    }

    fn scroll_x(&self) -> f32 {
        self.child.as_ref().map_or(0.0, |c| c.state.scroll.x)
    }

    fn scroll_y(&self) -> f32 {
        self.child.as_ref().map_or(0.0, |c| c.state.scroll.y)
    }

    fn set_scroll_x(&mut self, x: f32) {
        if let Some(child) = self.child.as_mut() {
            child.state.scroll.x = x.max(0.0).round();
        }
    }

    fn set_scroll_y(&mut self, y: f32) {
        if let Some(child) = self.child.as_mut() {
            child.state.scroll.y = y.max(0.0).round();
        }
    }

    fn is_window_focused(&self) -> bool {
        self.input.focused
    }

    fn is_window_hovered(&self) -> bool {
        self.mouse_in(self.clip())
    }

    fn modifiers(&self) -> Modifiers {
        self.input.modifiers
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.input.pressed.contains(&key)
    }

    fn take_input_characters(&mut self) -> Vec<char> {
        std::mem::take(&mut self.input.chars)
    }

    fn mouse_pos(&self) -> Vec2 {
        self.input.mouse_pos
    }

    fn is_mouse_clicked(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.input.clicked
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.input.down
    }

    fn is_mouse_dragging(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.input.dragging
    }

    fn is_mouse_hovering_rect(&self, min: Vec2, max: Vec2) -> bool {
        let p = self.input.mouse_pos;
        p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
    }

    fn double_click_time_ms(&self) -> u64 {
        self.double_click_ms
    }

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: Color) {
        if color.is_transparent() {
            return;
        }
        let Some(span) = self.cell_span(min, max) else {
            return;
        };
        for y in span.top()..span.bottom() {
            for x in span.left()..span.right() {
                self.blend_cell_bg(x, y, color);
            }
        }
    }

    fn add_rect(&mut self, min: Vec2, max: Vec2, color: Color, _thickness: f32) {
        // an outline needs at least two cells in each direction
        if color.is_transparent() || max.x - min.x < 2.0 || max.y - min.y < 2.0 {
            return;
        }
        let Some(span) = self.cell_span(min, max) else {
            return;
        };
        for y in span.top()..span.bottom() {
            for x in span.left()..span.right() {
                let edge = y == span.top()
                    || y + 1 == span.bottom()
                    || x == span.left()
                    || x + 1 == span.right();
                if edge {
                    self.blend_cell_bg(x, y, color);
                }
            }
        }
    }

    fn add_text(&mut self, pos: Vec2, color: Color, text: &str) {
        let clip = self.clip();
        let y = pos.y.floor();
        if y < clip.top() as f32 || y >= clip.bottom() as f32 {
            return;
        }
        let y = y as u16;
        let fallback = self.fallback_background();

        let mut x = pos.x.round() as i32;
        for grapheme in text.graphemes(true) {
            let width = grapheme.width() as i32;
            if width == 0 {
                continue;
            }
            let fits = x >= clip.left() as i32 && x + width <= clip.right() as i32;
            if fits {
                if let Some(cell) = self.buf.cell_mut((x as u16, y)) {
                    let below = match cell.bg {
                        TermColor::Rgb(r, g, b) => Color::rgb(r, g, b),
                        _ => fallback,
                    };
                    cell.set_symbol(grapheme);
                    cell.set_fg(to_term_color(color.blend_over(below)));
                }
                // cells hidden behind a wide grapheme
                for hidden in (x + 1)..(x + width) {
                    if let Some(cell) = self.buf.cell_mut((hidden as u16, y)) {
                        let bg = cell.bg;
                        cell.reset();
                        cell.set_bg(bg);
                    }
                }
            }
            x += width;
        }
    }

    fn tooltip(&mut self, sections: &[(Color, String)]) {
        self.tooltip = Some(sections.to_vec());
    }
}
