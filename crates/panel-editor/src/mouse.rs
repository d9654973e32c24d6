//! Mouse handling: click, double/triple click and drag selection.

use lunar_buffer::utf8::char_length;
use lunar_buffer::{next_tab_stop, Coordinates};
use lunar_core::{MouseButton, Ui, Vec2};

use crate::click_tracker::ClickKind;
use crate::rendering::{next_tab_stop_x, tab_width};
use crate::selection::SelectionMode;
use crate::TextEditor;

impl TextEditor {
    pub(crate) fn handle_mouse_inputs(&mut self, ui: &mut dyn Ui) {
        if !ui.is_window_hovered() {
            return;
        }
        let mods = ui.modifiers();
        if mods.shift || mods.alt {
            return;
        }

        if ui.is_mouse_clicked(MouseButton::Left) {
            let kind = self
                .clicks
                .register(self.clock.now_ms(), ui.double_click_time_ms());
            let mode = match kind {
                ClickKind::Triple if mods.ctrl => None,
                ClickKind::Triple => Some(SelectionMode::Line),
                ClickKind::Double if mods.ctrl => None,
                ClickKind::Double if self.selection_mode == SelectionMode::Line => {
                    Some(SelectionMode::Normal)
                }
                ClickKind::Double => Some(SelectionMode::Word),
                ClickKind::Single if mods.ctrl => Some(SelectionMode::Word),
                ClickKind::Single => Some(SelectionMode::Normal),
            };

            if let Some(mode) = mode {
                let at = self.screen_pos_to_coordinates(ui, ui.mouse_pos());
                log::trace!("{:?} click at {:?}", kind, at);
                self.state.cursor_position = at;
                self.interactive_start = at;
                self.interactive_end = at;
                self.selection_mode = mode;
                self.set_selection(at, at, mode);
            }
        } else if ui.is_mouse_dragging(MouseButton::Left) && ui.is_mouse_down(MouseButton::Left) {
            let at = self.screen_pos_to_coordinates(ui, ui.mouse_pos());
            self.state.cursor_position = at;
            self.interactive_end = at;
            let (start, mode) = (self.interactive_start, self.selection_mode);
            self.set_selection(start, at, mode);
        }
    }

    /// Map a screen position to the nearest glyph boundary.
    ///
    /// A glyph is entered once the position passes its horizontal midpoint.
    pub fn screen_pos_to_coordinates(&self, ui: &dyn Ui, position: Vec2) -> Coordinates {
        let origin = ui.cursor_screen_pos();
        let local = position - origin;
        let line_no = (local.y / self.char_advance.y).floor().max(0.0) as usize;

        let mut column = 0;
        if let Some(line) = self.buffer.line(line_no) {
            let tab_width = tab_width(ui);
            let mut x = 0.0;
            let mut i = 0;

            while i < line.len() {
                if line[i].byte == b'\t' {
                    let next_x = next_tab_stop_x(x, tab_width);
                    if self.text_start + x + (next_x - x) * 0.5 > local.x {
                        break;
                    }
                    x = next_x;
                    column = next_tab_stop(column);
                    i += 1;
                } else {
                    let end = (i + char_length(line[i].byte)).min(line.len());
                    let bytes: Vec<u8> = line[i..end].iter().map(|g| g.byte).collect();
                    let width = ui.calc_text_size(&String::from_utf8_lossy(&bytes)).x;
                    if self.text_start + x + width * 0.5 > local.x {
                        break;
                    }
                    x += width;
                    column += 1;
                    i = end;
                }
            }
        }

        self.buffer.sanitize(Coordinates::new(line_no, column))
    }
}
