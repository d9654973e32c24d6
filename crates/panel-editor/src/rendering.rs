//! Per-frame render loop.
//!
//! [`TextEditor::render`] is the only per-frame entry point: it opens a child
//! region, dispatches keyboard and mouse input, advances the colorizer by one
//! step and paints the lines intersecting the viewport.

use lunar_buffer::utf8::char_length;
use lunar_buffer::{Coordinates, TAB_SIZE};
use lunar_core::{Color, PaletteIndex, Ui, Vec2};

use crate::TextEditor;

const ERROR_TITLE_COLOR: Color = Color::rgb(255, 51, 51);
const ERROR_TEXT_COLOR: Color = Color::rgb(255, 255, 51);

/// Advance `x` to the next tab stop, `tab_width` being the width of one stop.
pub(crate) fn next_tab_stop_x(x: f32, tab_width: f32) -> f32 {
    if tab_width <= 0.0 {
        return x;
    }
    // tolerate float drift when x already sits on a stop
    ((x + 0.001) / tab_width).floor() * tab_width + tab_width
}

/// Width of one tab stop in host units.
pub(crate) fn tab_width(ui: &dyn Ui) -> f32 {
    ui.calc_text_size(" ").x * TAB_SIZE as f32
}

impl TextEditor {
    /// Draw the editor and handle this frame's input.
    ///
    /// `size` components of zero fill the available space.
    pub fn render(&mut self, ui: &mut dyn Ui, title: &str, size: Vec2, border: bool) {
        self.text_changed = false;
        self.cursor_position_changed = false;

        let background = self.palette.get(PaletteIndex::Background);
        ui.begin_child(title, size, border, background);

        self.handle_keyboard_inputs(ui);
        self.handle_mouse_inputs(ui);
        self.colorizer.step(&mut self.buffer);
        self.paint(ui);

        ui.end_child();
    }

    fn paint(&mut self, ui: &mut dyn Ui) {
        self.char_advance = Vec2::new(
            ui.calc_text_size("#").x,
            ui.text_line_height_with_spacing() * self.config.line_spacing,
        );
        let advance = self.char_advance;
        let line_count = self.buffer.line_count();

        self.text_start = ui.calc_text_size(&format!(" {} ", line_count)).x + advance.x;

        if self.scroll_to_top {
            self.scroll_to_top = false;
            ui.set_scroll_y(0.0);
        }
        if self.scroll_to_cursor {
            self.scroll_to_cursor = false;
            self.ensure_cursor_visible(ui);
        }

        let origin = ui.cursor_screen_pos();
        let region = ui.window_size();
        let scroll_x = ui.scroll_x();
        let scroll_y = ui.scroll_y();

        self.page_lines = ((region.y / advance.y).floor() as usize).max(1);

        let first_line = (scroll_y / advance.y).floor().max(0.0) as usize;
        let last_line = (first_line + (region.y / advance.y).floor() as usize)
            .min(line_count.saturating_sub(1));

        let space_width = ui.calc_text_size(" ").x;
        let tab_width = tab_width(ui);
        let focused = ui.is_window_focused();
        let cursor = self.cursor_coordinates();
        let mut longest = self.text_start;

        for line_no in first_line..=last_line {
            if line_no >= line_count {
                break;
            }

            let line_start = Vec2::new(origin.x, origin.y + line_no as f32 * advance.y);
            let text_pos = Vec2::new(line_start.x + self.text_start, line_start.y);
            let line_end_coord = Coordinates::new(line_no, self.buffer.line_max_column(line_no));

            longest = longest.max(
                self.text_start + self.text_distance_to_line_start(ui, line_end_coord),
            );

            self.paint_selection(ui, line_no, line_start, line_end_coord);

            // visible span of the line, independent of horizontal scroll
            let row_start = Vec2::new(line_start.x + scroll_x, line_start.y);
            let row_end = Vec2::new(row_start.x + region.x, row_start.y + advance.y);

            if let Some(message) = self.buffer.error_markers().get(line_no + 1) {
                ui.add_rect_filled(row_start, row_end, self.palette.get(PaletteIndex::ErrorMarker));
                if ui.is_mouse_hovering_rect(line_start, row_end) {
                    let sections = [
                        (ERROR_TITLE_COLOR, format!("Error at line {}:", line_no + 1)),
                        (ERROR_TEXT_COLOR, message.to_string()),
                    ];
                    ui.tooltip(&sections);
                }
            }

            let number = format!("{}  ", line_no + 1);
            let number_width = ui.calc_text_size(&number).x;
            ui.add_text(
                Vec2::new(line_start.x + self.text_start - number_width, line_start.y),
                self.palette.get(PaletteIndex::LineNumber),
                &number,
            );

            if cursor.line == line_no {
                if !self.has_selection() {
                    let fill = if focused {
                        PaletteIndex::CurrentLineFill
                    } else {
                        PaletteIndex::CurrentLineFillInactive
                    };
                    ui.add_rect_filled(row_start, row_end, self.palette.get(fill));
                    ui.add_rect(
                        row_start,
                        row_end,
                        self.palette.get(PaletteIndex::CurrentLineEdge),
                        1.0,
                    );
                }

                if focused {
                    self.paint_cursor(ui, text_pos, cursor);
                }
            }

            self.paint_glyphs(ui, line_no, text_pos, space_width, tab_width);
        }

        ui.dummy(Vec2::new(longest + 2.0, line_count as f32 * advance.y));
    }

    fn paint_selection(
        &self,
        ui: &mut dyn Ui,
        line_no: usize,
        line_start: Vec2,
        line_end: Coordinates,
    ) {
        let line_begin = Coordinates::new(line_no, 0);
        let selection_start = self.state.selection_start;
        let selection_end = self.state.selection_end;

        let mut from = None;
        let mut to = None;
        if selection_start <= line_end {
            from = Some(if selection_start > line_begin {
                self.text_distance_to_line_start(ui, selection_start)
            } else {
                0.0
            });
        }
        if selection_end > line_begin {
            let end = if selection_end < line_end {
                selection_end
            } else {
                line_end
            };
            to = Some(self.text_distance_to_line_start(ui, end));
        }

        // selections continuing past the line cover the newline too
        if selection_end.line > line_no {
            to = to.map(|x| x + self.char_advance.x);
        }

        if let (Some(from), Some(to)) = (from, to) {
            if from < to {
                let x = line_start.x + self.text_start;
                ui.add_rect_filled(
                    Vec2::new(x + from, line_start.y),
                    Vec2::new(x + to, line_start.y + self.char_advance.y),
                    self.palette.get(PaletteIndex::Selection),
                );
            }
        }
    }

    /// Blinking caret: hidden for one period, shown for the next.
    fn paint_cursor(&mut self, ui: &mut dyn Ui, text_pos: Vec2, cursor: Coordinates) {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.blink_start);
        let blink = self.config.cursor_blink_ms;

        if elapsed > blink {
            let x = text_pos.x + self.text_distance_to_line_start(ui, cursor);
            ui.add_rect_filled(
                Vec2::new(x, text_pos.y),
                Vec2::new(x + 1.0, text_pos.y + self.char_advance.y),
                self.palette.get(PaletteIndex::Cursor),
            );
            if elapsed > blink * 2 {
                self.blink_start = now;
            }
        }
    }

    /// Draw a line's glyphs in same-color runs. Spaces and tabs only advance.
    fn paint_glyphs(
        &self,
        ui: &mut dyn Ui,
        line_no: usize,
        text_pos: Vec2,
        space_width: f32,
        tab_width: f32,
    ) {
        let Some(line) = self.buffer.line(line_no) else {
            return;
        };

        let mut run: Vec<u8> = Vec::new();
        let mut run_color = line
            .first()
            .map_or(PaletteIndex::Default, |g| g.resolved_color());
        let mut offset = 0.0_f32;

        let mut i = 0;
        while i < line.len() {
            let glyph = line[i];
            let color = glyph.resolved_color();

            if color != run_color || glyph.byte == b'\t' || glyph.byte == b' ' {
                self.flush_run(ui, &mut run, run_color, text_pos, &mut offset);
            }
            run_color = color;

            match glyph.byte {
                b'\t' => {
                    offset = next_tab_stop_x(offset, tab_width);
                    i += 1;
                }
                b' ' => {
                    offset += space_width;
                    i += 1;
                }
                lead => {
                    let end = (i + char_length(lead)).min(line.len());
                    run.extend(line[i..end].iter().map(|g| g.byte));
                    i = end;
                }
            }
        }
        self.flush_run(ui, &mut run, run_color, text_pos, &mut offset);
    }

    fn flush_run(
        &self,
        ui: &mut dyn Ui,
        run: &mut Vec<u8>,
        color: PaletteIndex,
        text_pos: Vec2,
        offset: &mut f32,
    ) {
        if run.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(run).into_owned();
        ui.add_text(
            Vec2::new(text_pos.x + *offset, text_pos.y),
            self.palette.get(color),
            &text,
        );
        *offset += ui.calc_text_size(&text).x;
        run.clear();
    }

    /// Horizontal distance from the line start to `at`, in host units.
    pub(crate) fn text_distance_to_line_start(&self, ui: &dyn Ui, at: Coordinates) -> f32 {
        let Some(line) = self.buffer.line(at.line) else {
            return 0.0;
        };
        let tab_width = tab_width(ui);
        let end = self.buffer.character_index(at).min(line.len());

        let mut distance = 0.0;
        let mut i = 0;
        while i < end {
            if line[i].byte == b'\t' {
                distance = next_tab_stop_x(distance, tab_width);
                i += 1;
            } else {
                let next = (i + char_length(line[i].byte)).min(line.len());
                let bytes: Vec<u8> = line[i..next].iter().map(|g| g.byte).collect();
                distance += ui.calc_text_size(&String::from_utf8_lossy(&bytes)).x;
                i = next;
            }
        }
        distance
    }

    /// Scroll so the cursor cell is inside the visible region.
    fn ensure_cursor_visible(&self, ui: &mut dyn Ui) {
        let region = ui.window_size();
        let advance = self.char_advance;
        let cursor = self.cursor_coordinates();

        let top = cursor.line as f32 * advance.y;
        let bottom = top + advance.y;
        let scroll_y = ui.scroll_y();
        if top < scroll_y {
            ui.set_scroll_y(top);
        } else if bottom > scroll_y + region.y {
            ui.set_scroll_y((bottom - region.y).max(0.0));
        }

        let x = self.text_start + self.text_distance_to_line_start(ui, cursor);
        let scroll_x = ui.scroll_x();
        if x < scroll_x + self.text_start {
            ui.set_scroll_x((x - self.text_start).max(0.0));
        } else if x + advance.x > scroll_x + region.x {
            ui.set_scroll_x((x + advance.x - region.x).max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_ui::{editor, editor_with_clock, Draw, FakeUi};
    use crate::SelectionMode;
    use lunar_buffer::ErrorMarkers;
    use lunar_core::ManualClock;

    fn frame(ed: &mut TextEditor, ui: &mut FakeUi) {
        ui.begin_frame();
        ed.render(ui, "editor", Vec2::ZERO, false);
    }

    #[test]
    fn test_next_tab_stop_x() {
        assert_eq!(next_tab_stop_x(0.0, 4.0), 4.0);
        assert_eq!(next_tab_stop_x(3.0, 4.0), 4.0);
        assert_eq!(next_tab_stop_x(4.0, 4.0), 8.0);
        assert_eq!(next_tab_stop_x(5.5, 4.0), 8.0);
    }

    #[test]
    fn test_text_distance_counts_tabs_and_multibyte() {
        let ed = editor("\tab\nxé\ty");
        let ui = FakeUi::new();
        assert_eq!(ed.text_distance_to_line_start(&ui, Coordinates::new(0, 4)), 4.0);
        assert_eq!(ed.text_distance_to_line_start(&ui, Coordinates::new(0, 6)), 6.0);
        assert_eq!(ed.text_distance_to_line_start(&ui, Coordinates::new(1, 2)), 2.0);
        assert_eq!(ed.text_distance_to_line_start(&ui, Coordinates::new(1, 5)), 5.0);
    }

    #[test]
    fn test_render_reports_content_size() {
        let mut ed = editor("abc\nlonger line\nx");
        let mut ui = FakeUi::new();
        frame(&mut ed, &mut ui);

        // gutter " 3 " plus one advance
        assert_eq!(ed.text_start, 4.0);
        assert_eq!(ui.dummy_size, Some(Vec2::new(4.0 + 11.0 + 2.0, 3.0)));
        assert_eq!(ui.child_depth, 0);
    }

    #[test]
    fn test_render_paints_only_visible_lines() {
        let text = (1..=100).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let mut ed = editor(&text);
        let mut ui = FakeUi::new();
        frame(&mut ed, &mut ui);
        ui.scroll.y = 50.0;
        frame(&mut ed, &mut ui);

        let numbers = ui.texts_with_color(ed.palette().get(PaletteIndex::LineNumber));
        assert_eq!(numbers.first().map(String::as_str), Some("51  "));
        assert_eq!(numbers.len(), 25);
        assert!(!numbers.iter().any(|n| n == "50  " || n == "77  "));
    }

    #[test]
    fn test_glyph_runs_break_on_color_and_whitespace() {
        let mut ed = editor("local x = 10");
        ed.colorize_all();
        let mut ui = FakeUi::new();
        frame(&mut ed, &mut ui);

        let texts: Vec<String> = ui
            .draws
            .iter()
            .filter_map(|d| match d {
                Draw::Text { text, .. } if !text.ends_with("  ") => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["local", "x", "=", "10"]);

        let keyword = ui.text_draw("local").map(|(pos, color)| (pos.x, color));
        assert_eq!(
            keyword,
            Some((ed.text_start, ed.palette().get(PaletteIndex::BlueKeyword)))
        );
        let number = ui.text_draw("10").map(|(pos, _)| pos.x);
        assert_eq!(number, Some(ed.text_start + 10.0));
    }

    #[test]
    fn test_cursor_blinks_on_400ms_cycle() {
        let clock = ManualClock::new(0);
        let mut ed = editor_with_clock("abc", clock.clone());
        let mut ui = FakeUi::new();
        let cursor_color = ed.palette().get(PaletteIndex::Cursor);

        frame(&mut ed, &mut ui);
        assert!(ui.filled_rects_with_color(cursor_color).is_empty());

        clock.set(401);
        frame(&mut ed, &mut ui);
        assert_eq!(ui.filled_rects_with_color(cursor_color).len(), 1);

        clock.set(801);
        frame(&mut ed, &mut ui);
        assert_eq!(ui.filled_rects_with_color(cursor_color).len(), 1);

        // cycle restarted at 801
        clock.set(1000);
        frame(&mut ed, &mut ui);
        assert!(ui.filled_rects_with_color(cursor_color).is_empty());
    }

    #[test]
    fn test_unfocused_editor_has_no_caret() {
        let clock = ManualClock::new(0);
        let mut ed = editor_with_clock("abc", clock.clone());
        let mut ui = FakeUi::new();
        ui.focused = false;
        clock.set(500);
        frame(&mut ed, &mut ui);
        let cursor_color = ed.palette().get(PaletteIndex::Cursor);
        assert!(ui.filled_rects_with_color(cursor_color).is_empty());
        let inactive = ed.palette().get(PaletteIndex::CurrentLineFillInactive);
        assert_eq!(ui.filled_rects_with_color(inactive).len(), 1);
    }

    #[test]
    fn test_selection_rect_spans_selected_columns() {
        let mut ed = editor("hello\nworld");
        ed.set_selection(
            Coordinates::new(0, 1),
            Coordinates::new(1, 2),
            SelectionMode::Normal,
        );
        let mut ui = FakeUi::new();
        frame(&mut ed, &mut ui);

        let rects = ui.filled_rects_with_color(ed.palette().get(PaletteIndex::Selection));
        let start = ed.text_start;
        assert_eq!(
            rects,
            vec![
                (Vec2::new(start + 1.0, 0.0), Vec2::new(start + 6.0, 1.0)),
                (Vec2::new(start, 1.0), Vec2::new(start + 2.0, 2.0)),
            ]
        );
        // no current line highlight while selecting
        let fill = ed.palette().get(PaletteIndex::CurrentLineFill);
        assert!(ui.filled_rects_with_color(fill).is_empty());
    }

    #[test]
    fn test_error_marker_tooltip_on_hover() {
        let mut ed = editor("ok\nbroken\nok");
        let mut markers = ErrorMarkers::new();
        markers.insert(2, "unexpected symbol");
        ed.set_error_markers(markers);

        let mut ui = FakeUi::new();
        ui.mouse_pos = Vec2::new(10.0, 1.5);
        frame(&mut ed, &mut ui);

        let marker = ed.palette().get(PaletteIndex::ErrorMarker);
        assert_eq!(ui.filled_rects_with_color(marker).len(), 1);
        assert_eq!(
            ui.tooltips,
            vec![vec![
                (ERROR_TITLE_COLOR, "Error at line 2:".to_string()),
                (ERROR_TEXT_COLOR, "unexpected symbol".to_string()),
            ]]
        );

        ui.mouse_pos = Vec2::new(10.0, 0.5);
        frame(&mut ed, &mut ui);
        assert!(ui.tooltips.is_empty());
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let text = vec!["x"; 100].join("\n");
        let mut ed = editor(&text);
        let mut ui = FakeUi::new();
        frame(&mut ed, &mut ui);
        assert_eq!(ed.page_lines, 24);

        ed.set_cursor_position(Coordinates::new(60, 0));
        frame(&mut ed, &mut ui);
        assert_eq!(ui.scroll.y, 61.0 - 24.0);

        ed.set_cursor_position(Coordinates::new(3, 0));
        frame(&mut ed, &mut ui);
        assert_eq!(ui.scroll.y, 3.0);
    }

    #[test]
    fn test_set_text_scrolls_to_top() {
        let mut ed = editor("a");
        let mut ui = FakeUi::new();
        ui.scroll.y = 12.0;
        ed.set_text("b\nc");
        frame(&mut ed, &mut ui);
        assert_eq!(ui.scroll.y, 0.0);
    }

    #[test]
    fn test_render_resets_change_flags() {
        let mut ed = editor("abc");
        let mut ui = FakeUi::new();
        assert!(ed.is_text_changed());
        frame(&mut ed, &mut ui);
        assert!(!ed.is_text_changed());

        ui.chars = vec!['x'];
        frame(&mut ed, &mut ui);
        assert!(ed.is_text_changed());
        assert!(ed.is_cursor_position_changed());
    }
}
