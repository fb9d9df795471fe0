use crate::model::ButtonRole;
use crate::sim::PetState;
use crate::sink::ButtonPulse;
use crossterm::{
    cursor, execute, queue,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marks the right half of a double-width glyph; never printed.
const WIDE_TAIL: char = '\0';

pub(crate) const PANEL_W: u16 = 44;
pub(crate) const PANEL_H: u16 = 12;

const BG: Color = Color::Rgb { r: 20, g: 20, b: 30 };
const BAR_X: u16 = 9;
const BAR_W: u16 = 18;
const BAR_Y: u16 = 5;
const BUTTON_LEFT_X: u16 = 2;
const BUTTON_RIGHT_X: u16 = PANEL_W - 6;
const BUTTON_Y: u16 = 2;
const BUTTON_GAP: u16 = 3;
const BUTTON_W: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            c.ch = ' ';
            c.fg = Color::White;
            c.bg = bg;
            c.bold = false;
        }
    }
    #[cfg(test)]
    pub(crate) fn row_text(&self, y: u16) -> String {
        (0..self.w)
            .map(|x| self.cells[self.idx(x, y)].ch)
            .filter(|&ch| ch != WIDE_TAIL)
            .collect()
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            SetTitle(""),
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn bell(&mut self) -> anyhow::Result<()> {
        let mut out = self.out.lock();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }

    pub(crate) fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        // held for the whole frame so the tray mirror cannot interleave
        let mut out = self.out.lock();
        queue!(out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        let mut last_bold = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c.ch == WIDE_TAIL || (diff_only && c == self.prev.cells[i]) {
                    continue;
                }

                queue!(out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                if last_bold != Some(c.bold) {
                    let attr = if c.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(out, SetAttribute(attr))?;
                    last_bold = Some(c.bold);
                }

                queue!(out, Print(c.ch))?;
            }
        }

        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/// Tray stand-in: the terminal title. Errors are dropped, the mirror is best-effort.
pub(crate) fn set_title(glyph: &str) {
    let mut out = io::stdout().lock();
    let _ = execute!(out, SetTitle(glyph));
}

/* -----------------------------
   Text
------------------------------ */

pub(crate) fn draw_text(
    buf: &mut CellBuffer,
    x: u16,
    y: u16,
    s: &str,
    fg: Color,
    bg: Color,
    bold: bool,
) -> u16 {
    let mut xx = x;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if xx.saturating_add(w) > buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg, bold });
        if w == 2 {
            buf.set(
                xx + 1,
                y,
                Cell {
                    ch: WIDE_TAIL,
                    fg,
                    bg,
                    bold,
                },
            );
        }
        xx += w;
    }
    xx - x
}

fn draw_centered(buf: &mut CellBuffer, x0: u16, width: u16, y: u16, s: &str, fg: Color, bold: bool) {
    let w = UnicodeWidthStr::width(s) as u16;
    let x = x0 + width.saturating_sub(w) / 2;
    draw_text(buf, x, y, s, fg, BG, bold);
}

fn bar_fill(value: u8, width: u16) -> u16 {
    (value.min(100) as u32 * width as u32 / 100) as u16
}

/* -----------------------------
   Button feedback
------------------------------ */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ButtonFeedback {
    remaining: [u8; 6],
}

impl ButtonFeedback {
    pub(crate) fn pulse(&mut self, pulse: ButtonPulse) {
        self.remaining[pulse.role.index()] = pulse.remaining_ticks;
    }

    pub(crate) fn tick(&mut self) {
        for r in &mut self.remaining {
            *r = r.saturating_sub(1);
        }
    }

    pub(crate) fn is_pressed(&self, role: ButtonRole) -> bool {
        self.remaining[role.index()] > 0
    }
}

/* -----------------------------
   Panel layout
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) x0: u16,
    pub(crate) y0: u16,
}

impl Layout {
    pub(crate) fn for_size(cols: u16, rows: u16) -> Self {
        Self {
            x0: cols.saturating_sub(PANEL_W) / 2,
            y0: rows.saturating_sub(PANEL_H) / 2,
        }
    }

    pub(crate) fn button_origin(&self, role: ButtonRole) -> (u16, u16) {
        let i = role.index() as u16;
        let (x, slot) = if i < 3 {
            (BUTTON_LEFT_X, i)
        } else {
            (BUTTON_RIGHT_X, i - 3)
        };
        (self.x0 + x, self.y0 + BUTTON_Y + slot * BUTTON_GAP)
    }

    /// Buttons cover their glyph row and the hotkey row below it.
    pub(crate) fn button_at(&self, col: u16, row: u16) -> Option<ButtonRole> {
        ButtonRole::ALL.into_iter().find(|&role| {
            let (x, y) = self.button_origin(role);
            (x..x + BUTTON_W).contains(&col) && (y..y + 2).contains(&row)
        })
    }
}

/* -----------------------------
   Scenes
------------------------------ */

pub(crate) fn draw_pet_panel(
    buf: &mut CellBuffer,
    layout: Layout,
    st: &PetState,
    feedback: &ButtonFeedback,
    color: bool,
) {
    let tint = |c: Color| if color { c } else { Color::White };
    let (x0, y0) = (layout.x0, layout.y0);

    for y in y0..y0 + PANEL_H {
        for x in x0..x0 + PANEL_W {
            buf.set(
                x,
                y,
                Cell {
                    bg: BG,
                    ..Cell::default()
                },
            );
        }
    }

    draw_text(
        buf,
        x0 + 1,
        y0,
        &format!("Care: {}", st.care_points),
        Color::White,
        BG,
        false,
    );
    draw_centered(
        buf,
        x0,
        PANEL_W,
        y0,
        &st.name,
        tint(Color::Rgb { r: 200, g: 200, b: 220 }),
        false,
    );
    draw_centered(buf, x0, PANEL_W, y0 + BUTTON_Y, st.player.glyph(), Color::White, true);

    let bars = st.bars();
    let rows = [
        ("Hunger", bars.hunger, Color::Rgb { r: 255, g: 80, b: 80 }),
        ("Clean", bars.cleanliness, Color::Rgb { r: 80, g: 255, b: 120 }),
        ("Sleep", bars.sleepiness, Color::Rgb { r: 80, g: 160, b: 255 }),
        ("Happy", bars.happiness, Color::Rgb { r: 255, g: 220, b: 80 }),
    ];
    for (i, (label, value, fg)) in rows.into_iter().enumerate() {
        let y = y0 + BAR_Y + i as u16;
        draw_text(buf, x0 + BAR_X, y, label, Color::White, BG, false);
        let bx = x0 + BAR_X + 7;
        let fill = bar_fill(value, BAR_W);
        for j in 0..BAR_W {
            let (ch, fg) = if j < fill {
                ('█', tint(fg))
            } else {
                ('░', tint(Color::Rgb { r: 60, g: 60, b: 60 }))
            };
            buf.set(bx + j, y, Cell { ch, fg, bg: BG, bold: false });
        }
    }

    for role in ButtonRole::ALL {
        let (x, y) = layout.button_origin(role);
        let pressed = feedback.is_pressed(role);
        let (face, fg) = if pressed {
            (format!(" {} ", role.emoji()), tint(Color::DarkGrey))
        } else {
            (format!("[{}]", role.emoji()), Color::White)
        };
        draw_text(buf, x, y, &face, fg, BG, false);
        let key = role.hotkey().to_string();
        draw_text(buf, x + 1, y + 1, &key, tint(Color::DarkGrey), BG, false);
    }

    let hint = if st.dead {
        format!("{} has passed on · q quit", st.name)
    } else {
        "click or key a button · v hide · q quit".to_string()
    };
    draw_centered(buf, x0, PANEL_W, y0 + PANEL_H - 1, &hint, tint(Color::DarkGrey), false);
}

pub(crate) fn draw_hidden(buf: &mut CellBuffer) {
    let y = buf.h / 2;
    let w = buf.w;
    draw_centered(
        buf,
        0,
        w,
        y,
        "hidden · Alt+P or v to show · q quit",
        Color::DarkGrey,
        false,
    );
}
