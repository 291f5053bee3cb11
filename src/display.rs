//! Terminal rendering of highlighted text
//!
//! Paints lines of a [`TextBuffer`] using the tags in a [`StyleStore`] and a
//! [`StyleTable`]. Output goes to any writer through crossterm commands, so
//! the same code paints a terminal or fills a byte buffer in tests.

use std::io::Write;
use std::ops::Range;

use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthChar;

use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::error::Result;
use crate::syntax::{StyleStore, StyleTable, TextSource};

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_numbers: bool,
    pub tab_width: usize,
    pub color: bool,
    /// Truncate lines to this many columns
    pub max_cols: Option<usize>,
    /// Print the style letters under each line
    pub show_tags: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: false,
            tab_width: 8,
            color: true,
            max_cols: None,
            show_tags: false,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            line_numbers: config.show_line_numbers,
            tab_width: config.tab_width,
            color: config.color,
            ..Default::default()
        }
    }
}

/// One displayed character: what it expands to and how wide it is
struct Cell {
    text: String,
    width: usize,
}

const GUTTER_WIDTH: usize = 6;

/// Paints highlighted lines
pub struct Renderer<'a> {
    table: &'a StyleTable,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(table: &'a StyleTable, options: RenderOptions) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every line of the text
    pub fn render_document<W: Write>(&self, out: &mut W, text: &TextBuffer, styles: &StyleStore) -> Result<()> {
        self.render_lines(out, text, styles, 0..text.line_count())
    }

    /// Render the given 0-based lines
    pub fn render_lines<W: Write>(
        &self,
        out: &mut W,
        text: &TextBuffer,
        styles: &StyleStore,
        lines: Range<usize>,
    ) -> Result<()> {
        let last = lines.end.min(text.line_count());
        for line in lines.start..last {
            self.render_line(out, text, styles, line)?;
        }
        out.flush()?;
        Ok(())
    }

    fn render_line<W: Write>(&self, out: &mut W, text: &TextBuffer, styles: &StyleStore, line: usize) -> Result<()> {
        let start = text.position_of_line(line);
        let end = text.line_end(start);
        let cells = self.layout(text.slice(start..end));

        if self.options.line_numbers {
            let number = format!("{:>width$} ", line + 1, width = GUTTER_WIDTH - 1);
            if self.options.color {
                queue!(out, SetAttribute(Attribute::Dim), Print(number), SetAttribute(Attribute::NormalIntensity))?;
            } else {
                queue!(out, Print(number))?;
            }
        }

        for span in styles.spans(start..start + cells.len()) {
            let piece: String = cells[span.start - start..span.end - start]
                .iter()
                .map(|cell| cell.text.as_str())
                .collect();
            if !self.options.color {
                queue!(out, Print(piece))?;
                continue;
            }

            let style = self.table.get(span.tag);
            queue!(out, SetForegroundColor(style.fg.to_crossterm()))?;
            if style.font.is_bold() {
                queue!(out, SetAttribute(Attribute::Bold), Print(piece), SetAttribute(Attribute::NormalIntensity))?;
            } else {
                queue!(out, Print(piece))?;
            }
        }

        if self.options.color {
            queue!(out, ResetColor)?;
        }
        queue!(out, Print('\n'))?;

        if self.options.show_tags {
            if self.options.line_numbers {
                queue!(out, Print(" ".repeat(GUTTER_WIDTH)))?;
            }
            let letters: String = cells
                .iter()
                .zip(styles.range(start..end))
                .flat_map(|(cell, tag)| std::iter::repeat(tag.letter()).take(cell.width))
                .collect();
            queue!(out, Print(letters), Print('\n'))?;
        }

        Ok(())
    }

    /// Expand tabs and measure characters, stopping at the column limit
    fn layout(&self, chars: &[char]) -> Vec<Cell> {
        let tab_width = self.options.tab_width.max(1);
        let mut cells = Vec::with_capacity(chars.len());
        let mut col = 0;

        for &ch in chars {
            let cell = match ch {
                '\t' => {
                    let width = tab_width - col % tab_width;
                    Cell { text: " ".repeat(width), width }
                }
                c if c.is_control() => Cell { text: String::new(), width: 0 },
                c => Cell {
                    text: c.to_string(),
                    width: UnicodeWidthChar::width(c).unwrap_or(1),
                },
            };
            if self.options.max_cols.is_some_and(|max| col + cell.width > max) {
                break;
            }
            col += cell.width;
            cells.push(cell);
        }

        cells
    }
}

/// 0-based lines touched by a character range
pub fn lines_for_range(text: &TextBuffer, range: Range<usize>) -> Range<usize> {
    let (first, _) = text.line_col(range.start);
    let last_pos = range.end.saturating_sub(1).max(range.start);
    let (last, _) = text.line_col(last_pos);
    first..last + 1
}
