//! Schema editor text buffer

/// Multi-line text with a cursor.
///
/// Every mutation bumps the revision so validation results can be matched
/// to the text they were computed from.
#[derive(Debug, Clone)]
pub struct EditorBuffer {
    lines: Vec<String>,
    /// Cursor row (line index)
    row: usize,
    /// Cursor column in characters
    col: usize,
    revision: u64,
    pub scroll_offset: usize,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl EditorBuffer {
    /// Load text with the cursor at the start
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            row: 0,
            col: 0,
            revision: 1,
            scroll_offset: 0,
        }
    }

    /// Full snapshot of the buffer
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Cursor as (row, column in characters)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn current_line(&self) -> &str {
        &self.lines[self.row]
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    /// Byte offset of the cursor column within the current line
    fn byte_col(&self) -> usize {
        let line = self.current_line();
        line.char_indices()
            .nth(self.col)
            .map_or(line.len(), |(i, _)| i)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let at = self.byte_col();
        self.lines[self.row].insert(at, c);
        self.col += 1;
        self.touch();
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    /// Split the current line at the cursor
    pub fn insert_newline(&mut self) {
        let at = self.byte_col();
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
        self.touch();
    }

    /// Delete the character before the cursor, joining lines at column 0
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_col();
            self.lines[self.row].remove(at);
            self.touch();
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
            self.touch();
        }
    }

    /// Delete the character under the cursor, joining lines at line end
    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let at = self.byte_col();
            self.lines[self.row].remove(at);
            self.touch();
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            self.touch();
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    /// Keep the cursor row inside a window of `height` lines
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll_offset {
            self.scroll_offset = self.row;
        } else if self.row >= self.scroll_offset + height {
            self.scroll_offset = self.row + 1 - height;
        }
    }
}
