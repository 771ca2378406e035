/// Forward-only cursor over OBJ text.
///
/// `Scanner` works on the raw bytes of the buffer; every token boundary it
/// produces sits next to an ASCII byte, so tokens are always valid `&str`
/// slices of the input.
///
/// # Example
///
/// ```ignore
/// use objmesh_io::scanner::Scanner;
///
/// let mut scanner = Scanner::new("v 1 2 3\n");
/// scanner.advance(1);
/// scanner.skip_whitespace();
/// assert_eq!(scanner.read_numeric_token(), "1");
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    data: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            data: text.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// Returns the current read position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 1-based line number of the current position.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.pos + offset).copied()
    }

    pub fn at_end_of_buffer(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// True at `\r`, `\n`, `\0` or the end of the buffer.
    pub fn at_end_of_line(&self) -> bool {
        match self.peek() {
            None => true,
            Some(b) => is_line_end(b),
        }
    }

    /// Moves forward `count` bytes, stopping at the end of the buffer.
    pub fn advance(&mut self, count: usize) {
        let end = self.pos.saturating_add(count).min(self.data.len());
        self.line += self.data[self.pos..end].iter().filter(|&&b| b == b'\n').count();
        self.pos = end;
    }

    /// Moves past the next `\n`, or to the end of the buffer if there is none.
    pub fn skip_to_next_line(&mut self) {
        match self.data[self.pos..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                self.pos += offset + 1;
                self.line += 1;
            }
            None => self.pos = self.data.len(),
        }
    }

    /// Skips spaces and tabs without leaving the current line.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if is_line_end(b) || !b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    /// Reads up to whitespace, `/` or the end of the line.
    pub fn read_token(&mut self) -> &'a str {
        self.read_while(|b| b != b'/')
    }

    /// Reads up to whitespace or the end of the line.
    pub fn read_numeric_token(&mut self) -> &'a str {
        self.read_while(|_| true)
    }

    fn read_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_line_end(b) || b.is_ascii_whitespace() || !accept(b) {
                break;
            }
            self.pos += 1;
        }
        self.text.get(start..self.pos).unwrap_or_default()
    }
}

fn is_line_end(b: u8) -> bool {
    b == b'\r' || b == b'\n' || b == b'\0'
}
