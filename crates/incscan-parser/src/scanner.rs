//! Include Directive Scanner
//!
//! A single forward pass over a C/C++ source buffer that yields the
//! `#include` directives a preprocessor would act on. Look-alike text in
//! string literals, character literals and comments is ignored.
//!
//! The scanner works on bytes. Every delimiter it cares about is ASCII, so
//! byte offsets always fall on UTF-8 boundaries of the original `&str`.

use incscan_core::{IncludeDirective, IncludeKind, ScanError, Span};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Lexical mode of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    LineComment,
    BlockComment { opened: u32 },
    StringLiteral { opened: u32 },
    CharLiteral { opened: u32 },
}

/// Byte cursor that steps over backslash-newline splices.
///
/// `line` always tracks the physical line of the byte at `pos`.
#[derive(Debug, Clone)]
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: u32,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// Length of the splice starting at `i`, or 0
    fn splice_len(&self, i: usize) -> usize {
        match (self.bytes.get(i), self.bytes.get(i + 1), self.bytes.get(i + 2)) {
            (Some(b'\\'), Some(b'\n'), _) => 2,
            (Some(b'\\'), Some(b'\r'), Some(b'\n')) => 3,
            _ => 0,
        }
    }

    fn skip_splices(&mut self) {
        loop {
            let len = self.splice_len(self.pos);
            if len == 0 {
                break;
            }
            self.pos += len;
            self.line += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_splices();
        self.bytes.get(self.pos).copied()
    }

    /// One byte of lookahead past the current byte
    fn peek_next(&mut self) -> Option<u8> {
        self.skip_splices();
        let mut i = self.pos + 1;
        loop {
            let len = self.splice_len(i);
            if len == 0 {
                break;
            }
            i += len;
        }
        self.bytes.get(i).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn offset(&mut self) -> usize {
        self.skip_splices();
        self.pos
    }
}

fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | 0x0b | 0x0c)
}

fn is_ident(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Lazy iterator over the include directives of one buffer.
///
/// Yields directives in source order. After the first error it yields
/// nothing more.
#[derive(Debug, Clone)]
pub struct IncludeScanner<'a> {
    name: Option<&'a str>,
    cursor: Cursor<'a>,
    mode: Mode,
    /// Only blanks and comments seen so far on the current logical line
    at_line_start: bool,
    finished: bool,
}

impl<'a> IncludeScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            name: None,
            cursor: Cursor::new(source),
            mode: Mode::Normal,
            at_line_start: true,
            finished: false,
        }
    }

    /// Attach a logical file name used in log output
    pub fn with_name(source: &'a str, name: &'a str) -> Self {
        Self {
            name: Some(name),
            ..Self::new(source)
        }
    }

    pub fn name(&self) -> &str {
        self.name.unwrap_or("<buffer>")
    }

    /// Run until the next directive, end of buffer, or a lexical error
    fn advance(&mut self) -> Result<Option<IncludeDirective>, ScanError> {
        while let Some(c) = self.cursor.peek() {
            match self.mode {
                Mode::Normal => {
                    if let Some(directive) = self.normal(c)? {
                        return Ok(Some(directive));
                    }
                }
                Mode::LineComment => {
                    // The newline itself is handled in Normal mode.
                    if c == b'\n' {
                        self.mode = Mode::Normal;
                    } else {
                        self.cursor.bump();
                    }
                }
                Mode::BlockComment { .. } => {
                    if c == b'*' && self.cursor.peek_next() == Some(b'/') {
                        self.cursor.bump();
                        self.cursor.bump();
                        self.mode = Mode::Normal;
                    } else {
                        self.cursor.bump();
                    }
                }
                Mode::StringLiteral { .. } => self.literal(c, b'"'),
                Mode::CharLiteral { .. } => self.literal(c, b'\''),
            }
        }

        match self.mode {
            Mode::StringLiteral { opened } | Mode::CharLiteral { opened } => {
                Err(ScanError::UnterminatedLiteral { line: opened })
            }
            Mode::BlockComment { opened } => Err(ScanError::UnterminatedComment { line: opened }),
            Mode::Normal | Mode::LineComment => Ok(None),
        }
    }

    fn normal(&mut self, c: u8) -> Result<Option<IncludeDirective>, ScanError> {
        match c {
            b'\n' => {
                self.cursor.bump();
                self.at_line_start = true;
            }
            c if is_blank(c) => {
                self.cursor.bump();
            }
            b'/' if self.cursor.peek_next() == Some(b'/') => {
                self.cursor.bump();
                self.cursor.bump();
                self.mode = Mode::LineComment;
            }
            b'/' if self.cursor.peek_next() == Some(b'*') => {
                let opened = self.cursor.line;
                self.cursor.bump();
                self.cursor.bump();
                self.mode = Mode::BlockComment { opened };
            }
            b'"' => {
                let opened = self.cursor.line;
                self.cursor.bump();
                self.at_line_start = false;
                self.mode = Mode::StringLiteral { opened };
            }
            b'\'' => {
                let opened = self.cursor.line;
                self.cursor.bump();
                self.at_line_start = false;
                self.mode = Mode::CharLiteral { opened };
            }
            b'#' if self.at_line_start => {
                self.at_line_start = false;
                return self.directive();
            }
            _ => {
                self.cursor.bump();
                self.at_line_start = false;
            }
        }
        Ok(None)
    }

    fn literal(&mut self, c: u8, close: u8) {
        match c {
            b'\\' => {
                self.cursor.bump();
                self.cursor.bump();
            }
            c if c == close => {
                self.cursor.bump();
                self.mode = Mode::Normal;
            }
            _ => {
                self.cursor.bump();
            }
        }
    }

    /// Parse a directive whose `#` is under the cursor.
    ///
    /// Returns `Ok(None)` for directives that are not a literal include;
    /// the rest of their line is left to Normal mode.
    fn directive(&mut self) -> Result<Option<IncludeDirective>, ScanError> {
        let start = self.cursor.offset();
        let line = self.cursor.line;
        self.cursor.bump();

        self.skip_blanks()?;
        let keyword = self.identifier();
        if keyword != "include" {
            trace!(file = self.name(), line, keyword = %keyword, "not an include directive");
            return Ok(None);
        }

        self.skip_blanks()?;
        let kind = match self.cursor.peek() {
            Some(b'"') => IncludeKind::Quoted,
            Some(b'<') => IncludeKind::AngleBracket,
            _ => {
                debug!(file = self.name(), line, "skipping #include without a literal path");
                return Ok(None);
            }
        };
        self.cursor.bump();

        let target = self.path(kind, line)?;
        if target.is_empty() {
            debug!(file = self.name(), line, "skipping #include with an empty path");
            return Ok(None);
        }

        // `pos` sits just past the closing delimiter; trailing splices stay out.
        let span = Span::new(start, self.cursor.pos);
        trace!(file = self.name(), line, target = %target, "found include");
        Ok(Some(IncludeDirective::new(target, kind, line, span)))
    }

    /// Skip spaces, tabs and block comments inside a directive line
    fn skip_blanks(&mut self) -> Result<(), ScanError> {
        while let Some(c) = self.cursor.peek() {
            if is_blank(c) {
                self.cursor.bump();
            } else if c == b'/' && self.cursor.peek_next() == Some(b'*') {
                let opened = self.cursor.line;
                self.cursor.bump();
                self.cursor.bump();
                loop {
                    match self.cursor.bump() {
                        None => return Err(ScanError::UnterminatedComment { line: opened }),
                        Some(b'*') if self.cursor.peek() == Some(b'/') => {
                            self.cursor.bump();
                            break;
                        }
                        Some(_) => {}
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.cursor.peek() {
            if !is_ident(c) {
                break;
            }
            ident.push(c as char);
            self.cursor.bump();
        }
        ident
    }

    /// Capture a path up to its closing delimiter on the same logical line
    fn path(&mut self, kind: IncludeKind, line: u32) -> Result<String, ScanError> {
        let close = match kind {
            IncludeKind::Quoted => b'"',
            IncludeKind::AngleBracket => b'>',
        };

        let mut target = Vec::new();
        loop {
            match self.cursor.peek() {
                None | Some(b'\n') => return Err(ScanError::MalformedDirective { line }),
                Some(b'\\') if kind == IncludeKind::Quoted => {
                    target.push(b'\\');
                    self.cursor.bump();
                    match self.cursor.peek() {
                        None | Some(b'\n') => return Err(ScanError::MalformedDirective { line }),
                        Some(c) => {
                            target.push(c);
                            self.cursor.bump();
                        }
                    }
                }
                Some(c) if c == close => {
                    self.cursor.bump();
                    break;
                }
                Some(c) => {
                    target.push(c);
                    self.cursor.bump();
                }
            }
        }

        Ok(String::from_utf8_lossy(&target).into_owned())
    }
}

impl Iterator for IncludeScanner<'_> {
    type Item = Result<IncludeDirective, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(directive)) => Some(Ok(directive)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                debug!(file = self.name(), error = %err, "scan stopped");
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for IncludeScanner<'_> {}

/// Lazily scan `source` for include directives
pub fn scan_includes(source: &str) -> IncludeScanner<'_> {
    IncludeScanner::new(source)
}

/// Collect every include directive in `source`, stopping at the first error
pub fn extract_includes(source: &str) -> Result<Vec<IncludeDirective>, ScanError> {
    scan_includes(source).collect()
}
