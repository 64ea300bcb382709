use crate::parsers::entities::decode_entities;
use std::io::{BufRead, ErrorKind};
use std::iter::FusedIterator;

/// Elements whose content is a single run of text up to the matching end tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes"];

/// Raw text elements whose content still has character references decoded
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["title", "textarea"];

/// Most bytes kept from one text run, name, attribute value or opaque body.
/// Anything past it is still scanned, then dropped.
pub const MAX_CAPTURE: usize = 64 * 1024;

/// A start tag such as `<link rel="icon" href="/favicon.ico">`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lowercased tag name
    pub name: String,

    /// Attributes in document order. Keys are lowercased and unique: when a key
    /// repeats inside one tag, the first occurrence wins.
    pub attrs: Vec<(String, String)>,

    /// Whether the tag ended with `/>`
    pub self_closing: bool,
}

impl StartTag {
    /// Looks up an attribute value by its lowercase key
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One structural unit recognized during the forward scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag(StartTag),
    /// Lowercased name of an end tag
    EndTag(String),
    /// A run of character data, entity-decoded unless it came from a raw text element
    Text(String),
    /// Comments, doctypes, processing instructions and bogus markup
    Opaque(String),
}

enum ContentMode {
    Data,
    RawText { end_tag: String, decode: bool },
    Plaintext,
}

/// Result of scanning whatever follows a `<` in data content
enum Markup {
    Token(Token),
    /// Markup that produces nothing, such as `</>`
    Skipped,
    /// Not markup after all; the bytes are character data
    Literal(&'static [u8]),
    /// The stream ended inside a tag
    Truncated,
}

/// Lazy HTML tokenizer over any buffered byte source.
///
/// The scanner is forward-only and never buffers more than the token it is
/// building plus one token of lookahead, and a token never holds more than
/// [`MAX_CAPTURE`] bytes of content. It never fails: read errors and
/// truncated input end the sequence, and anything it cannot make sense of is
/// either character data or an [`Token::Opaque`] token.
///
/// ```
/// use link_preview::parsers::scanner::{Scanner, Token};
///
/// let tokens: Vec<Token> = Scanner::new("<p>hi".as_bytes()).collect();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1], Token::Text("hi".to_string()));
/// ```
pub struct Scanner<R> {
    reader: R,
    mode: ContentMode,
    pending: Option<Token>,
    read_failed: bool,
    done: bool,
}

impl<R: BufRead> Scanner<R> {
    /// Creates a scanner positioned at the start of `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            mode: ContentMode::Data,
            pending: None,
            read_failed: false,
            done: false,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        match std::mem::replace(&mut self.mode, ContentMode::Data) {
            ContentMode::Data => self.scan_data(),
            ContentMode::RawText { end_tag, decode } => self.scan_raw_text(&end_tag, decode),
            ContentMode::Plaintext => {
                self.mode = ContentMode::Plaintext;
                self.scan_plaintext()
            }
        }
    }

    //
    // Byte source
    //

    fn peek(&mut self) -> Option<u8> {
        if self.read_failed {
            return None;
        }

        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    ::log::debug!("Scanner stopping on read error: {}", e);
                    self.read_failed = true;
                    return None;
                }
            }
        }
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.reader.consume(1);
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Consumes up to and including `stop`, returning the bytes before it.
    /// The flag is false when the stream ended first.
    fn read_until(&mut self, stop: u8) -> (Vec<u8>, bool) {
        let mut bytes = Vec::new();
        while let Some(b) = self.bump() {
            if b == stop {
                return (bytes, true);
            }
            push_capped(&mut bytes, b);
        }
        (bytes, false)
    }

    //
    // Content states
    //

    fn scan_data(&mut self) -> Option<Token> {
        let mut text = Vec::new();

        while let Some(b) = self.bump() {
            if b != b'<' {
                push_capped(&mut text, b);
                continue;
            }

            match self.scan_markup() {
                Markup::Token(token) => {
                    if text.is_empty() {
                        return Some(token);
                    }
                    // Flush the text first, the tag comes out on the next call
                    self.pending = Some(token);
                    break;
                }
                Markup::Skipped => {}
                Markup::Literal(bytes) => bytes.iter().for_each(|&b| push_capped(&mut text, b)),
                Markup::Truncated => {
                    ::log::debug!("Input ended inside a tag, dropping it");
                    break;
                }
            }
        }

        if text.is_empty() {
            None
        } else {
            Some(Token::Text(decode_text(&text, true)))
        }
    }

    fn scan_raw_text(&mut self, end_tag: &str, decode: bool) -> Option<Token> {
        let closer_len = end_tag.len() + 2;
        let mut text = Vec::new();
        // The closer is matched against the latest bytes, which outlive the cap
        let mut recent = Vec::with_capacity(closer_len);
        let mut seen = 0;

        while let Some(b) = self.bump() {
            push_capped(&mut text, b);
            if recent.len() == closer_len {
                recent.remove(0);
            }
            recent.push(b);
            seen += 1;

            if recent.len() == closer_len
                && ends_with_closer(&recent, end_tag)
                && self.peek().is_none_or(is_tag_terminator)
            {
                text.truncate(seen - closer_len);
                self.read_until(b'>');
                self.pending = Some(Token::EndTag(end_tag.to_string()));
                break;
            }
        }

        if text.is_empty() {
            self.pending.take()
        } else {
            Some(Token::Text(decode_text(&text, decode)))
        }
    }

    fn scan_plaintext(&mut self) -> Option<Token> {
        let mut text = Vec::new();
        while let Some(b) = self.bump() {
            push_capped(&mut text, b);
        }

        if text.is_empty() {
            None
        } else {
            Some(Token::Text(decode_text(&text, false)))
        }
    }

    //
    // Markup
    //

    fn scan_markup(&mut self) -> Markup {
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => self.scan_start_tag(),
            Some(b'/') => {
                self.bump();
                self.scan_end_tag()
            }
            Some(b'!') => {
                self.bump();
                self.scan_declaration()
            }
            Some(b'?') => {
                self.bump();
                let (body, _) = self.read_until(b'>');
                Markup::Token(Token::Opaque(decode_text(&body, false)))
            }
            _ => Markup::Literal(b"<"),
        }
    }

    fn scan_start_tag(&mut self) -> Markup {
        let mut tag = StartTag {
            name: self.read_tag_name(),
            attrs: Vec::new(),
            self_closing: false,
        };

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Markup::Truncated,
                Some(b'>') => {
                    self.bump();
                    break;
                }
                Some(b'/') => {
                    self.bump();
                    if self.peek() == Some(b'>') {
                        self.bump();
                        tag.self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let Some((key, value)) = self.scan_attribute() else {
                        return Markup::Truncated;
                    };
                    if tag.attr(&key).is_some() {
                        ::log::trace!("Ignoring duplicate attribute {} on <{}>", key, tag.name);
                    } else {
                        tag.attrs.push((key, value));
                    }
                }
            }
        }

        self.mode = content_mode_for(&tag.name);
        Markup::Token(Token::StartTag(tag))
    }

    /// Reads one attribute. `None` means the stream ended inside a quoted value.
    fn scan_attribute(&mut self) -> Option<(String, String)> {
        // The first byte always belongs to the name, even when it is `=`
        let mut name = Vec::new();
        name.extend(self.bump());
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || matches!(b, b'/' | b'>' | b'=') {
                break;
            }
            push_capped(&mut name, b);
            self.bump();
        }
        let name = decode_text(&name, false).to_ascii_lowercase();

        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Some((name, String::new()));
        }
        self.bump();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.bump();
                let (value, closed) = self.read_until(quote);
                if !closed {
                    return None;
                }
                value
            }
            _ => {
                let mut value = Vec::new();
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    push_capped(&mut value, b);
                    self.bump();
                }
                value
            }
        };

        Some((name, decode_text(&value, true)))
    }

    fn scan_end_tag(&mut self) -> Markup {
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => {
                let name = self.read_tag_name();
                // Attributes on end tags carry nothing, skip them
                if !self.read_until(b'>').1 {
                    return Markup::Truncated;
                }
                Markup::Token(Token::EndTag(name))
            }
            Some(b'>') => {
                self.bump();
                Markup::Skipped
            }
            None => Markup::Literal(b"</"),
            Some(_) => {
                let (body, _) = self.read_until(b'>');
                Markup::Token(Token::Opaque(decode_text(&body, false)))
            }
        }
    }

    /// Comments (`<!-- -->`), doctypes and other `<!` declarations
    fn scan_declaration(&mut self) -> Markup {
        let mut body = Vec::new();
        let mut comment = false;
        let mut last_two = [0u8; 2];

        while let Some(b) = self.bump() {
            // A `>` inside a comment is just content
            if b == b'>' && (!comment || last_two == *b"--") {
                break;
            }
            push_capped(&mut body, b);
            last_two = [last_two[1], b];
            if body.len() == 2 {
                comment = body == b"--";
            }
        }

        Markup::Token(Token::Opaque(decode_text(&body, false)))
    }

    fn read_tag_name(&mut self) -> String {
        let mut name = Vec::new();
        while let Some(b) = self.peek() {
            if is_tag_terminator(b) {
                break;
            }
            push_capped(&mut name, b.to_ascii_lowercase());
            self.bump();
        }
        decode_text(&name, false)
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let token = self.next_token();
        if token.is_none() {
            self.done = true;
        }
        token
    }
}

impl<R: BufRead> FusedIterator for Scanner<R> {}

fn content_mode_for(tag_name: &str) -> ContentMode {
    if ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag_name) {
        ContentMode::RawText {
            end_tag: tag_name.to_string(),
            decode: true,
        }
    } else if RAW_TEXT_ELEMENTS.contains(&tag_name) {
        ContentMode::RawText {
            end_tag: tag_name.to_string(),
            decode: false,
        }
    } else if tag_name == "plaintext" {
        ContentMode::Plaintext
    } else {
        ContentMode::Data
    }
}

fn is_tag_terminator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

/// Whether `buf` ends with `</` followed by `name`, ignoring ASCII case
fn ends_with_closer(buf: &[u8], name: &str) -> bool {
    let tail = &buf[buf.len() - name.len() - 2..];
    tail.starts_with(b"</") && tail[2..].eq_ignore_ascii_case(name.as_bytes())
}

fn push_capped(buf: &mut Vec<u8>, byte: u8) {
    if buf.len() < MAX_CAPTURE {
        buf.push(byte);
    }
}

/// Converts scanned bytes to a string, replacing invalid UTF-8 with U+FFFD
fn decode_text(bytes: &[u8], entities: bool) -> String {
    let text = String::from_utf8_lossy(bytes);
    if entities {
        decode_entities(&text).into_owned()
    } else {
        text.into_owned()
    }
}
