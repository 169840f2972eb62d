use super::token::{Symbol, Token};

/// The lexical collaborator of the [`Cursor`](crate::cursor::Cursor).
///
/// Given source text and a byte offset, returns the token starting there, or
/// [`Token::End`] when no input remains.
///
/// Implementations must be total and pure: for a fixed `(text, offset)` pair
/// they always return the same token, and they never return a zero-length
/// token other than `End`. The cursor caches tokens by offset and relies on
/// both properties.
pub trait Tokenizer {
    /// Return the token that starts at `offset` in `text`.
    fn token_at(&self, text: &str, offset: usize) -> Token;
}

impl<F> Tokenizer for F
where
    F: Fn(&str, usize) -> Token,
{
    fn token_at(&self, text: &str, offset: usize) -> Token {
        self(text, offset)
    }
}

/// A scanner rule: returns the byte length it matches at a position, if any.
type ScanRule = fn(&Scanner<'_>, usize) -> Option<usize>;

/// [§ 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex)
///
/// Scanner rules in declaration order. The longest match wins; on a tie the
/// rule listed first wins.
const RULES: &[(Symbol, ScanRule)] = &[
    // "[ \t\r\n\f]+     return S;"
    (Symbol::S, |s, p| s.whitespace(p).filter(|&n| n > 0)),
    (Symbol::Includes, |s, p| s.literal(p, "~=")),
    (Symbol::DashMatch, |s, p| s.literal(p, "|=")),
    (Symbol::PrefixMatch, |s, p| s.literal(p, "^=")),
    (Symbol::SuffixMatch, |s, p| s.literal(p, "$=")),
    (Symbol::SubstringMatch, |s, p| s.literal(p, "*=")),
    (Symbol::Ident, |s, p| s.ident(p)),
    (Symbol::String, |s, p| s.string(p)),
    // "{ident}"("       return FUNCTION;"
    (Symbol::Function, |s, p| {
        let n = s.ident(p)?;
        s.then_literal(p, n, "(")
    }),
    (Symbol::Number, |s, p| s.num(p)),
    // "#"{name}         return HASH;"
    (Symbol::Hash, |s, p| {
        let n = s.literal(p, "#")?;
        Some(n + s.name(p + n)?)
    }),
    // "{w}"+"           return PLUS;"
    (Symbol::Plus, |s, p| s.after_whitespace(p, "+")),
    (Symbol::Greater, |s, p| s.after_whitespace(p, ">")),
    (Symbol::Comma, |s, p| s.after_whitespace(p, ",")),
    (Symbol::Tilde, |s, p| s.after_whitespace(p, "~")),
    // ":"{N}{O}{T}"("   return NOT;"
    (Symbol::Not, |s, p| {
        let mut n = s.literal(p, ":")?;
        for letter in ['n', 'o', 't'] {
            n += s.letter(p + n, letter)?;
        }
        s.then_literal(p, n, "(")
    }),
    // "@{ident}         return ATKEYWORD;"
    (Symbol::AtKeyword, |s, p| {
        let n = s.literal(p, "@")?;
        Some(n + s.ident(p + n)?)
    }),
    (Symbol::Invalid, |s, p| s.invalid(p)),
    // "{num}%           return PERCENTAGE;"
    (Symbol::Percentage, |s, p| {
        let n = s.num(p)?;
        s.then_literal(p, n, "%")
    }),
    // "{num}{ident}     return DIMENSION;"
    (Symbol::Dimension, |s, p| {
        let n = s.num(p)?;
        Some(n + s.ident(p + n)?)
    }),
    (Symbol::Cdo, |s, p| s.literal(p, "<!--")),
    (Symbol::Cdc, |s, p| s.literal(p, "-->")),
    (Symbol::Comment, |s, p| s.comment(p)),
];

/// [§ 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex)
///
/// Selectors Level 3 tokenizer. Stateless: every call scans a single token
/// directly from the text, so it can be shared freely between cursors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Css3Tokenizer;

impl Css3Tokenizer {
    /// Create a new tokenizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenize a whole string, returning each token with its byte offset.
    ///
    /// Comment tokens are included. The trailing [`Token::End`] is not.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<(usize, Token)> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        loop {
            let token = self.token_at(text, offset);
            if token.is_end() {
                return tokens;
            }
            let len = token.len();
            tokens.push((offset, token));
            offset += len;
        }
    }
}

impl Tokenizer for Css3Tokenizer {
    fn token_at(&self, text: &str, offset: usize) -> Token {
        if offset >= text.len() || !text.is_char_boundary(offset) {
            return Token::End;
        }
        let scanner = Scanner::new(text);

        let mut best: Option<(Symbol, usize)> = None;
        for &(symbol, rule) in RULES {
            let longer = rule(&scanner, offset)
                .filter(|&len| len > 0 && best.is_none_or(|(_, longest)| len > longest));
            if let Some(len) = longer {
                best = Some((symbol, len));
            }
        }

        match best {
            Some((symbol, len)) => Token::symbol(symbol, &text[offset..offset + len]),
            // ".                return *yytext;"
            None => text[offset..]
                .chars()
                .next()
                .map_or(Token::End, Token::Literal),
        }
    }
}

/// Byte-level matcher for the scanner's macro definitions.
///
/// Every method takes a byte position and returns the length it matches
/// there. Positions always sit on `char` boundaries because every multi-byte
/// sequence is consumed whole as a `nonascii` code point.
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
}

impl<'a> Scanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
        }
    }

    fn byte(&self, p: usize) -> Option<u8> {
        self.bytes.get(p).copied()
    }

    fn literal(&self, p: usize, expected: &str) -> Option<usize> {
        self.bytes
            .get(p..)
            .filter(|rest| rest.starts_with(expected.as_bytes()))
            .map(|_| expected.len())
    }

    /// `n` bytes already matched at `p`, followed by `expected`.
    fn then_literal(&self, p: usize, n: usize, expected: &str) -> Option<usize> {
        Some(n + self.literal(p + n, expected)?)
    }

    /// `w  [ \t\r\n\f]*`
    fn whitespace(&self, p: usize) -> Option<usize> {
        Some(
            self.bytes
                .get(p..)?
                .iter()
                .take_while(|&&b| is_whitespace(b))
                .count(),
        )
    }

    /// `{w}` followed by a single delimiter.
    fn after_whitespace(&self, p: usize, delimiter: &str) -> Option<usize> {
        let n = self.whitespace(p)?;
        self.then_literal(p, n, delimiter)
    }

    /// `nonascii  [^\0-\177]`
    fn nonascii(&self, p: usize) -> Option<usize> {
        if self.byte(p)? < 0x80 {
            return None;
        }
        self.text.get(p..)?.chars().next().map(char::len_utf8)
    }

    /// ```text
    /// unicode   \\[0-9a-f]{1,6}(\r\n|[ \n\r\t\f])?
    /// escape    {unicode}|\\[^\n\r\f0-9a-f]
    /// ```
    fn escape(&self, p: usize) -> Option<usize> {
        if self.byte(p)? != b'\\' {
            return None;
        }
        let hex = self.bytes[p + 1..]
            .iter()
            .take(6)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if hex > 0 {
            let end = p + 1 + hex;
            let trailing = if self.literal(end, "\r\n").is_some() {
                2
            } else {
                usize::from(self.byte(end).is_some_and(is_whitespace))
            };
            return Some(1 + hex + trailing);
        }
        match self.text.get(p + 1..)?.chars().next()? {
            '\n' | '\r' | '\x0C' => None,
            c => Some(1 + c.len_utf8()),
        }
    }

    /// `nmstart   [_a-z]|{nonascii}|{escape}`
    fn nmstart(&self, p: usize) -> Option<usize> {
        match self.byte(p)? {
            b'_' => Some(1),
            b if b.is_ascii_alphabetic() => Some(1),
            _ => self.nonascii(p).or_else(|| self.escape(p)),
        }
    }

    /// `nmchar    [_a-z0-9-]|{nonascii}|{escape}`
    fn nmchar(&self, p: usize) -> Option<usize> {
        match self.byte(p)? {
            b'-' | b'_' => Some(1),
            b if b.is_ascii_alphanumeric() => Some(1),
            _ => self.nonascii(p).or_else(|| self.escape(p)),
        }
    }

    fn nmchars(&self, p: usize) -> usize {
        let mut n = 0;
        while let Some(len) = self.nmchar(p + n) {
            n += len;
        }
        n
    }

    /// `ident     [-]?{nmstart}{nmchar}*`
    fn ident(&self, p: usize) -> Option<usize> {
        let dash = usize::from(self.byte(p) == Some(b'-'));
        let start = self.nmstart(p + dash)?;
        let n = dash + start;
        Some(n + self.nmchars(p + n))
    }

    /// `name      {nmchar}+`
    fn name(&self, p: usize) -> Option<usize> {
        Some(self.nmchars(p)).filter(|&n| n > 0)
    }

    /// `num       [0-9]+|[0-9]*\.[0-9]+`
    fn num(&self, p: usize) -> Option<usize> {
        let digits = |from: usize| {
            self.bytes
                .get(from..)
                .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
        };
        let int = digits(p);
        if self.byte(p + int) == Some(b'.') {
            let frac = digits(p + int + 1);
            if frac > 0 {
                return Some(int + 1 + frac);
            }
        }
        Some(int).filter(|&n| n > 0)
    }

    /// Scan a quoted string body. Returns the matched length and whether the
    /// closing quote was reached.
    ///
    /// ```text
    /// string1   \"([^\n\r\f\\"]|\\{nl}|{nonascii}|{escape})*\"
    /// invalid1  \"([^\n\r\f\\"]|\\{nl}|{nonascii}|{escape})*
    /// nl        \n|\r\n|\r|\f
    /// ```
    fn quoted(&self, p: usize) -> Option<(usize, bool)> {
        let quote = self.byte(p).filter(|&b| b == b'"' || b == b'\'')?;
        let mut n = 1;
        loop {
            let at = p + n;
            match self.byte(at) {
                None | Some(b'\n' | b'\r' | b'\x0C') => return Some((n, false)),
                Some(b) if b == quote => return Some((n + 1, true)),
                Some(b'\\') => {
                    let newline = if self.literal(at + 1, "\r\n").is_some() {
                        Some(2)
                    } else {
                        matches!(self.byte(at + 1), Some(b'\n' | b'\r' | b'\x0C')).then_some(1)
                    };
                    match newline.map(|len| len + 1).or_else(|| self.escape(at)) {
                        Some(len) => n += len,
                        None => return Some((n, false)),
                    }
                }
                Some(_) => {
                    n += self.text.get(at..)?.chars().next()?.len_utf8();
                }
            }
        }
    }

    /// `string    {string1}|{string2}`
    fn string(&self, p: usize) -> Option<usize> {
        self.quoted(p)
            .and_then(|(n, terminated)| terminated.then_some(n))
    }

    /// `invalid   {invalid1}|{invalid2}`
    fn invalid(&self, p: usize) -> Option<usize> {
        self.quoted(p).map(|(n, terminated)| if terminated { n - 1 } else { n })
    }

    /// `\/\*[^*]*\*+([^/*][^*]*)*\/`
    fn comment(&self, p: usize) -> Option<usize> {
        let n = self.literal(p, "/*")?;
        let body = self.text.get(p + n..)?;
        body.find("*/").map(|end| n + end + 2)
    }

    /// A case-insensitive letter, possibly written as an escape.
    ///
    /// ```text
    /// N         n|\\0{0,4}(4e|6e)(\r\n|[ \t\r\n\f])?|\\n
    /// ```
    fn letter(&self, p: usize, letter: char) -> Option<usize> {
        let b = self.byte(p)?;
        if char::from(b).eq_ignore_ascii_case(&letter) {
            return Some(1);
        }
        if b != b'\\' {
            return None;
        }
        if self
            .byte(p + 1)
            .is_some_and(|next| char::from(next).eq_ignore_ascii_case(&letter))
            && !letter.is_ascii_hexdigit()
        {
            return Some(2);
        }

        let zeros = self.bytes[p + 1..]
            .iter()
            .take(4)
            .take_while(|&&b| b == b'0')
            .count();
        let at = p + 1 + zeros;
        let code = self.text.get(at..at + 2)?;
        let upper = format!("{:x}", u32::from(letter.to_ascii_uppercase()));
        let lower = format!("{:x}", u32::from(letter.to_ascii_lowercase()));
        if !code.eq_ignore_ascii_case(&upper) && !code.eq_ignore_ascii_case(&lower) {
            return None;
        }
        let end = at + 2;
        let trailing = if self.literal(end, "\r\n").is_some() {
            2
        } else {
            usize::from(self.byte(end).is_some_and(is_whitespace))
        };
        Some(end - p + trailing)
    }
}

/// `[ \t\r\n\f]`
const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C')
}
