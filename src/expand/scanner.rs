//! Recursive descent scanner for knitting shorthand.
//!
//! The scanner walks the input left to right and recognises, in order:
//!
//! | Construct          | Example            | Result                          |
//! |--------------------|--------------------|---------------------------------|
//! | star group         | `*k, p* 4x`        | inner expansion repeated N times |
//! | bracket group      | `[k, yo] 3 times`  | inner expansion repeated N times |
//! | paren group        | `(p, k) x 2`       | inner expansion repeated N times |
//! | separator          | `,` `;` whitespace | nothing                         |
//! | literal run        | `k3`, `P2`         | `k` or `p`, N times             |
//! | primitive          | `ssk`, `M1L`       | one lower-cased token           |
//! | anything else      | `sl1`, `kfb`       | the fragment, verbatim          |
//!
//! A multiplier is `N unit` or `unit N` where unit is `x`, `times` or `회`.
//! Korean words straight after `N unit` (`2회씩`) are part of it.
//! A group without one expands once. Unclosed or stray delimiters are kept
//! as tokens of their own, so malformed input never fails. Those tokens do
//! not survive a second expansion: joining `["[", "]"]` back up gives
//! `"[, ]"`, an empty group.
//!
//! Counts above [`MAX_REPEAT`] are not counts: `k99999` passes through as a
//! fragment and `[k] 99999x` expands the group once, leaving `99999x` behind.
//! Nested groups still multiply their counts.

use super::token::Token;

/// The largest repeat count or literal run length accepted.
pub const MAX_REPEAT: usize = 10_000;

const UNITS: [&str; 3] = ["times", "x", "회"];

/// Expand `chars` into a flat token sequence.
pub(super) fn scan(chars: &[char]) -> Vec<Token> {
    Scanner {
        chars,
        pos: 0,
        tokens: Vec::new(),
    }
    .run()
}

struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
    tokens: Vec<Token>,
}

impl Scanner<'_> {
    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.peek() {
            match c {
                c if is_separator(c) => self.pos += 1,
                '*' => self.star_group(),
                '[' => self.bracket_group('[', ']'),
                '(' => self.bracket_group('(', ')'),
                ']' | ')' => {
                    self.tokens.push(Token::new(c));
                    self.pos += 1;
                }
                _ => self.fragment(),
            }
        }
        self.tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// `* INNER * [multiplier]`.
    ///
    /// Closes at the first following `*` that carries a multiplier, or else
    /// at the first following `*`.
    fn star_group(&mut self) {
        let open = self.pos;
        let closers: Vec<usize> = (open + 1..self.chars.len())
            .filter(|&i| self.chars[i] == '*')
            .collect();

        let counted = closers
            .iter()
            .find_map(|&close| multiplier_at(self.chars, close + 1).map(|m| (close, m)));
        match counted {
            Some((close, (times, end))) => self.repeat(open + 1, close, times, end),
            None => match closers.first() {
                Some(&close) => self.repeat(open + 1, close, 1, close + 1),
                None => {
                    self.tokens.push(Token::new('*'));
                    self.pos += 1;
                }
            },
        }
    }

    /// `[ INNER ] [multiplier]` or `( INNER ) [multiplier]`, closing at the
    /// balanced delimiter.
    fn bracket_group(&mut self, open_char: char, close_char: char) {
        let open = self.pos;
        let mut depth = 0usize;
        let mut close = None;
        for (i, &c) in self.chars.iter().enumerate().skip(open) {
            if c == open_char {
                depth += 1;
            } else if c == close_char {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
        }

        match close {
            Some(close) => {
                let (times, end) = multiplier_at(self.chars, close + 1).unwrap_or((1, close + 1));
                self.repeat(open + 1, close, times, end);
            }
            None => {
                self.tokens.push(Token::new(open_char));
                self.pos += 1;
            }
        }
    }

    fn repeat(&mut self, inner_start: usize, inner_end: usize, times: usize, resume: usize) {
        if times > 0 {
            let inner = scan(&self.chars[inner_start..inner_end]);
            for _ in 0..times {
                self.tokens.extend(inner.iter().cloned());
            }
        }
        self.pos = resume;
    }

    /// A run of characters up to the next separator or delimiter.
    fn fragment(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_separator(c) || is_delimiter(c) {
                break;
            }
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();

        match literal_run(&text) {
            Some((stitch, n)) => self
                .tokens
                .extend(std::iter::repeat_n(Token::from(stitch), n)),
            None => self.tokens.push(Token::from_fragment(&text)),
        }
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '*' | '[' | ']' | '(' | ')')
}

/// `k3` or `P12`: a knit or purl stitch repeated.
fn literal_run(text: &str) -> Option<(&'static str, usize)> {
    let mut chars = text.chars();
    let stitch = match chars.next()? {
        'k' | 'K' => "k",
        'p' | 'P' => "p",
        _ => return None,
    };
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse()
        .ok()
        .filter(|&n| n <= MAX_REPEAT)
        .map(|n| (stitch, n))
}

/// Parse a repeat multiplier starting at `start`, allowing leading
/// whitespace. Returns the count and the position just past it.
fn multiplier_at(chars: &[char], start: usize) -> Option<(usize, usize)> {
    let i = skip_space(chars, start);
    if let Some((n, after)) = number_at(chars, i) {
        let j = skip_space(chars, after);
        return unit_at(chars, j).map(|end| (n, skip_suffix(chars, end)));
    }
    let after = unit_at(chars, i)?;
    let j = skip_space(chars, after);
    number_at(chars, j)
}

/// Korean particles after a count (`씩` in `2회씩`, `반복` in `2회반복`)
/// belong to the multiplier.
fn skip_suffix(chars: &[char], mut i: usize) -> usize {
    while chars
        .get(i)
        .is_some_and(|c| c.is_alphabetic() && !c.is_ascii())
    {
        i += 1;
    }
    i
}

fn skip_space(chars: &[char], mut i: usize) -> usize {
    while chars.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    i
}

/// A run of ASCII digits. `None` if there are none or the value is above
/// [`MAX_REPEAT`].
fn number_at(chars: &[char], start: usize) -> Option<(usize, usize)> {
    let end = start
        + chars[start.min(chars.len())..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
    if end == start {
        return None;
    }
    let digits: String = chars[start..end].iter().collect();
    digits
        .parse()
        .ok()
        .filter(|&n| n <= MAX_REPEAT)
        .map(|n| (n, end))
}

/// A repeat unit, case-insensitive. It may not run on into an ASCII word
/// (`2xk`), but may be followed by Korean (`2회씩`, `2회반복`).
fn unit_at(chars: &[char], start: usize) -> Option<usize> {
    UNITS.iter().find_map(|unit| {
        let end = start + unit.chars().count();
        let candidate = chars.get(start..end)?;
        let matches = candidate
            .iter()
            .zip(unit.chars())
            .all(|(c, u)| c.to_lowercase().eq(std::iter::once(u)));
        let bounded = !chars.get(end).is_some_and(|c| c.is_ascii_alphabetic());
        (matches && bounded).then_some(end)
    })
}
