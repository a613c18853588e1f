//! Forward-only token cursor.
//!
//! A page's text content is flattened into fragments (one per run of text
//! between tags). Fields are found by seeking forward to their label and
//! reading the fragment that follows. Seeking never moves backwards, so the
//! order in which labels are sought must match the page.

use statline_foundation::{Error, ErrorContext, Result};

use crate::text::{TAG_PATTERN, decode_entities, normalize_whitespace};

/// A cursor over the text fragments of a page.
///
/// The *current* token is the one most recently consumed. [`seek`] tests the
/// current token before advancing, so a label that was just consumed by a
/// previous step is matched again without moving.
///
/// [`seek`]: TokenStream::seek
#[derive(Clone, Debug, Default)]
pub struct TokenStream {
    tokens: Vec<String>,
    /// Number of tokens consumed; the current token is `tokens[cursor - 1]`.
    cursor: usize,
}

impl TokenStream {
    /// Creates a stream over already-flattened fragments.
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Flattens raw markup into a stream.
    ///
    /// Tags become separators, character references are decoded, whitespace
    /// runs collapse, and empty fragments are dropped.
    #[must_use]
    pub fn from_markup(raw: &str) -> Self {
        let tokens = TAG_PATTERN
            .split(raw)
            .map(|fragment| normalize_whitespace(&decode_entities(fragment)))
            .filter(|fragment| !fragment.is_empty());
        Self::new(tokens)
    }

    /// Returns the number of tokens in the stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of tokens consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns true if every token has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Moves the cursor back to the start of the stream.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// All tokens, consumed or not.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The most recently consumed token.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map(String::as_str)
    }

    /// The next token, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the stream is exhausted.
    pub fn next_token(&mut self) -> Result<&str> {
        if self.is_exhausted() {
            return Err(self.exhausted("<next token>"));
        }
        self.cursor += 1;
        Ok(&self.tokens[self.cursor - 1])
    }

    /// Skips `count` tokens.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if fewer than `count` tokens remain.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.next_token()?;
        }
        Ok(())
    }

    /// Advances until the current token starts with `label`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` naming `label` if the stream runs out
    /// first. The stream is left exhausted.
    pub fn seek(&mut self, label: &str) -> Result<&str> {
        self.seek_by(label, |token| token.starts_with(label))
    }

    /// Advances until the current token satisfies `predicate`.
    ///
    /// `label` only describes what was sought, for the error.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the stream runs out first. The stream is
    /// left exhausted.
    pub fn seek_by<P>(&mut self, label: &str, predicate: P) -> Result<&str>
    where
        P: FnMut(&str) -> bool,
    {
        match self.position_of(predicate) {
            Some(cursor) => {
                self.cursor = cursor;
                Ok(&self.tokens[cursor - 1])
            }
            None => {
                self.cursor = self.tokens.len();
                Err(self.exhausted(label))
            }
        }
    }

    /// Advances until the current token starts with any of `labels`.
    ///
    /// Returns the index into `labels` of the label that matched.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if none of the labels is found.
    pub fn seek_any(&mut self, labels: &[&str]) -> Result<usize> {
        let description = labels.join("|");
        let token = self.seek_by(&description, |token| {
            labels.iter().any(|label| token.starts_with(label))
        })?;
        Ok(labels
            .iter()
            .position(|label| token.starts_with(label))
            .unwrap_or_default())
    }

    /// Like [`seek`](TokenStream::seek), but leaves the cursor untouched and
    /// returns `None` when the label is absent.
    pub fn try_seek(&mut self, label: &str) -> Option<&str> {
        let cursor = self.position_of(|token| token.starts_with(label))?;
        self.cursor = cursor;
        Some(&self.tokens[cursor - 1])
    }

    /// Like [`try_seek`](TokenStream::try_seek), but only matches if `label`
    /// comes before the first token starting with `bound`.
    pub fn try_seek_before(&mut self, label: &str, bound: &str) -> Option<&str> {
        let found = self.position_of(|token| token.starts_with(label))?;
        if self
            .position_of(|token| token.starts_with(bound))
            .is_some_and(|limit| limit < found)
        {
            return None;
        }
        self.cursor = found;
        Some(&self.tokens[found - 1])
    }

    /// Consumes the next token and parses it as an integer.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the stream is exhausted, or
    /// `MalformedNumber` if the token is not numeric.
    pub fn read_int(&mut self) -> Result<i64> {
        let position = self.cursor;
        let token = self.next_token()?;
        parse_int(token)
            .map_err(|err| err.with_context(ErrorContext::new().with_position(position)))
    }

    /// Finds the cursor value at which the current token satisfies
    /// `predicate`, starting from the current token.
    fn position_of<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&str) -> bool,
    {
        let start = self.cursor.max(1);
        (start..=self.tokens.len()).find(|&cursor| predicate(&self.tokens[cursor - 1]))
    }

    fn exhausted(&self, label: &str) -> Error {
        Error::malformed_document(label)
            .with_context(ErrorContext::new().with_position(self.cursor))
    }
}

/// Parses an integer token, stripping `,` grouping separators and an
/// optional leading `+`.
///
/// # Errors
///
/// Returns `MalformedNumber` if nothing numeric remains.
pub fn parse_int(token: &str) -> Result<i64> {
    let cleaned: String = token.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    cleaned
        .parse()
        .map_err(|_| Error::malformed_number(token.trim()))
}
