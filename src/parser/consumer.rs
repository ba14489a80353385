//! One-item lookahead buffering shared by the lexer and the parser
//!
//! [`Consumer`] wraps any iterator and keeps at most one peeked item on hold.
//! [`TextConsumer`] is the character flavour used by the lexer: it forwards to
//! a `Consumer<Chars>` and keeps a [`SourceLocation`] up to date as characters
//! are consumed.
//!
//! The skip helpers live on the [`Lookahead`] trait as provided methods, so a
//! wrapper that overrides [`Lookahead::try_consume`] (like the position
//! tracker) gets them for free and they go through its bookkeeping.

use crate::parser::ast::SourceLocation;
use std::str::Chars;

/// Single-item lookahead over a sequence of items.
pub trait Lookahead {
    type Item;

    /// Peek at the next item without consuming it.
    ///
    /// Repeated peeks without a consume return the same item.
    fn try_peek(&mut self) -> Option<&Self::Item>;

    /// Consume the next item, taking the held item first if there is one.
    fn try_consume(&mut self) -> Option<Self::Item>;

    /// Consume and discard one item. Returns `false` at end of sequence.
    fn skip_one(&mut self) -> bool {
        self.try_consume().is_some()
    }

    /// Consume items while `predicate` holds for the peeked item.
    ///
    /// The first non-matching item stays on hold.
    fn skip_while<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(item) = self.try_peek() {
            if !predicate(item) {
                break;
            }
            self.skip_one();
        }
    }

    /// Like [`Lookahead::skip_while`], but threads `state` through the
    /// predicate. The predicate returns whether to keep skipping together
    /// with the state for the next item.
    fn skip_while_with<S, P>(&mut self, mut state: S, mut predicate: P)
    where
        P: FnMut(S, &Self::Item) -> (bool, S),
    {
        while let Some(item) = self.try_peek() {
            let (keep_going, next) = predicate(state, item);
            if !keep_going {
                break;
            }
            state = next;
            self.skip_one();
        }
    }

    /// Consume one item and hand `(consumed, item)` to `f`.
    fn consume_and_then<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(bool, Option<Self::Item>) -> R,
    {
        let item = self.try_consume();
        f(item.is_some(), item)
    }
}

/// Generic pushback buffer over an iterator.
pub struct Consumer<I: Iterator> {
    source: I,
    on_hold: Option<I::Item>,
    consumed_count: usize,
    last_consumed: Option<I::Item>,
}

impl<I: Iterator> Consumer<I> {
    pub fn new<T>(source: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            source: source.into_iter(),
            on_hold: None,
            consumed_count: 0,
            last_consumed: None,
        }
    }

    /// Number of items handed out by [`Lookahead::try_consume`] so far
    pub fn consumed_count(&self) -> usize {
        self.consumed_count
    }

    /// The item most recently handed out by [`Lookahead::try_consume`]
    pub fn last_consumed(&self) -> Option<&I::Item> {
        self.last_consumed.as_ref()
    }
}

impl<I> Lookahead for Consumer<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn try_peek(&mut self) -> Option<&I::Item> {
        if self.on_hold.is_none() {
            self.on_hold = self.source.next();
        }
        self.on_hold.as_ref()
    }

    fn try_consume(&mut self) -> Option<I::Item> {
        let item = match self.on_hold.take() {
            Some(item) => item,
            None => self.source.next()?,
        };

        self.consumed_count += 1;
        self.last_consumed = Some(item.clone());
        Some(item)
    }
}

/// Character buffer that tracks the location of the next unconsumed character
pub struct TextConsumer<'src> {
    inner: Consumer<Chars<'src>>,
    location: SourceLocation,
}

impl<'src> TextConsumer<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            inner: Consumer::new(text.chars()),
            location: SourceLocation::default(),
        }
    }

    /// Location of the next character to be consumed
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl Lookahead for TextConsumer<'_> {
    type Item = char;

    fn try_peek(&mut self) -> Option<&char> {
        self.inner.try_peek()
    }

    fn try_consume(&mut self) -> Option<char> {
        let ch = self.inner.try_consume()?;

        match ch {
            '\n' => {
                self.location.line += 1;
                self.location.column = 0;
            }
            c if !c.is_control() => self.location.column += 1,
            _ => {}
        }

        Some(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_is_stable() {
        let mut consumer = Consumer::new(vec![1, 2, 3]);

        assert_eq!(consumer.try_peek(), Some(&1));
        assert_eq!(consumer.try_peek(), Some(&1));
        assert_eq!(consumer.consumed_count(), 0);

        assert_eq!(consumer.try_consume(), Some(1));
        assert_eq!(consumer.try_consume(), Some(2));
        assert_eq!(consumer.last_consumed(), Some(&2));
        assert_eq!(consumer.consumed_count(), 2);
    }

    #[test]
    fn test_peek_pulls_source_once() {
        let mut pulled = 0;
        let source = std::iter::from_fn(|| {
            pulled += 1;
            Some(pulled)
        });
        let mut consumer = Consumer::new(source);

        consumer.try_peek();
        consumer.try_peek();
        consumer.try_peek();
        assert_eq!(consumer.try_consume(), Some(1));
        assert_eq!(consumer.try_consume(), Some(2));
    }

    #[test]
    fn test_end_of_sequence() {
        let mut consumer = Consumer::new(Vec::<u8>::new());

        assert!(consumer.try_peek().is_none());
        assert!(consumer.try_consume().is_none());
        assert!(!consumer.skip_one());
        assert_eq!(consumer.consumed_count(), 0);
        assert!(consumer.last_consumed().is_none());
    }

    #[test]
    fn test_skip_while_keeps_non_matching_item() {
        let mut consumer = Consumer::new(vec![1, 1, 1, 7, 1]);
        consumer.skip_while(|n| *n == 1);

        assert_eq!(consumer.try_peek(), Some(&7));
        assert_eq!(consumer.consumed_count(), 3);
    }

    #[test]
    fn test_skip_while_with_counts_down() {
        let mut consumer = Consumer::new("abcdef".chars());
        consumer.skip_while_with(4usize, |left, _| (left > 0, left.saturating_sub(1)));

        assert_eq!(consumer.try_consume(), Some('e'));
    }

    #[test]
    fn test_consume_and_then() {
        let mut consumer = Consumer::new(vec!['x']);

        assert_eq!(consumer.consume_and_then(|ok, c| (ok, c)), (true, Some('x')));
        assert_eq!(consumer.consume_and_then(|ok, c| (ok, c)), (false, None));
    }

    #[test]
    fn test_text_consumer_tracks_location() {
        let mut text = TextConsumer::new("ab\ncd");

        text.skip_while(|c| c.is_ascii_alphabetic());
        assert_eq!(text.location(), SourceLocation::new(0, 2));

        text.skip_one();
        assert_eq!(text.location(), SourceLocation::new(1, 0));

        text.skip_one();
        assert_eq!(text.location(), SourceLocation::new(1, 1));
    }

    #[test]
    fn test_control_characters_do_not_move() {
        let mut text = TextConsumer::new("\t\ra");
        text.skip_while(|c| c.is_control());

        assert_eq!(text.location(), SourceLocation::new(0, 0));
        assert_eq!(text.try_peek(), Some(&'a'));
    }

    #[test]
    fn test_peek_does_not_move_location() {
        let mut text = TextConsumer::new("x");
        text.try_peek();

        assert_eq!(text.location(), SourceLocation::default());
    }
}
