//! Case-aware adapters over push-based [`Stream`]s.
//!
//! Every adapter is a plain composition of [`StreamExt`] combinators, so
//! demand, ordering and cancellation are exactly those of the underlying
//! stream machinery; nothing here buffers or schedules on its own.

use core::any::Any;

use futures::future;
use futures::stream::{Stream, StreamExt};

use crate::CaseAccess;

/// Case-aware adapters for streams of [`CaseAccess`] items.
///
/// ```
/// use caseful::{caseful, CaseStream};
/// use futures::executor::block_on;
/// use futures::stream::{self, StreamExt};
///
/// #[caseful]
/// #[derive(Debug, Clone)]
/// enum Event { Int(i32), Named { payload: String } }
///
/// let events = stream::iter(vec![
///     Event::Int(10),
///     Event::Named { payload: "x".into() },
///     Event::Int(20),
/// ]);
/// let ints: Vec<_> = block_on(events.capture(Event::Int).collect());
/// assert_eq!(ints, vec![10, 20]);
/// ```
pub trait CaseStream: Stream + Sized
where
    Self::Item: CaseAccess,
{
    /// Re-emit the elements of the same case as `case`, payloads ignored.
    fn filter_matching(self, case: Self::Item) -> impl Stream<Item = Self::Item> {
        self.filter(move |item| future::ready(item.matches_case(&case)))
    }

    /// Re-emit the elements of a different case than `case`.
    fn exclude_matching(self, case: Self::Item) -> impl Stream<Item = Self::Item> {
        self.filter(move |item| future::ready(!item.matches_case(&case)))
    }

    /// Re-emit the elements matching `pattern`.
    fn filter_case<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
    ) -> impl Stream<Item = Self::Item> {
        self.filter(move |item| future::ready(item.matches(&pattern)))
    }

    /// Re-emit the elements not matching `pattern`.
    fn exclude_case<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
    ) -> impl Stream<Item = Self::Item> {
        self.filter(move |item| future::ready(!item.matches(&pattern)))
    }

    /// Project each matching element to its payload, in source order.
    fn capture<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
    ) -> impl Stream<Item = A> {
        self.filter_map(move |item| future::ready(item.value_matching(&pattern)))
    }

    /// Emit a unit per element of the same case as `case`, payload ignored.
    fn capture_case(self, case: Self::Item) -> impl Stream<Item = ()> {
        self.filter_map(move |item| future::ready(item.matches_case(&case).then_some(())))
    }

    /// Project each matching element to its payload and transform it; the
    /// transform may decline by returning `None`.
    fn map_case<A: Any + Clone, T>(
        self,
        pattern: impl Fn(A) -> Self::Item,
        mut transform: impl FnMut(A) -> Option<T>,
    ) -> impl Stream<Item = T> {
        self.filter_map(move |item| future::ready(item.value_matching(&pattern).and_then(&mut transform)))
    }

    /// Transform each matching element's payload into a stream and flatten,
    /// with the polling discipline of [`StreamExt::flat_map`].
    fn flat_map_case<A: Any + Clone, U: Stream>(
        self,
        pattern: impl Fn(A) -> Self::Item,
        transform: impl FnMut(A) -> U,
    ) -> impl Stream<Item = U::Item> {
        self.capture(pattern).flat_map(transform)
    }
}

impl<S> CaseStream for S
where
    S: Stream + Sized,
    S::Item: CaseAccess,
{
}

/// Lift an arbitrary stream into a stream of cases.
pub trait IntoCaseStream: Stream + Sized {
    /// Map every element to a fixed case, dropping the element.
    fn map_to_case<T: CaseAccess + Clone>(self, case: T) -> impl Stream<Item = T> {
        self.map(move |_| case.clone())
    }

    /// Map every element into a case through a constructor.
    fn map_into_case<T: CaseAccess>(
        self,
        pattern: impl FnMut(Self::Item) -> T,
    ) -> impl Stream<Item = T> {
        self.map(pattern)
    }
}

impl<S: Stream + Sized> IntoCaseStream for S {}
