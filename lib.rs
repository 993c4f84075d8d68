#![doc = include_str!("README.md")]

/// Implement [`CaseAccess`] for an enum or a single-field wrapper struct.
///
/// Annotate a variant (or the wrapper struct's field) with
/// `#[caseful(nested)]` to let decomposition descend into its payload, which
/// must itself implement [`CaseAccess`]. Use `#[caseful(krate = path)]` when
/// this crate is re-exported under another name.
pub use caseful_macro::caseful;

#[cfg(feature = "stream")]
mod stream;
#[cfg(feature = "stream")]
pub use stream::{CaseStream, IntoCaseStream};

use core::any::Any;
use core::fmt::Debug;
use core::mem;
use std::borrow::Cow;

/// The trace left by walking an instance down to a payload of the requested
/// type: one label and one type descriptor per level.
///
/// Two constructors routing through the same outer label but different inner
/// shapes produce different paths, which is what keeps them apart during
/// pattern matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CasePath {
    segments: Vec<Cow<'static, str>>,
}

impl CasePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated segments, label and type descriptor alternating.
    pub fn segments(&self) -> &[Cow<'static, str>] {
        &self.segments
    }

    #[doc(hidden)]
    pub fn push_segment(&mut self, label: &'static str, type_name: &'static str) {
        self.segments.push(Cow::Borrowed(label));
        self.segments.push(Cow::Borrowed(type_name));
    }

    // Single-segment path standing in for a variant that carries no payload
    // of its own, keyed by the full rendering of the instance.
    fn rendered(description: String) -> Self {
        CasePath {
            segments: vec![Cow::Owned(description)],
        }
    }
}

// Conjure the payload for variants whose payload type occupies no storage.
// Such a payload never shows up in the structural walk but must still count
// as present rather than as a failed match.
fn zero_sized<A: Any>() -> Option<A> {
    if mem::size_of::<A>() == 0 {
        // SAFETY: `A` occupies no storage, so zeroing produces the unique
        // value of any inhabited zero sized type.
        Some(unsafe { mem::zeroed() })
    } else {
        None
    }
}

/// Label-based matching and payload extraction over a closed set of cases.
///
/// Implemented by the [`caseful`] attribute macro; the two required methods
/// are generated, everything else is provided on top of them. A *pattern* is
/// any `Fn(A) -> Self` — tuple variant constructors qualify directly,
/// closures cover named fields and nested constructors.
///
/// ```
/// use caseful::{caseful, CaseAccess};
///
/// #[caseful]
/// #[derive(Debug, Clone)]
/// enum Event {
///     Idle,
///     Progress(u8),
///     Named { payload: String },
/// }
///
/// let event = Event::Progress(40);
/// assert!(event.matches(Event::Progress));
/// assert_eq!(event.value_matching(Event::Progress), Some(40));
/// assert_eq!(event.value_matching(|payload| Event::Named { payload }), None::<String>);
/// ```
pub trait CaseAccess: Any + Debug + Sized {
    /// The label of the active case.
    fn case_label(&self) -> &'static str;

    #[doc(hidden)]
    fn probe_value<A: Any + Clone>(&self, path: &mut CasePath) -> Option<A>;

    /// Walk the instance looking for a payload of type `A`, returning the
    /// path taken together with the payload.
    ///
    /// A zero sized `A` is synthesized when the walk itself finds nothing,
    /// keyed by the rendering of the whole instance, so marker payloads
    /// still register as present.
    fn decompose<A: Any + Clone>(&self) -> Option<(CasePath, A)> {
        let mut path = CasePath::new();
        if let Some(value) = self.probe_value::<A>(&mut path) {
            return Some((path, value));
        }
        zero_sized::<A>().map(|value| (CasePath::rendered(format!("{self:?}")), value))
    }

    /// Check whether two instances are of the same case, regardless of
    /// payload.
    ///
    /// This is a case identity check: `Progress(1)` matches `Progress(2)`.
    fn matches_case(&self, other: &Self) -> bool {
        // Discriminant equality is the whole story for enums; the label
        // comparison covers hand written impls on non-enum shapes.
        mem::discriminant(self) == mem::discriminant(other)
            || self.case_label() == other.case_label()
    }

    /// Check whether the instance matches a pattern.
    fn matches<A: Any + Clone>(&self, pattern: impl Fn(A) -> Self) -> bool {
        self.value_matching(pattern).is_some()
    }

    /// Extract a payload of type `A` from whichever case is active.
    fn associated_value<A: Any + Clone>(&self) -> Option<A> {
        self.decompose::<A>().map(|(_, value)| value)
    }

    /// Extract the payload if the instance matches `pattern`.
    ///
    /// The pattern is resolved by invoking it with the extracted payload as
    /// a witness; the match succeeds only when both decompositions exist and
    /// took the same path. Path equality is what disambiguates constructors
    /// that share an outer label but diverge further down.
    fn value_matching<A: Any + Clone>(&self, pattern: impl Fn(A) -> Self) -> Option<A> {
        let (path, value) = self.decompose::<A>()?;
        let (witness_path, _) = pattern(value.clone()).decompose::<A>()?;
        (path == witness_path).then_some(value)
    }

    /// Replace the payload, keeping the instance untouched unless it
    /// matches `pattern`.
    ///
    /// ```
    /// # use caseful::{caseful, CaseAccess};
    /// #[caseful]
    /// #[derive(Debug, Clone)]
    /// enum Event { Idle, Progress(u8) }
    ///
    /// let mut event = Event::Progress(40);
    /// event.update(80, Event::Progress);
    /// assert_eq!(event.associated_value::<u8>(), Some(80));
    ///
    /// let mut idle = Event::Idle;
    /// idle.update(80, Event::Progress); // no-op
    /// assert_eq!(idle.associated_value::<u8>(), None);
    /// ```
    fn update<A: Any + Clone>(&mut self, value: A, pattern: impl Fn(A) -> Self) {
        if self.value_matching(&pattern).is_some() {
            *self = pattern(value);
        }
    }

    /// Extract the payload for `pattern`, or fall back to `default`.
    fn value_or<A: Any + Clone>(&self, pattern: impl Fn(A) -> Self, default: A) -> A {
        self.value_matching(pattern).unwrap_or(default)
    }

    /// Transform the payload of a matching case; non-match is `None`.
    fn map_case<A: Any + Clone, U>(
        &self,
        pattern: impl Fn(A) -> Self,
        transform: impl FnOnce(A) -> U,
    ) -> Option<U> {
        self.value_matching(pattern).map(transform)
    }

    /// Transform the payload of a matching case with a transform that may
    /// itself decline; both non-match and decline are `None`.
    fn flat_map_case<A: Any + Clone, U>(
        &self,
        pattern: impl Fn(A) -> Self,
        transform: impl FnOnce(A) -> Option<U>,
    ) -> Option<U> {
        self.value_matching(pattern).and_then(transform)
    }

    /// Transform the payload of a matching case with a fallible transform.
    ///
    /// Non-match stays a silent `Ok(None)`; a transform failure surfaces as
    /// `Err`, it is never folded into absence.
    fn try_map_case<A: Any + Clone, U, E>(
        &self,
        pattern: impl Fn(A) -> Self,
        transform: impl FnOnce(A) -> std::result::Result<U, E>,
    ) -> std::result::Result<Option<U>, E> {
        match self.value_matching(pattern) {
            Some(value) => transform(value).map(Some),
            None => Ok(None),
        }
    }

    /// Run `effect` when the instance is of the same case as `case`, then
    /// hand the instance back for chaining.
    fn on_case(&self, case: &Self, effect: impl FnOnce()) -> &Self {
        if self.matches_case(case) {
            effect();
        }
        self
    }

    /// Run `effect` on the payload when the instance matches `pattern`,
    /// then hand the instance back for chaining.
    fn on_value<A: Any + Clone>(
        &self,
        pattern: impl Fn(A) -> Self,
        effect: impl FnOnce(A),
    ) -> &Self {
        if let Some(value) = self.value_matching(pattern) {
            effect(value);
        }
        self
    }
}

/// Case-aware adapters for iterators over [`CaseAccess`] items.
///
/// Every adapter is lazy, order preserving and blanket-implemented for any
/// iterator whose items implement [`CaseAccess`].
///
/// ```
/// use caseful::{caseful, CaseAccess, CaseIterator};
///
/// #[caseful]
/// #[derive(Debug, Clone, PartialEq)]
/// enum Event {
///     NoPayload,
///     Int(i32),
///     Named { payload: String },
/// }
///
/// let events = vec![
///     Event::NoPayload,
///     Event::Int(10),
///     Event::Named { payload: "David".into() },
///     Event::Int(20),
/// ];
///
/// let ints: Vec<_> = events.iter().cloned().associated_values(Event::Int).collect();
/// assert_eq!(ints, vec![10, 20]);
///
/// let kept: Vec<_> = events.into_iter().filter_case(Event::Int).collect();
/// assert_eq!(kept, vec![Event::Int(10), Event::Int(20)]);
/// ```
pub trait CaseIterator: Iterator + Sized
where
    Self::Item: CaseAccess,
{
    /// Keep the elements of the same case as `case`, payloads ignored.
    fn filter_matching(self, case: Self::Item) -> impl Iterator<Item = Self::Item> {
        self.filter(move |item| item.matches_case(&case))
    }

    /// Drop the elements of the same case as `case`, payloads ignored.
    fn exclude_matching(self, case: Self::Item) -> impl Iterator<Item = Self::Item> {
        self.filter(move |item| !item.matches_case(&case))
    }

    /// Keep the elements matching `pattern`.
    fn filter_case<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
    ) -> impl Iterator<Item = Self::Item> {
        self.filter(move |item| item.matches(&pattern))
    }

    /// Drop the elements matching `pattern`.
    fn exclude_case<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
    ) -> impl Iterator<Item = Self::Item> {
        self.filter(move |item| !item.matches(&pattern))
    }

    /// Project matching elements to their payloads, dropping the rest.
    fn associated_values<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
    ) -> impl Iterator<Item = A> {
        self.filter_map(move |item| item.value_matching(&pattern))
    }

    /// Project matching elements to their payloads and transform them.
    fn map_cases<A: Any + Clone, T>(
        self,
        pattern: impl Fn(A) -> Self::Item,
        transform: impl FnMut(A) -> T,
    ) -> impl Iterator<Item = T> {
        self.associated_values(pattern).map(transform)
    }

    /// Project matching elements to their payloads, transform each into a
    /// sequence and flatten one level.
    fn flat_map_cases<A: Any + Clone, U: IntoIterator>(
        self,
        pattern: impl Fn(A) -> Self::Item,
        transform: impl FnMut(A) -> U,
    ) -> impl Iterator<Item = U::Item> {
        self.associated_values(pattern).flat_map(transform)
    }

    /// Invoke `body` once per matching element's payload, in iteration
    /// order.
    fn for_each_case<A: Any + Clone>(
        self,
        pattern: impl Fn(A) -> Self::Item,
        mut body: impl FnMut(A),
    ) {
        for item in self {
            if let Some(value) = item.value_matching(&pattern) {
                body(value);
            }
        }
    }
}

impl<I> CaseIterator for I
where
    I: Iterator,
    I::Item: CaseAccess,
{
}
