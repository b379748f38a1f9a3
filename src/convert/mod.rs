//! # Identifier Converters
//!
//! An [`IdentifierConverter`] is an invertible mapping between two
//! identifier spaces. `convert` runs external → internal and `revert` runs
//! internal → external. Converters compose with [`IdentifierConverter::and_then`]
//! and flip direction with [`IdentifierConverter::reverse`]:
//!
//! ```text
//! (f.and_then(g)).revert(x) == f.revert(g.revert(x))
//! ```
//!
//! Every converter here is immutable after construction and safe to share
//! between threads.
//!
//! | Converter | Module | Maps |
//! |-----------|--------|------|
//! | `NamespaceConverter` | `namespace` | `fcr:` segments ↔ `jcr:` segments |
//! | `HierarchyConverter` | `hierarchy` | leaf ↔ pairtree segments + leaf |
//! | `HashConverter` | `hash` | `/a#frag` ↔ `/a/#/frag` |
//! | `TransactionConverter` | `transaction` | `/tx:id/a` ↔ `/a` |
//! | `NodeResourceConverter` | `node_resource` | `Node` ↔ `ResourceVariant` |

pub mod chain;
pub mod hash;
pub mod hierarchy;
pub mod namespace;
pub mod node_resource;
pub mod transaction;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::Result;

pub use chain::{PathConverter, TranslationChain};
pub use hash::HashConverter;
pub use hierarchy::HierarchyConverter;
pub use namespace::NamespaceConverter;
pub use node_resource::NodeResourceConverter;
pub use transaction::TransactionConverter;

// ============================================================================
// IdentifierConverter Trait
// ============================================================================

/// Invertible conversion between `A` (external) and `B` (internal).
pub trait IdentifierConverter<A, B>: Send + Sync {
    /// External → internal.
    fn convert(&self, external: A) -> Result<B>;

    /// Internal → external.
    fn revert(&self, internal: B) -> Result<A>;

    /// `None` maps to `None` without touching the converter.
    fn convert_opt(&self, external: Option<A>) -> Result<Option<B>> {
        external.map(|a| self.convert(a)).transpose()
    }

    fn revert_opt(&self, internal: Option<B>) -> Result<Option<A>> {
        internal.map(|b| self.revert(b)).transpose()
    }

    /// Apply `self`, then `next`. Reverting applies `next` first.
    fn and_then<C, G>(self, next: G) -> AndThen<Self, G, B>
    where
        Self: Sized,
        G: IdentifierConverter<B, C>,
    {
        AndThen { first: self, second: next, _mid: PhantomData }
    }

    /// Swap the two directions.
    fn reverse(self) -> Reverse<Self>
    where
        Self: Sized,
    {
        Reverse(self)
    }
}

/// `g ∘ f`: converts with `f` then `g`.
pub fn compose<A, B, C, F, G>(f: F, g: G) -> AndThen<F, G, B>
where
    F: IdentifierConverter<A, B>,
    G: IdentifierConverter<B, C>,
{
    f.and_then(g)
}

// ============================================================================
// Combinators
// ============================================================================

/// Sequential composition, see [`IdentifierConverter::and_then`].
pub struct AndThen<F, G, B> {
    first: F,
    second: G,
    _mid: PhantomData<fn(B) -> B>,
}

impl<A, B, C, F, G> IdentifierConverter<A, C> for AndThen<F, G, B>
where
    F: IdentifierConverter<A, B>,
    G: IdentifierConverter<B, C>,
{
    fn convert(&self, external: A) -> Result<C> {
        self.second.convert(self.first.convert(external)?)
    }

    fn revert(&self, internal: C) -> Result<A> {
        self.first.revert(self.second.revert(internal)?)
    }
}

/// Direction swap, see [`IdentifierConverter::reverse`].
pub struct Reverse<F>(F);

impl<F> Reverse<F> {
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<A, B, F> IdentifierConverter<B, A> for Reverse<F>
where
    F: IdentifierConverter<A, B>,
{
    fn convert(&self, external: B) -> Result<A> {
        self.0.revert(external)
    }

    fn revert(&self, internal: A) -> Result<B> {
        self.0.convert(internal)
    }
}

/// A converter built from a pair of functions.
pub struct FnConverter<F, R> {
    forward: F,
    backward: R,
}

/// Build a converter from a forward and a backward function.
pub fn from_fns<A, B, F, R>(forward: F, backward: R) -> FnConverter<F, R>
where
    F: Fn(A) -> Result<B> + Send + Sync,
    R: Fn(B) -> Result<A> + Send + Sync,
{
    FnConverter { forward, backward }
}

impl<A, B, F, R> IdentifierConverter<A, B> for FnConverter<F, R>
where
    F: Fn(A) -> Result<B> + Send + Sync,
    R: Fn(B) -> Result<A> + Send + Sync,
{
    fn convert(&self, external: A) -> Result<B> {
        (self.forward)(external)
    }

    fn revert(&self, internal: B) -> Result<A> {
        (self.backward)(internal)
    }
}

/// Identity on any type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<A> IdentifierConverter<A, A> for Identity {
    fn convert(&self, external: A) -> Result<A> {
        Ok(external)
    }

    fn revert(&self, internal: A) -> Result<A> {
        Ok(internal)
    }
}

impl<A, B, T> IdentifierConverter<A, B> for Arc<T>
where
    T: IdentifierConverter<A, B> + ?Sized,
{
    fn convert(&self, external: A) -> Result<B> {
        (**self).convert(external)
    }

    fn revert(&self, internal: B) -> Result<A> {
        (**self).revert(internal)
    }
}

impl<A, B, T> IdentifierConverter<A, B> for Box<T>
where
    T: IdentifierConverter<A, B> + ?Sized,
{
    fn convert(&self, external: A) -> Result<B> {
        (**self).convert(external)
    }

    fn revert(&self, internal: B) -> Result<A> {
        (**self).revert(internal)
    }
}
