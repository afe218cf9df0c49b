use std::{hash::Hash, marker::PhantomData};

/// A typed, store-scoped identifier.
///
/// Ids are handed out by the [`Scene`](crate::Scene) stores in insertion
/// order; the type parameter only exists to keep material, image, and
/// object ids from mixing.
#[repr(transparent)]
pub struct Id<T: ?Sized = ()> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> Id<T> {
    #[inline(always)]
    pub const fn from_index(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl<T: ?Sized> Clone for Id<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Id<T> {}

impl<T: ?Sized> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.index)
            .finish()
    }
}

impl<T: ?Sized> PartialEq for Id<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: ?Sized> Eq for Id<T> {}

impl<T: ?Sized> Hash for Id<T> {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: ?Sized> PartialOrd for Id<T> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for Id<T> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}
