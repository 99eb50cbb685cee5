use std::ops::{Deref, DerefMut};

/// Upper bound for a single intermediate buffer. Sizes reported above this are
/// treated as an allocation failure rather than trusted.
pub const MAX_QUERY_BUFFER_BYTES: usize = 16 * 1024 * 1024;

#[cfg(test)]
thread_local! {
    static LIVE_BUFFERS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of allocated buffers alive on the current thread.
#[cfg(test)]
pub fn live_buffers() -> usize {
    LIVE_BUFFERS.with(|live| live.get())
}

/// Heap buffer owned by a single resolution call, released when dropped.
#[derive(Debug)]
pub struct ScopedBuffer<T> {
    data: Vec<T>,
    #[cfg(test)]
    tracked: bool,
}

impl<T: Copy + Default> ScopedBuffer<T> {
    /// A zero-length buffer; used for size probes and never allocates.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            #[cfg(test)]
            tracked: false,
        }
    }

    /// Allocates `len` default-initialised elements, or `None` when the
    /// request is over [`MAX_QUERY_BUFFER_BYTES`] or the allocator refuses it.
    pub fn try_allocate(len: usize) -> Option<Self> {
        let bytes = len.checked_mul(size_of::<T>())?;
        if bytes > MAX_QUERY_BUFFER_BYTES {
            return None;
        }

        let mut data = Vec::new();
        data.try_reserve_exact(len).ok()?;
        data.resize(len, T::default());

        #[cfg(test)]
        LIVE_BUFFERS.with(|live| live.set(live.get() + 1));

        Some(Self {
            data,
            #[cfg(test)]
            tracked: true,
        })
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }
}

impl<T> Deref for ScopedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ScopedBuffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
impl<T> Drop for ScopedBuffer<T> {
    fn drop(&mut self) {
        if self.tracked {
            LIVE_BUFFERS.with(|live| live.set(live.get() - 1));
        }
    }
}
