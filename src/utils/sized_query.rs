use crate::model::error::owner::OwnerError;
use crate::model::win32::{Win32Code, ERROR_INSUFFICIENT_BUFFER, ERROR_INVALID_DATA};
use crate::utils::scoped_buffer::ScopedBuffer;

/// Runs a Win32-style "ask for size, allocate, fetch" query over `N` buffers.
///
/// `query` is called twice. The first time every buffer is empty and the call
/// must fail with `ERROR_INSUFFICIENT_BUFFER` after writing a nonzero size into
/// each slot of `sizes`. The buffers are then allocated at those sizes and
/// `query` runs again. On success the buffers keep their allocated length and
/// come back with the sizes the second call reported; trimming is left to the
/// caller. Buffers are dropped on every early return.
pub fn query_sized<T, const N: usize, F>(
    call: &str,
    mut query: F,
) -> Result<([ScopedBuffer<T>; N], [u32; N]), OwnerError>
where
    T: Copy + Default,
    F: FnMut(&mut [ScopedBuffer<T>; N], &mut [u32; N]) -> Result<(), Win32Code>,
{
    let mut buffers: [ScopedBuffer<T>; N] = std::array::from_fn(|_| ScopedBuffer::empty());
    let mut sizes = [0u32; N];

    match query(&mut buffers, &mut sizes) {
        Err(ERROR_INSUFFICIENT_BUFFER) if sizes.iter().all(|&size| size != 0) => {}
        Err(code) => return Err(OwnerError::Underlying(call, code)),
        Ok(()) => return Err(OwnerError::Underlying(call, ERROR_INVALID_DATA)),
    }

    for (buffer, &size) in buffers.iter_mut().zip(&sizes) {
        let len = size as usize;
        *buffer = ScopedBuffer::try_allocate(len).ok_or_else(|| {
            OwnerError::ResourceExhausted(call, len.saturating_mul(size_of::<T>()))
        })?;
    }

    query(&mut buffers, &mut sizes).map_err(|code| OwnerError::Underlying(call, code))?;

    Ok((buffers, sizes))
}
