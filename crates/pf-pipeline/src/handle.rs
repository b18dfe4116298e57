//! Owned-handle lifecycle cell
//!
//! Shared by every wrapper that owns a native handle. The cell is
//! either live or disposed; `take` hands out the raw handle at most
//! once, so the owning wrapper issues at most one native destroy call
//! no matter how its lifetime ends.

use crate::error::{PassError, Result};

pub(crate) struct OwnedHandle<T> {
    raw: *mut T,
    disposed: bool,
    what: &'static str,
}

impl<T> OwnedHandle<T> {
    /// Adopt a raw handle from a native create call.
    ///
    /// A null handle means the create call failed.
    pub(crate) fn adopt(raw: *mut T, what: &'static str) -> Result<Self> {
        if raw.is_null() {
            return Err(PassError::CreateFailed(what));
        }
        Ok(Self {
            raw,
            disposed: false,
            what,
        })
    }

    /// The live raw handle, or an invalid-state error once disposed.
    pub(crate) fn get(&self) -> Result<*mut T> {
        if self.disposed {
            Err(PassError::UseAfterDispose(self.what))
        } else {
            Ok(self.raw)
        }
    }

    /// Take the handle for release. Yields it exactly once.
    pub(crate) fn take(&mut self) -> Option<*mut T> {
        if self.disposed {
            None
        } else {
            self.disposed = true;
            Some(self.raw)
        }
    }

    pub(crate) fn what(&self) -> &'static str {
        self.what
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adopt_rejects_null() {
        let result = OwnedHandle::<u8>::adopt(std::ptr::null_mut(), "thing");
        assert_eq!(result.err(), Some(PassError::CreateFailed("thing")));
    }

    #[test]
    fn test_take_yields_once() {
        let mut handle = OwnedHandle::adopt(0x10usize as *mut u8, "thing").unwrap();
        assert!(handle.get().is_ok());
        assert_eq!(handle.take(), Some(0x10usize as *mut u8));
        assert_eq!(handle.take(), None);
        assert_eq!(handle.get().err(), Some(PassError::UseAfterDispose("thing")));
    }
}
