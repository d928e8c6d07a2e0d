use std::error;
use std::ffi::{CStr, c_void};
use std::fmt;
use std::mem::transmute_copy;
use std::ptr::NonNull;

use libc::{dlclose, dlerror, dlopen, dlsym};

#[derive(Debug)]
pub enum Error {
    CouldNotOpen { filename: String, reason: String },
    CouldNotLookup { symbol: String, reason: String },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotOpen { filename, reason } => {
                f.write_fmt(format_args!("could not open {filename}: {reason}"))
            }
            Self::CouldNotLookup { symbol, reason } => {
                f.write_fmt(format_args!("could not lookup {symbol}: {reason}"))
            }
        }
    }
}

// NOTE: dlerror's string lives in a libc-owned buffer; it must be copied out,
// not adopted.
unsafe fn consume_dlerror() -> String {
    let err = unsafe { dlerror() };
    if err.is_null() {
        "unknown error".to_string()
    } else {
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}

pub struct DynLib(NonNull<c_void>);

impl DynLib {
    pub fn load(filename: &CStr) -> Result<Self, Error> {
        let handle = unsafe { dlopen(filename.as_ptr(), libc::RTLD_LAZY) };
        match NonNull::new(handle) {
            Some(handle) => Ok(Self(handle)),
            None => Err(Error::CouldNotOpen {
                filename: filename.to_string_lossy().into_owned(),
                reason: unsafe { consume_dlerror() },
            }),
        }
    }

    pub fn lookup<F: Sized>(&self, symbol: &CStr) -> Result<F, Error> {
        unsafe {
            // clear any stale error before the lookup; a null return alone is
            // not enough because a symbol may legitimately resolve to null.
            _ = dlerror();

            let addr = dlsym(self.0.as_ptr(), symbol.as_ptr());

            let err = dlerror();
            if !err.is_null() {
                Err(Error::CouldNotLookup {
                    symbol: symbol.to_string_lossy().into_owned(),
                    reason: CStr::from_ptr(err).to_string_lossy().into_owned(),
                })
            } else {
                Ok(transmute_copy(&addr))
            }
        }
    }
}

impl Drop for DynLib {
    fn drop(&mut self) {
        unsafe {
            dlclose(self.0.as_ptr());
        }
    }
}

#[macro_export]
macro_rules! opaque_struct {
    ($name:ident) => {
        #[repr(C)]
        pub struct $name {
            _data: [u8; 0],
            _marker: std::marker::PhantomData<(*mut u8, std::marker::PhantomPinned)>,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_lib() {
        let result = DynLib::load(c"libdefinitelynotathing.so");
        assert!(matches!(result, Err(Error::CouldNotOpen { .. })));
    }
}
