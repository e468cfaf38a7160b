//! Executable memory: map pages the assembled code can run from.
//!
//! [`ExecMem`] owns a read+write+execute anonymous mapping and returns the
//! pages on drop. Copying code in and transmuting the pointer to a function
//! type is the caller's business — and inherently `unsafe`: the buffer must
//! contain valid code for the calling convention it is invoked with.
//!
//! x86-64 keeps instruction and data caches coherent, so no explicit cache
//! synchronization is needed between writing code and running it. Ports to
//! other architectures would need a flush here.
//!
//! Some hardened platforms refuse W+X mappings outright; there this module
//! returns the OS error rather than attempting a W^X remap dance.

#![allow(unsafe_code)]

use std::io;

/// An owned read+write+execute memory mapping.
///
/// The pointer is stored as `usize` so the handle stays `Send`/`Sync`
/// without an `unsafe impl`; all coordination happens at the OS layer.
#[derive(Debug)]
pub struct ExecMem {
    ptr: usize,
    len: usize,
}

impl ExecMem {
    /// Map at least `len` bytes of zeroed RWX memory.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the mapping fails (including platforms
    /// that forbid W+X mappings).
    pub fn allocate(len: usize) -> io::Result<Self> {
        if len == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot map zero bytes",
            ));
        }
        let ptr = sys::map_rwx(len)?;
        Ok(Self {
            ptr: ptr as usize,
            len,
        })
    }

    /// Map RWX memory and copy `code` into it.
    ///
    /// # Errors
    ///
    /// Fails as [`ExecMem::allocate`] does; empty `code` is rejected.
    pub fn with_code(code: &[u8]) -> io::Result<Self> {
        let mut mem = Self::allocate(code.len())?;
        mem.as_mut_slice()[..code.len()].copy_from_slice(code);
        Ok(mem)
    }

    /// Pointer to the start of the mapping.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr as *const u8
    }

    /// Mutable pointer to the start of the mapping.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr as *mut u8
    }

    /// The mapping viewed as bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        // The mapping is owned, live until drop, and at least `len` bytes.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// The mapping viewed as mutable bytes.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Requested mapping length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the mapping is empty (never true for a live handle).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for ExecMem {
    fn drop(&mut self) {
        // Failure to unmap is unreportable from drop; leak rather than abort.
        let _ = sys::unmap(self.ptr as *mut u8, self.len);
    }
}

#[cfg(unix)]
mod sys {
    use std::io;

    use rustix::mm::{mmap_anonymous, munmap, MapFlags, ProtFlags};

    pub fn map_rwx(len: usize) -> io::Result<*mut u8> {
        // mmap rounds the length up to page granularity itself.
        let ptr = unsafe {
            mmap_anonymous(
                core::ptr::null_mut(),
                len,
                ProtFlags::READ | ProtFlags::WRITE | ProtFlags::EXEC,
                MapFlags::PRIVATE,
            )
        }
        .map_err(io::Error::from)?;
        Ok(ptr.cast())
    }

    pub fn unmap(ptr: *mut u8, len: usize) -> io::Result<()> {
        unsafe { munmap(ptr.cast(), len) }.map_err(io::Error::from)
    }
}

#[cfg(windows)]
mod sys {
    use std::io;

    use windows_sys::Win32::System::Memory::{
        VirtualAlloc, VirtualFree, MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_EXECUTE_READWRITE,
    };

    pub fn map_rwx(len: usize) -> io::Result<*mut u8> {
        let ptr = unsafe {
            VirtualAlloc(
                core::ptr::null(),
                len,
                MEM_COMMIT | MEM_RESERVE,
                PAGE_EXECUTE_READWRITE,
            )
        };
        if ptr.is_null() {
            return Err(io::Error::last_os_error());
        }
        Ok(ptr.cast())
    }

    pub fn unmap(ptr: *mut u8, _len: usize) -> io::Result<()> {
        // VirtualFree with MEM_RELEASE takes a zero size.
        if unsafe { VirtualFree(ptr.cast(), 0, MEM_RELEASE) } == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
