use std::{
    alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout},
    ops::{Deref, DerefMut},
    ptr::NonNull,
    slice::{from_raw_parts, from_raw_parts_mut},
};

/// 主机上的一块对齐、零初始化的存储区域。
pub struct Blob {
    ptr: NonNull<u8>,
    len: usize,
}

/// 对齐到缓存行，足以容纳任何 [`Element`](crate::Element)。
const BLOB_ALIGN: usize = 64;

unsafe impl Send for Blob {}
unsafe impl Sync for Blob {}

impl Blob {
    #[inline]
    pub fn new(size: usize) -> Self {
        if size == 0 {
            return Self {
                ptr: dangling(),
                len: 0,
            };
        }
        let layout = layout(size);
        let ptr = unsafe { alloc_zeroed(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => Self { ptr, len: size },
            None => handle_alloc_error(layout),
        }
    }
}

impl Drop for Blob {
    #[inline]
    fn drop(&mut self) {
        let &mut Blob { ptr, len } = self;
        if len != 0 {
            unsafe { dealloc(ptr.as_ptr(), layout(len)) }
        }
    }
}

/// 对齐后超过 `isize::MAX` 的大小无法分配。
#[inline(always)]
fn layout(size: usize) -> Layout {
    Layout::from_size_align(size, BLOB_ALIGN).unwrap()
}

#[inline(always)]
fn dangling() -> NonNull<u8> {
    unsafe { NonNull::new_unchecked(BLOB_ALIGN as *mut u8) }
}

impl Deref for Blob {
    type Target = [u8];
    #[inline]
    fn deref(&self) -> &[u8] {
        unsafe { from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for Blob {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        unsafe { from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

#[test]
fn test_blob() {
    let mut blob = Blob::new(100);
    assert_eq!(blob.len(), 100);
    assert_eq!(blob.as_ptr() as usize % BLOB_ALIGN, 0);
    assert!(blob.iter().all(|&b| b == 0));
    blob[99] = 7;
    assert_eq!(blob[99], 7);

    let empty = Blob::new(0);
    assert!(empty.is_empty());
    assert_eq!(empty.as_ptr() as usize % BLOB_ALIGN, 0);
}

#[test]
#[should_panic]
fn test_blob_too_large() {
    let _ = Blob::new(isize::MAX as usize);
}
