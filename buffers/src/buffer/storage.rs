use crate::{alloc_failed, size_overflow, Alloc, BufferError, Element};
use std::{
    mem::{replace, ManuallyDrop},
    ops::DerefMut,
    slice::{from_raw_parts, from_raw_parts_mut},
};

pub(super) enum Storage<T, M> {
    /// 分配器分配的存储，只能通过分配器释放。
    Alloc { mem: ManuallyDrop<M>, len: usize },
    /// 直接使用的主机存储。
    Mapped(Vec<T>),
}

impl<T, M> Storage<T, M>
where
    T: Element,
    M: DerefMut<Target = [u8]>,
{
    pub fn allocate(
        alloc: &impl Alloc<M>,
        host: Option<&[T]>,
        len: usize,
    ) -> Result<Self, BufferError> {
        let size = len
            .checked_mul(size_of::<T>())
            .filter(|&size| size <= isize::MAX as usize)
            .ok_or_else(|| size_overflow(format!("{len} elements of {:?}", T::LAYOUT)))?;

        let mem = alloc.alloc(size);
        if mem.len() < size {
            let info = format!("{} bytes allocated, {size} expected", mem.len());
            alloc.free(mem);
            return Err(alloc_failed(info));
        }
        if size != 0 && mem.as_ptr().align_offset(align_of::<T>()) != 0 {
            alloc.free(mem);
            return Err(alloc_failed(format!(
                "allocation is not aligned to {}",
                align_of::<T>()
            )));
        }

        let mut ans = Self::Alloc {
            mem: ManuallyDrop::new(mem),
            len,
        };
        if let Some(host) = host {
            ans.as_mut_slice().copy_from_slice(host)
        }
        Ok(ans)
    }

    #[inline]
    pub const fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Alloc { len: 0, .. } => &[],
            Self::Alloc { mem, len } => unsafe { from_raw_parts(mem.as_ptr().cast(), *len) },
            Self::Mapped(host) => host,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Self::Alloc { len: 0, .. } => &mut [],
            Self::Alloc { mem, len } => unsafe {
                from_raw_parts_mut(mem.as_mut_ptr().cast(), *len)
            },
            Self::Mapped(host) => host,
        }
    }

    /// 归还分配器的存储，之后只剩一个空的主机存储。
    pub fn release(&mut self, alloc: &impl Alloc<M>) {
        if let Self::Alloc { mem, .. } = replace(self, Self::Mapped(Vec::new())) {
            alloc.free(ManuallyDrop::into_inner(mem))
        }
    }

    /// 取出内容，归还分配器的存储，之后只剩一个空的主机存储。
    pub fn take(&mut self, alloc: &impl Alloc<M>) -> Vec<T> {
        match replace(self, Self::Mapped(Vec::new())) {
            Self::Alloc { mem, len } => {
                let mem = ManuallyDrop::into_inner(mem);
                let ans = if len == 0 {
                    Vec::new()
                } else {
                    unsafe { from_raw_parts(mem.as_ptr().cast::<T>(), len) }.to_vec()
                };
                alloc.free(mem);
                ans
            }
            Self::Mapped(host) => host,
        }
    }
}
