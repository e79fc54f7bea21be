//! 属性标签化的缓冲区。
//!
//! 缓冲区的类型只由元素类型、维数和分配器类型决定，
//! 构造时提供的标签只改变实例状态，因此标签不同的缓冲区可以放进同一个容器。

mod storage;


use crate::{
    property::apply_one, range_mismatch, BufferAlloc, BufferError, ClInterop, ContextOf, Element,
    GlInterop, HardwareOf, PresenceSet, Properties, Property, PropertyKind, PropertyList, Range,
    SvmConfigOf, WithAllocator,
};
use digit_layout::DigitLayout;
use log::{debug, trace};
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};
use std::fmt;
use storage::Storage;

pub struct Buffer<T: Element, const D: usize, A: BufferAlloc> {
    range: Range<D>,
    storage: Storage<T, A::Mem>,
    alloc: A,
    props: Properties<A::Hardware>,
}

impl<T: Element, const D: usize, A: BufferAlloc> Buffer<T, D, A> {
    /// 使用默认分配器构造缓冲区。
    pub fn new(
        range: impl Into<Range<D>>,
        props: impl PropertyList<A>,
    ) -> Result<Self, BufferError>
    where
        A: Default,
    {
        let (props, alloc) = fold(None, props)?;
        Self::realize(range.into(), None, alloc.unwrap_or_default(), props)
    }

    /// 使用指定的分配器构造缓冲区，分配器计入 [`PropertyKind::Allocator`]。
    pub fn new_in(
        range: impl Into<Range<D>>,
        alloc: A,
        props: impl PropertyList<A>,
    ) -> Result<Self, BufferError> {
        let (props, alloc) = fold(Some(alloc), props)?;
        let Some(alloc) = alloc else {
            unreachable!("allocator slot is filled before the tags")
        };
        Self::realize(range.into(), None, alloc, props)
    }

    /// 以主机数据构造缓冲区。
    ///
    /// 提供 [`Mapping`](crate::Mapping) 时直接使用 `host` 作为存储，否则复制到分配器分配的存储中。
    pub fn from_host(
        host: Vec<T>,
        range: impl Into<Range<D>>,
        props: impl PropertyList<A>,
    ) -> Result<Self, BufferError>
    where
        A: Default,
    {
        let (props, alloc) = fold(None, props)?;
        Self::realize(range.into(), Some(host), alloc.unwrap_or_default(), props)
    }

    pub fn from_host_in(
        host: Vec<T>,
        range: impl Into<Range<D>>,
        alloc: A,
        props: impl PropertyList<A>,
    ) -> Result<Self, BufferError> {
        let (props, alloc) = fold(Some(alloc), props)?;
        let Some(alloc) = alloc else {
            unreachable!("allocator slot is filled before the tags")
        };
        Self::realize(range.into(), Some(host), alloc, props)
    }

    fn realize(
        range: Range<D>,
        host: Option<Vec<T>>,
        alloc: A,
        props: Properties<A::Hardware>,
    ) -> Result<Self, BufferError> {
        range.byte_size(size_of::<T>())?;
        let len = range.count()?;
        if let Some(host) = &host {
            if host.len() != len {
                return Err(range_mismatch(format!(
                    "host data holds {} elements, range {:?} needs {len}",
                    host.len(),
                    range.dims(),
                )));
            }
        }

        let storage = if props.contains(PropertyKind::Mapping) {
            Storage::Mapped(host.unwrap_or_else(|| vec![T::default(); len]))
        } else {
            Storage::allocate(&alloc, host.as_deref(), len)?
        };
        debug!(
            "buffer {:?} of {:?} realized with {:?}",
            range.dims(),
            T::LAYOUT,
            props.presence(),
        );
        Ok(Self {
            range,
            storage,
            alloc,
            props,
        })
    }

    #[inline]
    pub const fn range(&self) -> &Range<D> {
        &self.range
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.storage.as_slice().len()
    }

    #[inline]
    pub fn byte_size(&self) -> usize {
        self.count() * T::LAYOUT.nbytes()
    }

    #[inline]
    pub fn element_layout(&self) -> DigitLayout {
        T::LAYOUT
    }

    /// 连续排布时每维的字节步长。
    #[inline]
    pub fn strides(&self) -> [isize; D] {
        self.range.strides(size_of::<T>())
    }

    #[inline]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub const fn properties(&self) -> &Properties<A::Hardware> {
        &self.props
    }

    #[inline]
    pub const fn presence(&self) -> PresenceSet {
        self.props.presence()
    }

    #[inline]
    pub fn has_property<P: Property<A>>(&self) -> bool {
        self.props.contains(P::KIND)
    }

    #[inline]
    pub const fn has_kind(&self, kind: PropertyKind) -> bool {
        self.props.contains(kind)
    }

    /// 绑定的上下文，要求以 [`ContextBound`](crate::ContextBound) 构造。
    #[inline]
    pub fn context(&self) -> Result<&ContextOf<HardwareOf<A>>, BufferError> {
        self.props.context()
    }

    #[inline]
    pub fn cl_interop(&self) -> Result<&ClInterop<A::Hardware>, BufferError> {
        self.props.cl_interop()
    }

    #[inline]
    pub fn gl_interop(&self) -> Result<&GlInterop<A::Hardware>, BufferError> {
        self.props.gl_interop()
    }

    #[inline]
    pub fn svm(&self) -> Result<&SvmConfigOf<A::Hardware>, BufferError> {
        self.props.svm()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    pub fn fill(&mut self, value: T) {
        self.as_mut_slice()
            .par_iter_mut()
            .for_each(|x| *x = value)
    }

    /// 取回缓冲区内容。映射的主机存储原样交还，不发生复制。
    pub fn into_host(mut self) -> Vec<T> {
        self.storage.take(&self.alloc)
    }
}

fn fold<A: BufferAlloc>(
    alloc: Option<A>,
    list: impl PropertyList<A>,
) -> Result<(Properties<A::Hardware>, Option<A>), BufferError> {
    let mut props = Properties::new();
    let mut slot = None;
    if let Some(alloc) = alloc {
        apply_one(WithAllocator(alloc), &mut props, &mut slot)?
    }
    list.apply(&mut props, &mut slot)?;
    Ok((props, slot))
}

impl<T: Element, const D: usize, A: BufferAlloc> Drop for Buffer<T, D, A> {
    fn drop(&mut self) {
        trace!("release buffer {:?} with {:?}", self.range.dims(), self.props.presence());
        self.storage.release(&self.alloc)
    }
}

impl<T: Element, const D: usize, A: BufferAlloc> fmt::Debug for Buffer<T, D, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("range", self.range.dims())
            .field("element", &T::LAYOUT)
            .field("mapped", &self.storage.is_mapped())
            .field("properties", &self.props.presence())
            .finish()
    }
}
