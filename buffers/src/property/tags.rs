use super::{Properties, Property, PropertyKind, Sealed};
use crate::{BufferAlloc, ContextOf, EventOf, Hardware, QueueOf};

/// 直接使用主机存储，不经分配器分配。
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Mapping;

/// 把缓冲区绑定到一个执行上下文。
pub struct ContextBound<H: Hardware>(pub ContextOf<H>);

/// 与计算 API 的存储对象互操作。
pub struct ClInterop<H: Hardware> {
    pub mem: H::ClMem,
    /// 存储对象可用时触发的事件。
    pub event: EventOf<H>,
    /// 拥有存储对象的队列。
    pub queue: QueueOf<H>,
}

/// 与图形 API 的对象互操作。
pub struct GlInterop<H: Hardware> {
    pub object: H::GlObject,
    pub event: EventOf<H>,
    pub queue: QueueOf<H>,
}

/// 共享虚拟内存。
pub struct SharedVirtualMemory<H: Hardware>(pub H::SvmConfig);

/// 以标签形式提供的分配器，可以出现在标签序列的任意位置。
#[derive(Clone, Copy, Default, Debug)]
pub struct WithAllocator<A>(pub A);

impl Sealed for Mapping {}
impl<H: Hardware> Sealed for ContextBound<H> {}
impl<H: Hardware> Sealed for ClInterop<H> {}
impl<H: Hardware> Sealed for GlInterop<H> {}
impl<H: Hardware> Sealed for SharedVirtualMemory<H> {}
impl<A> Sealed for WithAllocator<A> {}

impl<A: BufferAlloc> Property<A> for Mapping {
    const KIND: PropertyKind = PropertyKind::Mapping;
    #[inline]
    fn absorb(self, _props: &mut Properties<A::Hardware>, _alloc: &mut Option<A>) {}
}

impl<A, H> Property<A> for ContextBound<H>
where
    A: BufferAlloc<Hardware = H>,
    H: Hardware,
{
    const KIND: PropertyKind = PropertyKind::ContextBound;
    #[inline]
    fn absorb(self, props: &mut Properties<H>, _alloc: &mut Option<A>) {
        props.context = Some(self.0)
    }
}

impl<A, H> Property<A> for ClInterop<H>
where
    A: BufferAlloc<Hardware = H>,
    H: Hardware,
{
    const KIND: PropertyKind = PropertyKind::ClInterop;
    #[inline]
    fn absorb(self, props: &mut Properties<H>, _alloc: &mut Option<A>) {
        props.cl = Some(self)
    }
}

impl<A, H> Property<A> for GlInterop<H>
where
    A: BufferAlloc<Hardware = H>,
    H: Hardware,
{
    const KIND: PropertyKind = PropertyKind::GlInterop;
    #[inline]
    fn absorb(self, props: &mut Properties<H>, _alloc: &mut Option<A>) {
        props.gl = Some(self)
    }
}

impl<A, H> Property<A> for SharedVirtualMemory<H>
where
    A: BufferAlloc<Hardware = H>,
    H: Hardware,
{
    const KIND: PropertyKind = PropertyKind::SharedVirtualMemory;
    #[inline]
    fn absorb(self, props: &mut Properties<H>, _alloc: &mut Option<A>) {
        props.svm = Some(self.0)
    }
}

impl<A: BufferAlloc> Property<A> for WithAllocator<A> {
    const KIND: PropertyKind = PropertyKind::Allocator;
    #[inline]
    fn absorb(self, _props: &mut Properties<A::Hardware>, alloc: &mut Option<A>) {
        *alloc = Some(self.0)
    }
}
