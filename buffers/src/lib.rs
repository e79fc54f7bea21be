// #![deny(warnings)]

mod buffer;
mod common;
mod handle;
mod property;

pub use buffer::Buffer;
pub use common::*;
pub use property::{
    kind_of, AnyProperty, ClInterop, ContextBound, GlInterop, Mapping, PresenceSet, Properties,
    Property, PropertyKind, PropertyList, SharedVirtualMemory, WithAllocator,
};

#[cfg(any(use_cpu, test))]
pub use handle::common_cpu;

use std::ops::DerefMut;

/// 算力硬件抽象。
///
/// 约定缓冲区属性携带的外部对象类型。
/// 缓冲区只保存并交还这些对象，不解释其内容；对象的释放由其自身的 [`Drop`] 完成。
pub trait Hardware {
    /// 执行上下文。
    type Context;
    /// 硬件的任务队列类型。
    type Queue;
    /// 同步事件。
    type Event;
    /// 计算 API 的互操作存储对象。
    type ClMem;
    /// 图形 API 的互操作对象。
    type GlObject;
    /// 共享虚拟内存配置。
    type SvmConfig;
}

pub type ContextOf<H> = <H as Hardware>::Context;
pub type QueueOf<H> = <H as Hardware>::Queue;
pub type EventOf<H> = <H as Hardware>::Event;
pub type SvmConfigOf<H> = <H as Hardware>::SvmConfig;
pub type HardwareOf<A> = <A as BufferAlloc>::Hardware;

pub trait Alloc<M> {
    fn alloc(&self, size: usize) -> M;
    fn free(&self, mem: M);
}

/// 缓冲区分配器。
pub trait BufferAlloc: Alloc<Self::Mem> {
    /// 分配器对应的硬件。
    type Hardware: Hardware;
    /// 分配器分配和回收的对象，表示对某块存储区域的所有权。
    ///
    /// 分配得到的存储区域必须已初始化。
    type Mem: DerefMut<Target = [u8]>;
}
