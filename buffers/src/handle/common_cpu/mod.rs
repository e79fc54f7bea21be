//! 在主机进程内模拟的硬件，供纯主机程序和测试使用。

use crate::{Alloc, Blob, Buffer, BufferAlloc, Hardware};
use std::sync::{
    atomic::{
        AtomicBool, AtomicU64,
        Ordering::{Acquire, Relaxed, Release},
    },
    Arc,
};

#[derive(Clone, Copy, Debug)]
pub struct Cpu;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ThisThread;

impl Hardware for Cpu {
    type Context = Context;
    type Queue = ThisThread;
    type Event = Event;
    type ClMem = Blob;
    type GlObject = GlName;
    type SvmConfig = SvmConfig;
}

pub type HostBuffer<T, const D: usize> = Buffer<T, D, HostAlloc>;

/// 执行上下文，以进程内唯一的序号区分。
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Context(u64);

impl Context {
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Relaxed))
    }

    #[inline]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl Default for Context {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// 一次性触发的同步事件。
#[derive(Clone, Default, Debug)]
pub struct Event(Arc<AtomicBool>);

impl Event {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn signal(&self) {
        self.0.store(true, Release)
    }

    #[inline]
    pub fn is_signaled(&self) -> bool {
        self.0.load(Acquire)
    }
}

/// 图形 API 的对象名。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct GlName(pub u32);

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct SvmConfig {
    pub fine_grain: bool,
    pub atomics: bool,
}

/// 主机堆分配器。
#[derive(Clone, Copy, Default, Debug)]
pub struct HostAlloc;

impl Alloc<Blob> for HostAlloc {
    #[inline]
    fn alloc(&self, size: usize) -> Blob {
        Blob::new(size)
    }

    #[inline]
    fn free(&self, _mem: Blob) {}
}

impl BufferAlloc for HostAlloc {
    type Hardware = Cpu;
    type Mem = Blob;
}

#[test]
fn test_context_identity() {
    let a = Context::new();
    let b = Context::new();
    assert_ne!(a, b);
    assert_eq!(a.clone(), a);
    assert!(b.id() > a.id());
}

#[test]
fn test_event() {
    let event = Event::new();
    let shared = event.clone();
    assert!(!shared.is_signaled());
    event.signal();
    assert!(shared.is_signaled());
}
