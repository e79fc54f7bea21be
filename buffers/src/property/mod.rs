//! 缓冲区属性。
//!
//! 属性集合是封闭的：每种标签类型在编译期映射到唯一的 [`PropertyKind`]，
//! 未登记的类型不满足 [`Property`] 约束，无法传给构造函数。

mod list;
mod state;
mod tags;

pub use list::{AnyProperty, PropertyList};
pub(crate) use list::apply_one;
pub use state::Properties;
pub use tags::{ClInterop, ContextBound, GlInterop, Mapping, SharedVirtualMemory, WithAllocator};

use crate::BufferAlloc;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum PropertyKind {
    /// 显式提供的分配器，视为伪属性。
    Allocator = 0,
    Mapping = 1,
    ContextBound = 2,
    ClInterop = 3,
    GlInterop = 4,
    SharedVirtualMemory = 5,
}

impl PropertyKind {
    pub const COUNT: usize = 6;
    pub const ALL: [Self; Self::COUNT] = [
        Self::Allocator,
        Self::Mapping,
        Self::ContextBound,
        Self::ClInterop,
        Self::GlInterop,
        Self::SharedVirtualMemory,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Allocator => "allocator",
            Self::Mapping => "mapping",
            Self::ContextBound => "context_bound",
            Self::ClInterop => "cl_interop",
            Self::GlInterop => "gl_interop",
            Self::SharedVirtualMemory => "shared_virtual_memory",
        }
    }
}

impl fmt::Display for PropertyKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 缓冲区实例上出现过的属性，每种 [`PropertyKind`] 占一位。
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PresenceSet(u8);

impl PresenceSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn contains(&self, kind: PropertyKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    /// 置位，返回此前是否已经存在。
    #[inline]
    pub(crate) fn insert(&mut self, kind: PropertyKind) -> bool {
        let ans = self.contains(kind);
        self.0 |= 1 << kind.index();
        ans
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = PropertyKind> + '_ {
        PropertyKind::ALL
            .into_iter()
            .filter(|&kind| self.contains(kind))
    }
}

impl fmt::Debug for PresenceSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// 属性登记表。
///
/// 每个实现类型是一种标签，`KIND` 是它在登记表中的位置。
/// 这个特质是封闭的，只有本库定义的标签能实现它。
pub trait Property<A: BufferAlloc>: Sealed + Sized {
    const KIND: PropertyKind;

    /// 把标签的负载移入缓冲区状态。
    ///
    /// 调用前存在位已经置位，实现只负责保存负载。
    #[doc(hidden)]
    fn absorb(self, props: &mut Properties<A::Hardware>, alloc: &mut Option<A>);
}

/// 标签类型对应的属性种类，编译期求值。
#[inline]
pub const fn kind_of<A: BufferAlloc, P: Property<A>>() -> PropertyKind {
    P::KIND
}

#[cfg(test)]
mod test {
    use super::{kind_of, PresenceSet, PropertyKind};
    use crate::{
        common_cpu::{Cpu, HostAlloc},
        ClInterop, ContextBound, GlInterop, Mapping, SharedVirtualMemory, WithAllocator,
    };

    #[test]
    fn test_registry() {
        const MAPPING: PropertyKind = kind_of::<HostAlloc, Mapping>();
        assert_eq!(MAPPING, PropertyKind::Mapping);
        assert_eq!(
            kind_of::<HostAlloc, ContextBound<Cpu>>(),
            PropertyKind::ContextBound
        );
        assert_eq!(
            kind_of::<HostAlloc, ClInterop<Cpu>>(),
            PropertyKind::ClInterop
        );
        assert_eq!(
            kind_of::<HostAlloc, GlInterop<Cpu>>(),
            PropertyKind::GlInterop
        );
        assert_eq!(
            kind_of::<HostAlloc, SharedVirtualMemory<Cpu>>(),
            PropertyKind::SharedVirtualMemory
        );
        assert_eq!(
            kind_of::<HostAlloc, WithAllocator<HostAlloc>>(),
            PropertyKind::Allocator
        );
    }

    #[test]
    fn test_kind_index() {
        for (i, kind) in PropertyKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(PropertyKind::ContextBound.to_string(), "context_bound");
    }

    #[test]
    fn test_presence_set() {
        let mut set = PresenceSet::new();
        assert!(set.is_empty());
        assert!(PropertyKind::ALL.iter().all(|&kind| !set.contains(kind)));

        assert!(!set.insert(PropertyKind::GlInterop));
        assert!(!set.insert(PropertyKind::Mapping));
        assert!(set.insert(PropertyKind::Mapping));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [PropertyKind::Mapping, PropertyKind::GlInterop]
        );
        assert_eq!(format!("{set:?}"), "{Mapping, GlInterop}");
    }
}
