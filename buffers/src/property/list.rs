use super::{
    ClInterop, ContextBound, GlInterop, Mapping, Properties, Property, PropertyKind,
    SharedVirtualMemory, WithAllocator,
};
use crate::{duplicate_property, BufferAlloc, BufferError};
use log::trace;

/// 构造缓冲区时提供的标签序列。
///
/// 由至多 8 个标签组成的元组在编译期展开；[`Vec<AnyProperty>`] 在运行时组装。
/// 标签从左到右依次应用，同种属性出现两次时构造失败。
pub trait PropertyList<A: BufferAlloc> {
    fn apply(
        self,
        props: &mut Properties<A::Hardware>,
        alloc: &mut Option<A>,
    ) -> Result<(), BufferError>;
}

pub(crate) fn apply_one<A, P>(
    tag: P,
    props: &mut Properties<A::Hardware>,
    alloc: &mut Option<A>,
) -> Result<(), BufferError>
where
    A: BufferAlloc,
    P: Property<A>,
{
    if props.presence.insert(P::KIND) {
        return Err(duplicate_property(format!("{} supplied twice", P::KIND)));
    }
    trace!("absorb {}", P::KIND);
    tag.absorb(props, alloc);
    Ok(())
}

impl<A: BufferAlloc> PropertyList<A> for () {
    #[inline]
    fn apply(
        self,
        _props: &mut Properties<A::Hardware>,
        _alloc: &mut Option<A>,
    ) -> Result<(), BufferError> {
        Ok(())
    }
}

macro_rules! property_list {
    ($($ty:ident $var:ident)+) => {
        impl<A: BufferAlloc, $($ty: Property<A>),+> PropertyList<A> for ($($ty,)+) {
            #[inline]
            fn apply(
                self,
                props: &mut Properties<A::Hardware>,
                alloc: &mut Option<A>,
            ) -> Result<(), BufferError> {
                let ($($var,)+) = self;
                $( apply_one($var, props, alloc)?; )+
                Ok(())
            }
        }
    };
}

property_list!(P0 p0);
property_list!(P0 p0 P1 p1);
property_list!(P0 p0 P1 p1 P2 p2);
property_list!(P0 p0 P1 p1 P2 p2 P3 p3);
property_list!(P0 p0 P1 p1 P2 p2 P3 p3 P4 p4);
property_list!(P0 p0 P1 p1 P2 p2 P3 p3 P4 p4 P5 p5);
property_list!(P0 p0 P1 p1 P2 p2 P3 p3 P4 p4 P5 p5 P6 p6);
property_list!(P0 p0 P1 p1 P2 p2 P3 p3 P4 p4 P5 p5 P6 p6 P7 p7);

/// 任意一种标签。
pub enum AnyProperty<A: BufferAlloc> {
    Allocator(WithAllocator<A>),
    Mapping(Mapping),
    ContextBound(ContextBound<A::Hardware>),
    ClInterop(ClInterop<A::Hardware>),
    GlInterop(GlInterop<A::Hardware>),
    SharedVirtualMemory(SharedVirtualMemory<A::Hardware>),
}

impl<A: BufferAlloc> AnyProperty<A> {
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Allocator(_) => PropertyKind::Allocator,
            Self::Mapping(_) => PropertyKind::Mapping,
            Self::ContextBound(_) => PropertyKind::ContextBound,
            Self::ClInterop(_) => PropertyKind::ClInterop,
            Self::GlInterop(_) => PropertyKind::GlInterop,
            Self::SharedVirtualMemory(_) => PropertyKind::SharedVirtualMemory,
        }
    }
}

macro_rules! any_from {
    ($($variant:ident: $ty:ty)*) => {
        $(
            impl<A: BufferAlloc> From<$ty> for AnyProperty<A> {
                #[inline]
                fn from(tag: $ty) -> Self {
                    Self::$variant(tag)
                }
            }
        )*
    };
}

any_from! {
    Allocator:           WithAllocator<A>
    Mapping:             Mapping
    ContextBound:        ContextBound<A::Hardware>
    ClInterop:           ClInterop<A::Hardware>
    GlInterop:           GlInterop<A::Hardware>
    SharedVirtualMemory: SharedVirtualMemory<A::Hardware>
}

impl<A: BufferAlloc> PropertyList<A> for Vec<AnyProperty<A>> {
    fn apply(
        self,
        props: &mut Properties<A::Hardware>,
        alloc: &mut Option<A>,
    ) -> Result<(), BufferError> {
        for tag in self {
            match tag {
                AnyProperty::Allocator(tag) => apply_one(tag, props, alloc)?,
                AnyProperty::Mapping(tag) => apply_one(tag, props, alloc)?,
                AnyProperty::ContextBound(tag) => apply_one(tag, props, alloc)?,
                AnyProperty::ClInterop(tag) => apply_one(tag, props, alloc)?,
                AnyProperty::GlInterop(tag) => apply_one(tag, props, alloc)?,
                AnyProperty::SharedVirtualMemory(tag) => apply_one(tag, props, alloc)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{AnyProperty, PropertyList};
    use crate::{
        common_cpu::{Context, Cpu, HostAlloc},
        BufferErrorKind, ContextBound, Mapping, Properties, PropertyKind, WithAllocator,
    };

    fn fold(list: impl PropertyList<HostAlloc>) -> Result<Properties<Cpu>, BufferErrorKind> {
        let mut props = Properties::new();
        let mut alloc = None;
        list.apply(&mut props, &mut alloc).map_err(|e| e.kind)?;
        Ok(props)
    }

    #[test]
    fn test_empty() {
        let props = fold(()).unwrap();
        assert!(props.presence().is_empty());
    }

    #[test]
    fn test_tuple() {
        let ctx = Context::new();
        let props = fold((
            Mapping,
            ContextBound::<Cpu>(ctx.clone()),
            WithAllocator(HostAlloc),
        ))
        .unwrap();
        assert_eq!(props.presence().len(), 3);
        assert!(props.contains(PropertyKind::Allocator));
        assert_eq!(props.context().unwrap(), &ctx);
    }

    #[test]
    fn test_duplicate() {
        assert_eq!(
            fold((Mapping, Mapping)).unwrap_err(),
            BufferErrorKind::DuplicateProperty
        );
    }

    #[test]
    fn test_dynamic() {
        let ctx = Context::new();
        let list: Vec<AnyProperty<HostAlloc>> =
            vec![ContextBound::<Cpu>(ctx.clone()).into(), Mapping.into()];
        assert_eq!(
            list.iter().map(AnyProperty::kind).collect::<Vec<_>>(),
            [PropertyKind::ContextBound, PropertyKind::Mapping]
        );
        let props = fold(list).unwrap();
        assert!(props.contains(PropertyKind::Mapping));
        assert_eq!(props.context().unwrap(), &ctx);

        let list: Vec<AnyProperty<HostAlloc>> = vec![Mapping.into(), Mapping.into()];
        assert_eq!(fold(list).unwrap_err(), BufferErrorKind::DuplicateProperty);
    }
}
