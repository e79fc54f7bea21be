use digit_layout::{types as ty, DigitLayout};
use half::{bf16, f16};

/// 缓冲区元素类型。
///
/// # Safety
///
/// 实现类型必须是纯数据：任意位模式都是合法值，且 [`Element::LAYOUT`] 的字节数等于类型的大小。
pub unsafe trait Element: Copy + Default + Send + Sync + 'static {
    /// 元素的数字布局。
    const LAYOUT: DigitLayout;
}

macro_rules! element {
    ($($ty:ty => $dt:ident)*) => {
        $(
            unsafe impl Element for $ty {
                const LAYOUT: DigitLayout = ty::$dt;
            }
        )*
    };
}

element! {
    u8   => U8
    i8   => I8
    u16  => U16
    i16  => I16
    u32  => U32
    i32  => I32
    u64  => U64
    i64  => I64
    f16  => F16
    bf16 => BF16
    f32  => F32
    f64  => F64
}

#[test]
fn test_layout_size() {
    fn check<T: Element>() {
        assert_eq!(T::LAYOUT.nbytes(), size_of::<T>());
    }
    check::<u8>();
    check::<i16>();
    check::<f16>();
    check::<bf16>();
    check::<f32>();
    check::<u64>();
    check::<f64>();
}
