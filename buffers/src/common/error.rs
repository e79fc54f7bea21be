use std::{error::Error, fmt};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BufferErrorKind {
    /// 访问了构造时未提供的属性。
    PropertyMissing,
    /// 同一种属性在一次构造中出现了多次。
    DuplicateProperty,
    /// 主机数据长度与范围不符。
    RangeMismatch,
    SizeOverflow,
    AllocFailed,
}

#[derive(Clone, Debug)]
pub struct BufferError {
    pub kind: BufferErrorKind,
    pub info: String,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.info)
    }
}

impl Error for BufferError {}

pub(super) mod functions {
    use super::{BufferError, BufferErrorKind::*};

    macro_rules! builder {
        ($ty:ident: $name:ident $kind:expr) => {
            #[inline]
            pub fn $name(info: impl Into<String>) -> $ty {
                $ty {
                    kind: $kind,
                    info: info.into(),
                }
            }
        };
    }

    builder!(BufferError: property_missing   PropertyMissing  );
    builder!(BufferError: duplicate_property DuplicateProperty);
    builder!(BufferError: range_mismatch     RangeMismatch    );
    builder!(BufferError: size_overflow      SizeOverflow     );
    builder!(BufferError: alloc_failed       AllocFailed      );
}

#[test]
fn test_display() {
    let e = functions::property_missing("context bound");
    assert_eq!(e.kind, BufferErrorKind::PropertyMissing);
    assert_eq!(e.to_string(), "PropertyMissing: context bound");
}
