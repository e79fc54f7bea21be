use super::{size_overflow, BufferError};

/// 缓冲区的 `D` 维范围。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct Range<const D: usize>([usize; D]);

impl<const D: usize> Range<D> {
    #[inline]
    pub const fn new(dims: [usize; D]) -> Self {
        Self(dims)
    }

    #[inline]
    pub const fn dims(&self) -> &[usize; D] {
        &self.0
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        D
    }

    /// 元素总数。0 维范围有一个元素。
    pub fn count(&self) -> Result<usize, BufferError> {
        self.0.iter().try_fold(1usize, |acc, &d| {
            acc.checked_mul(d)
                .ok_or_else(|| size_overflow(format!("{:?} elements", self.0)))
        })
    }

    /// 连续排布时的总字节数，不超过 `isize::MAX`。
    pub fn byte_size(&self, element_size: usize) -> Result<usize, BufferError> {
        self.count()?
            .checked_mul(element_size)
            .filter(|&size| size <= isize::MAX as usize)
            .ok_or_else(|| {
                size_overflow(format!(
                    "{:?} elements of {element_size} bytes",
                    self.0
                ))
            })
    }

    /// 连续排布时每维的字节步长。无法表示的步长饱和到 `isize::MAX`。
    pub fn strides(&self, element_size: usize) -> [isize; D] {
        let mut strides = [0; D];
        let mut mul = to_isize(element_size);
        for (i, (stride, &d)) in strides.iter_mut().zip(&self.0).enumerate().rev() {
            *stride = mul;
            if i != 0 {
                mul = mul.saturating_mul(to_isize(d))
            }
        }
        strides
    }
}

#[inline]
fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

impl<const D: usize> From<[usize; D]> for Range<D> {
    #[inline]
    fn from(dims: [usize; D]) -> Self {
        Self(dims)
    }
}

impl From<usize> for Range<1> {
    #[inline]
    fn from(len: usize) -> Self {
        Self([len])
    }
}

#[cfg(test)]
mod test {
    use super::Range;
    use crate::BufferErrorKind;

    #[test]
    fn test_count() {
        assert_eq!(Range::from([2, 3, 4]).count().unwrap(), 24);
        assert_eq!(Range::from(7).count().unwrap(), 7);
        assert_eq!(Range::new([]).count().unwrap(), 1);
        assert_eq!(Range::from([5, 0]).count().unwrap(), 0);

        let e = Range::from([usize::MAX, 2]).count().unwrap_err();
        assert_eq!(e.kind, BufferErrorKind::SizeOverflow);
    }

    #[test]
    fn test_strides() {
        let range = Range::from([2, 3, 4]);
        assert_eq!(range.rank(), 3);
        assert_eq!(range.strides(4), [48, 16, 4]);

        // 最外维的长度不参与步长
        assert_eq!(Range::from([usize::MAX, 2]).strides(4), [8, 4]);
        assert_eq!(
            Range::from([2, usize::MAX, 4]).strides(4),
            [isize::MAX, 16, 4]
        );
    }

    #[test]
    fn test_byte_size() {
        assert_eq!(Range::from([2, 3]).byte_size(4).unwrap(), 24);
        assert_eq!(Range::from([0, usize::MAX]).byte_size(8).unwrap(), 0);

        let e = Range::from(isize::MAX as usize + 1).byte_size(1).unwrap_err();
        assert_eq!(e.kind, BufferErrorKind::SizeOverflow);
        let e = Range::from(usize::MAX / 2).byte_size(4).unwrap_err();
        assert_eq!(e.kind, BufferErrorKind::SizeOverflow);
    }
}
