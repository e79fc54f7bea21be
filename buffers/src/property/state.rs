use super::{ClInterop, GlInterop, PresenceSet, PropertyKind};
use crate::{property_missing, BufferError, ContextOf, Hardware};
use std::fmt;

/// 缓冲区构造完成后的属性状态，此后不再改变。
pub struct Properties<H: Hardware> {
    pub(super) presence: PresenceSet,
    pub(super) context: Option<ContextOf<H>>,
    pub(super) cl: Option<ClInterop<H>>,
    pub(super) gl: Option<GlInterop<H>>,
    pub(super) svm: Option<H::SvmConfig>,
}

impl<H: Hardware> Properties<H> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            presence: PresenceSet::new(),
            context: None,
            cl: None,
            gl: None,
            svm: None,
        }
    }

    #[inline]
    pub const fn presence(&self) -> PresenceSet {
        self.presence
    }

    #[inline]
    pub const fn contains(&self, kind: PropertyKind) -> bool {
        self.presence.contains(kind)
    }

    #[inline]
    pub fn context(&self) -> Result<&ContextOf<H>, BufferError> {
        self.context.as_ref().ok_or_else(|| missing(PropertyKind::ContextBound))
    }

    #[inline]
    pub fn cl_interop(&self) -> Result<&ClInterop<H>, BufferError> {
        self.cl.as_ref().ok_or_else(|| missing(PropertyKind::ClInterop))
    }

    #[inline]
    pub fn gl_interop(&self) -> Result<&GlInterop<H>, BufferError> {
        self.gl.as_ref().ok_or_else(|| missing(PropertyKind::GlInterop))
    }

    #[inline]
    pub fn svm(&self) -> Result<&H::SvmConfig, BufferError> {
        self.svm
            .as_ref()
            .ok_or_else(|| missing(PropertyKind::SharedVirtualMemory))
    }
}

fn missing(kind: PropertyKind) -> BufferError {
    property_missing(format!("buffer was not constructed with {kind}"))
}

impl<H: Hardware> fmt::Debug for Properties<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Properties").field(&self.presence).finish()
    }
}
