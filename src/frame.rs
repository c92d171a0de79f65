//! Frame ownership (spec.md §3): the I/O layer owns the buffer handed to
//! `process_frame` and frees it once that call returns, so anything the
//! classifier needs to keep past the call must be deep-copied.

/// A borrowed view of an inbound Ethernet frame. `bytes` is read-only and
/// only valid for the duration of the `process_frame` call that owns it.
#[derive(Debug, Clone, Copy)]
pub struct InboundFrame<'a> {
    pub bytes: &'a [u8],
    /// Index into `RouterContext::interfaces` of the interface the frame
    /// arrived on.
    pub ingress: usize,
}

impl<'a> InboundFrame<'a> {
    pub fn new(bytes: &'a [u8], ingress: usize) -> Self {
        Self { bytes, ingress }
    }

    /// Deep-copies this frame into an owned, storable form.
    pub fn to_withheld(&self) -> WithheldFrame {
        WithheldFrame {
            bytes: self.bytes.to_vec(),
            ingress: self.ingress,
        }
    }
}

/// An inbound frame copied aside because its next-hop MAC address is not
/// yet known. Owned by exactly one [`crate::pending::PendingEntry`]; freed
/// with that entry once it is forwarded, converted to an ICMP error, or the
/// entry is abandoned.
#[derive(Debug, Clone)]
pub struct WithheldFrame {
    pub bytes: Vec<u8>,
    pub ingress: usize,
}

impl WithheldFrame {
    pub fn as_inbound(&self) -> InboundFrame<'_> {
        InboundFrame {
            bytes: &self.bytes,
            ingress: self.ingress,
        }
    }
}
