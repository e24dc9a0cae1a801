//! Types for compile-time endianness.
//!
//! COFF is always little-endian, so only [`LittleEndian`] is provided, but
//! the byte-swapping wrappers are still generic over an [`Endian`] type
//! parameter so that field declarations state their byte order.

use core::fmt::{self, Debug};
use core::marker::PhantomData;

/// A trait for using an endianness specification.
///
/// Provides methods for converting between the specified endianness and
/// the native endianness of the target machine.
pub trait Endian: Debug + Default + Clone + Copy + PartialEq + Eq + 'static {
    /// Converts unsigned 16 bit integer bytes to native endian.
    fn read_u16_bytes(self, n: [u8; 2]) -> u16;

    /// Converts unsigned 32 bit integer bytes to native endian.
    fn read_u32_bytes(self, n: [u8; 4]) -> u32;

    /// Converts a native endian unsigned 16 bit integer to bytes.
    fn write_u16_bytes(self, n: u16) -> [u8; 2];

    /// Converts a native endian unsigned 32 bit integer to bytes.
    fn write_u32_bytes(self, n: u32) -> [u8; 4];
}

/// Little endian byte order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndian;

impl Endian for LittleEndian {
    #[inline]
    fn read_u16_bytes(self, n: [u8; 2]) -> u16 {
        u16::from_le_bytes(n)
    }

    #[inline]
    fn read_u32_bytes(self, n: [u8; 4]) -> u32 {
        u32::from_le_bytes(n)
    }

    #[inline]
    fn write_u16_bytes(self, n: u16) -> [u8; 2] {
        u16::to_le_bytes(n)
    }

    #[inline]
    fn write_u32_bytes(self, n: u32) -> [u8; 4] {
        u32::to_le_bytes(n)
    }
}

/// An unaligned `u16` value with an externally specified endianness of type `E`.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct U16Bytes<E: Endian>([u8; 2], PhantomData<E>);

impl<E: Endian> U16Bytes<E> {
    /// Construct a new value given a native endian value.
    #[inline]
    pub fn new(e: E, n: u16) -> Self {
        U16Bytes(e.write_u16_bytes(n), PhantomData)
    }

    /// Return the value as a native endian value.
    #[inline]
    pub fn get(self, e: E) -> u16 {
        e.read_u16_bytes(self.0)
    }

    /// Set the value given a native endian value.
    #[inline]
    pub fn set(&mut self, e: E, n: u16) {
        self.0 = e.write_u16_bytes(n);
    }
}

impl<E: Endian> Debug for U16Bytes<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U16Bytes({:x?})", self.0)
    }
}

/// An unaligned `u32` value with an externally specified endianness of type `E`.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct U32Bytes<E: Endian>([u8; 4], PhantomData<E>);

impl<E: Endian> U32Bytes<E> {
    /// Construct a new value given a native endian value.
    #[inline]
    pub fn new(e: E, n: u32) -> Self {
        U32Bytes(e.write_u32_bytes(n), PhantomData)
    }

    /// Return the value as a native endian value.
    #[inline]
    pub fn get(self, e: E) -> u32 {
        e.read_u32_bytes(self.0)
    }

    /// Set the value given a native endian value.
    #[inline]
    pub fn set(&mut self, e: E, n: u32) {
        self.0 = e.write_u32_bytes(n);
    }
}

impl<E: Endian> Debug for U32Bytes<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U32Bytes({:x?})", self.0)
    }
}

// Safety:
// The wrappers are `#[repr(transparent)]` over byte arrays, so they have no
// alignment requirement, no padding, and no invalid byte values.
unsafe impl<E: Endian> crate::pod::Pod for U16Bytes<E> {}
unsafe impl<E: Endian> crate::pod::Pod for U32Bytes<E> {}
