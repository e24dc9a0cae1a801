use crate::coff;
use crate::endian::{LittleEndian as LE, U16Bytes, U32Bytes};
use crate::pod::bytes_of;
use crate::write::util::WritableBuffer;
use crate::write::{Error, Result};

/// The selection applied by the linker when it encounters duplicates of a
/// COMDAT section.
///
/// The discriminants are the `IMAGE_COMDAT_SELECT_*` values mandated by the
/// format; see [`crate::coff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComdatType {
    /// Duplicates of the section are an error.
    NoDuplicates = 1,
    /// Any duplicate may be selected.
    Any = 2,
    /// Duplicates must have the same size.
    SameSize = 3,
    /// Duplicate contents must match exactly, compared by checksum.
    ExactMatch = 4,
    /// The section is selected together with an associated section.
    Associative = 5,
    /// The largest duplicate is selected.
    Largest = 6,
    /// The newest duplicate is selected.
    Newest = 7,
}

impl ComdatType {
    /// Validate a raw selection value.
    ///
    /// Returns [`Error::InvalidField`] unless `selection` is one of the
    /// `IMAGE_COMDAT_SELECT_*` values.
    pub fn parse(selection: u8) -> Result<Self> {
        match selection {
            coff::IMAGE_COMDAT_SELECT_NODUPLICATES => Ok(ComdatType::NoDuplicates),
            coff::IMAGE_COMDAT_SELECT_ANY => Ok(ComdatType::Any),
            coff::IMAGE_COMDAT_SELECT_SAME_SIZE => Ok(ComdatType::SameSize),
            coff::IMAGE_COMDAT_SELECT_EXACT_MATCH => Ok(ComdatType::ExactMatch),
            coff::IMAGE_COMDAT_SELECT_ASSOCIATIVE => Ok(ComdatType::Associative),
            coff::IMAGE_COMDAT_SELECT_LARGEST => Ok(ComdatType::Largest),
            coff::IMAGE_COMDAT_SELECT_NEWEST => Ok(ComdatType::Newest),
            _ => Err(Error::InvalidField {
                name: "selection",
                value: selection.into(),
            }),
        }
    }
}

/// How the linker searches for a definition of a weak external symbol.
///
/// The discriminants are the `IMAGE_WEAK_EXTERN_*` values mandated by the
/// format; see [`crate::coff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WeakExternalSearch {
    /// No library search should be performed.
    NoLibrary = 1,
    /// A library search should be performed.
    Library = 2,
    /// The weak symbol is an alias for the default symbol.
    Alias = 3,
    /// The weak symbol is an anti-dependency on the default symbol.
    AntiDependency = 4,
}

impl WeakExternalSearch {
    /// Validate a raw characteristics value.
    ///
    /// Returns [`Error::InvalidField`] unless `characteristics` is one of
    /// the `IMAGE_WEAK_EXTERN_*` values.
    pub fn parse(characteristics: u32) -> Result<Self> {
        match characteristics {
            coff::IMAGE_WEAK_EXTERN_SEARCH_NOLIBRARY => Ok(WeakExternalSearch::NoLibrary),
            coff::IMAGE_WEAK_EXTERN_SEARCH_LIBRARY => Ok(WeakExternalSearch::Library),
            coff::IMAGE_WEAK_EXTERN_SEARCH_ALIAS => Ok(WeakExternalSearch::Alias),
            coff::IMAGE_WEAK_EXTERN_ANTI_DEPENDENCY => Ok(WeakExternalSearch::AntiDependency),
            _ => Err(Error::InvalidField {
                name: "characteristics",
                value: characteristics,
            }),
        }
    }
}

/// An auxiliary symbol record for a section definition.
///
/// Follows the symbol table entry that defines a section, and carries the
/// metadata the linker uses for COMDAT folding. Field values are the
/// caller's responsibility; the field widths make out-of-range values
/// unrepresentable, and `selection` is a validated [`ComdatType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxSectionDefinition {
    /// The size of section data in bytes.
    pub length: u32,
    /// The number of relocation entries for the section.
    pub number_of_relocations: u16,
    /// The number of line-number entries for the section.
    pub number_of_linenumbers: u16,
    /// The checksum of the section data.
    ///
    /// Linkers compare this when folding [`ComdatType::ExactMatch`]
    /// sections; see [`section_checksum`].
    pub checksum: u32,
    /// The one-based number of the section.
    pub number: u16,
    /// The COMDAT selection.
    pub selection: ComdatType,
}

impl AuxSectionDefinition {
    fn raw(&self) -> coff::ImageAuxSymbolSection {
        coff::ImageAuxSymbolSection {
            length: U32Bytes::new(LE, self.length),
            number_of_relocations: U16Bytes::new(LE, self.number_of_relocations),
            number_of_linenumbers: U16Bytes::new(LE, self.number_of_linenumbers),
            check_sum: U32Bytes::new(LE, self.checksum),
            number: U16Bytes::new(LE, self.number),
            selection: self.selection as u8,
            reserved: [0; 3],
        }
    }

    /// Pack the record into its fixed 18-byte file representation.
    ///
    /// The layout is little-endian, with the last 3 bytes zero.
    pub fn pack(&self) -> [u8; coff::IMAGE_SIZEOF_SYMBOL] {
        let mut data = [0; coff::IMAGE_SIZEOF_SYMBOL];
        data.copy_from_slice(bytes_of(&self.raw()));
        data
    }

    /// Write the packed record to `buffer`.
    pub fn write(&self, buffer: &mut dyn WritableBuffer) {
        buffer.write(&self.raw());
    }
}

/// An auxiliary symbol record for a weak external.
///
/// Follows an undefined symbol table entry, naming the symbol the linker
/// resolves references to when no definition of the weak symbol is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxWeakExternal {
    /// The symbol table index of the default symbol.
    pub tag_index: u32,
    /// How the linker searches for a definition of the weak symbol.
    pub characteristics: WeakExternalSearch,
}

impl AuxWeakExternal {
    fn raw(&self) -> coff::ImageAuxSymbolWeak {
        coff::ImageAuxSymbolWeak {
            weak_default_sym_index: U32Bytes::new(LE, self.tag_index),
            weak_search_type: U32Bytes::new(LE, self.characteristics as u32),
            reserved: [0; 10],
        }
    }

    /// Pack the record into its fixed 18-byte file representation.
    ///
    /// The layout is little-endian, with the last 10 bytes zero.
    pub fn pack(&self) -> [u8; coff::IMAGE_SIZEOF_SYMBOL] {
        let mut data = [0; coff::IMAGE_SIZEOF_SYMBOL];
        data.copy_from_slice(bytes_of(&self.raw()));
        data
    }

    /// Write the packed record to `buffer`.
    pub fn write(&self, buffer: &mut dyn WritableBuffer) {
        buffer.write(&self.raw());
    }
}

/// Compute the checksum for a section definition record.
///
/// This is the CRC-32 used elsewhere in PE, except that the final bit
/// complement is omitted. Linkers compare the value when folding
/// [`ComdatType::ExactMatch`] sections.
pub fn section_checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    !hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_definition_layout() {
        let aux = AuxSectionDefinition {
            length: 0x100,
            number_of_relocations: 2,
            number_of_linenumbers: 0,
            checksum: 0,
            number: 3,
            selection: ComdatType::Any,
        };
        assert_eq!(
            aux.pack(),
            [
                0x00, 0x01, 0x00, 0x00, // length
                0x02, 0x00, // number_of_relocations
                0x00, 0x00, // number_of_linenumbers
                0x00, 0x00, 0x00, 0x00, // checksum
                0x03, 0x00, // number
                0x02, // selection
                0x00, 0x00, 0x00, // reserved
            ]
        );
    }

    #[test]
    fn section_definition_reserved_is_zero() {
        let aux = AuxSectionDefinition {
            length: u32::MAX,
            number_of_relocations: u16::MAX,
            number_of_linenumbers: u16::MAX,
            checksum: u32::MAX,
            number: u16::MAX,
            selection: ComdatType::Newest,
        };
        let packed = aux.pack();
        assert_eq!(packed.len(), 18);
        assert_eq!(&packed[15..], &[0, 0, 0]);
    }

    #[test]
    fn weak_external_layout() {
        let aux = AuxWeakExternal {
            tag_index: 5,
            characteristics: WeakExternalSearch::NoLibrary,
        };
        let mut expected = [0; 18];
        expected[0] = 0x05;
        expected[4] = 0x01;
        assert_eq!(aux.pack(), expected);
    }

    #[test]
    fn write_matches_pack() {
        let section = AuxSectionDefinition {
            length: 64,
            number_of_relocations: 1,
            number_of_linenumbers: 0,
            checksum: section_checksum(&[0; 64]),
            number: 1,
            selection: ComdatType::ExactMatch,
        };
        let weak = AuxWeakExternal {
            tag_index: 9,
            characteristics: WeakExternalSearch::Alias,
        };
        let mut buffer = alloc::vec::Vec::new();
        section.write(&mut buffer);
        weak.write(&mut buffer);
        assert_eq!(&buffer[..18], &section.pack()[..]);
        assert_eq!(&buffer[18..], &weak.pack()[..]);
    }

    #[test]
    fn comdat_values() {
        let types = [
            (ComdatType::NoDuplicates, coff::IMAGE_COMDAT_SELECT_NODUPLICATES),
            (ComdatType::Any, coff::IMAGE_COMDAT_SELECT_ANY),
            (ComdatType::SameSize, coff::IMAGE_COMDAT_SELECT_SAME_SIZE),
            (ComdatType::ExactMatch, coff::IMAGE_COMDAT_SELECT_EXACT_MATCH),
            (ComdatType::Associative, coff::IMAGE_COMDAT_SELECT_ASSOCIATIVE),
            (ComdatType::Largest, coff::IMAGE_COMDAT_SELECT_LARGEST),
            (ComdatType::Newest, coff::IMAGE_COMDAT_SELECT_NEWEST),
        ];
        for &(comdat, value) in types.iter() {
            assert_eq!(comdat as u8, value);
            assert_eq!(ComdatType::parse(value), Ok(comdat));
        }
        assert!(matches!(
            ComdatType::parse(0),
            Err(Error::InvalidField { name: "selection", .. })
        ));
        assert!(ComdatType::parse(8).is_err());
    }

    #[test]
    fn weak_external_search_values() {
        let types = [
            (
                WeakExternalSearch::NoLibrary,
                coff::IMAGE_WEAK_EXTERN_SEARCH_NOLIBRARY,
            ),
            (
                WeakExternalSearch::Library,
                coff::IMAGE_WEAK_EXTERN_SEARCH_LIBRARY,
            ),
            (
                WeakExternalSearch::Alias,
                coff::IMAGE_WEAK_EXTERN_SEARCH_ALIAS,
            ),
            (
                WeakExternalSearch::AntiDependency,
                coff::IMAGE_WEAK_EXTERN_ANTI_DEPENDENCY,
            ),
        ];
        for &(search, value) in types.iter() {
            assert_eq!(search as u32, value);
            assert_eq!(WeakExternalSearch::parse(value), Ok(search));
        }
        assert!(WeakExternalSearch::parse(0).is_err());
        assert!(WeakExternalSearch::parse(5).is_err());
    }

    #[test]
    fn checksum_values() {
        // Check values for the CRC-32 variant without the final complement.
        assert_eq!(section_checksum(b""), 0xffff_ffff);
        assert_eq!(section_checksum(b"123456789"), 0x340b_c6d9);
    }
}
