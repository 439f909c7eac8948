// Copyright (c) 2026 Recfuzz
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Decoded record type with capacity-checked text fields.
//!
//! Capacities include one reserved terminator byte, so a field with capacity
//! `N` stores at most `N - 1` payload bytes.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::core::parser::ParseError;

/// Name field capacity in bytes.
pub const NAME_CAPACITY: usize = 64;
/// Description field capacity in bytes.
pub const DESCRIPTION_CAPACITY: usize = 256;

/// Which text field a length prefix belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// `name`
    Name,
    /// `description`
    Description,
}

impl Field {
    /// Declared capacity of the field.
    pub const fn capacity(self) -> usize {
        match self {
            Field::Name => NAME_CAPACITY,
            Field::Description => DESCRIPTION_CAPACITY,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Description => f.write_str("description"),
        }
    }
}

/// Ties a [`BoundedText`] instantiation to the field it stores.
pub trait FieldKind {
    /// The field this kind stands for.
    const FIELD: Field;
}

/// Marker for the `name` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NameField;

impl FieldKind for NameField {
    const FIELD: Field = Field::Name;
}

/// Marker for the `description` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DescriptionField;

impl FieldKind for DescriptionField {
    const FIELD: Field = Field::Description;
}

/// Owned text bounded by its field's capacity. Payload bytes are kept verbatim.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedText<K: FieldKind> {
    bytes: Vec<u8>,
    kind: PhantomData<K>,
}

impl<K: FieldKind> BoundedText<K> {
    /// Capacity of the field, terminator byte included.
    pub const CAPACITY: usize = K::FIELD.capacity();

    /// Copy `bytes` into a new field, refusing anything that does not fit
    /// below the capacity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() >= Self::CAPACITY {
            return Err(ParseError::FieldTooLarge {
                field: K::FIELD,
                len: bytes.len(),
                capacity: Self::CAPACITY,
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
            kind: PhantomData,
        })
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload rendered as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl<K: FieldKind> fmt::Debug for BoundedText<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

/// Name field type.
pub type Name = BoundedText<NameField>;
/// Description field type.
pub type Description = BoundedText<DescriptionField>;

/// One decoded record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    /// Record name.
    pub name: Name,
    /// Signed value (little-endian on the wire).
    pub value: i32,
    /// Free-form description.
    pub description: Description,
}

impl Record {
    /// Build a record, applying the same capacity checks as the decoder.
    pub fn new(
        name: impl AsRef<[u8]>,
        value: i32,
        description: impl AsRef<[u8]>,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            name: Name::from_bytes(name.as_ref())?,
            value,
            description: Description::from_bytes(description.as_ref())?,
        })
    }

    /// Number of bytes this record occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        1 + self.name.len() + 4 + 1 + self.description.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_at_capacity() {
        let err = Name::from_bytes(&[b'x'; NAME_CAPACITY]).unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldTooLarge {
                field: Field::Name,
                len: NAME_CAPACITY,
                capacity: NAME_CAPACITY
            }
        );
        assert!(Name::from_bytes(&[b'x'; NAME_CAPACITY - 1]).is_ok());
    }

    #[test]
    fn capacity_and_field_come_from_kind() {
        assert_eq!(Name::CAPACITY, NAME_CAPACITY);
        assert_eq!(Description::CAPACITY, DESCRIPTION_CAPACITY);

        let err = Description::from_bytes(&[0u8; 300]).unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldTooLarge {
                field: Field::Description,
                len: 300,
                capacity: DESCRIPTION_CAPACITY
            }
        );
        let err = Name::from_bytes(&[0u8; 70]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::FieldTooLarge { field: Field::Name, capacity: NAME_CAPACITY, .. }
        ));
    }

    #[test]
    fn lossy_rendering_keeps_raw_bytes() {
        let n = Name::from_bytes(&[b'o', 0xC3, b'k']).unwrap();
        assert_eq!(n.as_bytes(), &[b'o', 0xC3, b'k']);
        assert_eq!(n.to_string_lossy(), "o\u{FFFD}k");
    }

    #[test]
    fn encoded_len_counts_prefixes_and_value() {
        let r = Record::new("abc", 1, "").unwrap();
        assert_eq!(r.encoded_len(), 9);
        assert_eq!(Record::default().encoded_len(), 6);
    }
}
