use std::fmt;

use thiserror::Error;

/// Bases stored per packed byte.
const BASES_PER_BYTE: usize = 4;

/// Pattern symbol standing for an ambiguous base. Only `FmIndex::mms`
/// understands it; every other query rejects it.
pub const WILDCARD: u8 = 5;

/// Errors that can occur while encoding nucleotide sequences.
#[derive(Debug, Error)]
pub enum SequenceError {
    /// Encountered a character that cannot be represented in the 2-bit
    /// alphabet.
    #[error("unsupported nucleotide '{0}' at position {1}")]
    UnsupportedBase(char, usize),
}

/// One of the four canonical DNA bases, in 2-bit code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine/Uracil.
    T = 3,
}

impl Base {
    /// All four bases in code order.
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// Attempt to parse an ASCII base.
    pub fn from_ascii(base: u8) -> Option<Self> {
        match base {
            b'A' | b'a' => Some(Base::A),
            b'C' | b'c' => Some(Base::C),
            b'G' | b'g' => Some(Base::G),
            b'T' | b't' | b'U' | b'u' => Some(Base::T),
            _ => None,
        }
    }

    /// Reconstruct a base from its 2-bit code.
    #[inline]
    pub fn from_code(code: u8) -> Self {
        match code & 3 {
            0 => Base::A,
            1 => Base::C,
            2 => Base::G,
            _ => Base::T,
        }
    }

    /// The 2-bit code of this base.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Uppercase ASCII representation.
    #[inline]
    pub fn to_ascii(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
        }
    }
}

/// DNA sequence packed at 2 bits per base, four bases per byte.
///
/// Base `i` occupies the bits `2*(3 - i%4)..2*(4 - i%4)` of byte `i/4`,
/// i.e. the first base of each byte sits in the two highest bits. The
/// backing buffer always keeps one spare zero byte past the last base, so
/// reading the slot at `len()` — where the suffix sorter places its
/// virtual sentinel — is in bounds and yields code 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedDna {
    data: Vec<u8>,
    len: usize,
}

impl PackedDna {
    /// An empty sequence.
    pub fn new() -> Self {
        Self {
            data: vec![0],
            len: 0,
        }
    }

    /// Pack an ASCII sequence. Only A, C, G, T (and U, mapped to T) in
    /// either case are accepted.
    pub fn from_ascii(sequence: &[u8]) -> Result<Self, SequenceError> {
        let mut packed = Self::with_capacity(sequence.len());
        for (idx, &ch) in sequence.iter().enumerate() {
            let base = Base::from_ascii(ch)
                .ok_or(SequenceError::UnsupportedBase(ch as char, idx))?;
            packed.push(base);
        }
        Ok(packed)
    }

    /// An empty sequence with room for `len` bases.
    pub fn with_capacity(len: usize) -> Self {
        let mut data = Vec::with_capacity(len / BASES_PER_BYTE + 1);
        data.push(0);
        Self { data, len: 0 }
    }

    /// Number of bases in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the sequence holds no bases.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Access the packed bytes (four bases each, highest bits first).
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// The 2-bit code at `idx`.
    ///
    /// `idx` may equal `len()`: that slot is the zero pad the suffix
    /// sorter reads as the virtual sentinel.
    #[inline]
    pub fn code(&self, idx: usize) -> u8 {
        debug_assert!(idx <= self.len);
        (self.data[idx >> 2] >> (2 * (3 - (idx & 3)))) & 3
    }

    /// The base at `idx`, if in bounds.
    pub fn base_at(&self, idx: usize) -> Option<Base> {
        if idx >= self.len {
            return None;
        }
        Some(Base::from_code(self.code(idx)))
    }

    /// Append a base.
    pub fn push(&mut self, base: Base) {
        self.push_code(base.code());
    }

    /// Append a raw 2-bit code.
    pub fn push_code(&mut self, code: u8) {
        let idx = self.len;
        let shift = 2 * (3 - (idx & 3));
        self.data[idx >> 2] |= (code & 3) << shift;
        self.len += 1;
        // Keep the spare pad byte available.
        if self.len % BASES_PER_BYTE == 0 {
            self.data.push(0);
        }
    }

    /// Decode into a newly allocated vector of uppercase ASCII bases.
    pub fn to_ascii(&self) -> Vec<u8> {
        (0..self.len)
            .map(|idx| Base::from_code(self.code(idx)).to_ascii())
            .collect()
    }

    /// Iterate over the decoded bases.
    pub fn iter(&self) -> impl Iterator<Item = Base> + '_ {
        (0..self.len).map(|idx| Base::from_code(self.code(idx)))
    }
}

impl Default for PackedDna {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PackedDna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in self.iter() {
            write!(f, "{}", base.to_ascii() as char)?;
        }
        Ok(())
    }
}

/// Encode an ASCII pattern into query symbols: A/C/G/T map to their 2-bit
/// codes, IUPAC ambiguity letters map to [`WILDCARD`].
pub fn encode_pattern(pattern: &[u8]) -> Result<Vec<u8>, SequenceError> {
    pattern
        .iter()
        .enumerate()
        .map(|(idx, &ch)| match Base::from_ascii(ch) {
            Some(base) => Ok(base.code()),
            None => match ch.to_ascii_uppercase() {
                b'N' | b'R' | b'Y' | b'S' | b'W' | b'K' | b'M' | b'B' | b'D' | b'H' | b'V' => {
                    Ok(WILDCARD)
                }
                _ => Err(SequenceError::UnsupportedBase(ch as char, idx)),
            },
        })
        .collect()
}
