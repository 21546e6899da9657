//! Simple case mappings for characters and code units.

/// Implementation of `char::to_lowercase()` and `char::to_uppercase()` that
/// support conversion of 'ß' (lower Eszett) into 'ẞ' (upper Eszett) and vice
/// versa.
///
/// The mapping only ever returns a single character. Characters whose full
/// mapping expands into several characters (such as 'İ' or 'ŉ') are returned
/// unchanged.
pub trait CharCaseMapper {
    fn to_lowercase_ignore_special(&self) -> Self;
    fn to_uppercase_ignore_special(&self) -> Self;
}

impl CharCaseMapper for char {
    fn to_lowercase_ignore_special(&self) -> Self {
        match *self {
            'ẞ' => 'ß',
            ch => single_char(ch.to_lowercase()).unwrap_or(ch),
        }
    }

    fn to_uppercase_ignore_special(&self) -> Self {
        match *self {
            'ß' => 'ẞ',
            ch => single_char(ch.to_uppercase()).unwrap_or(ch),
        }
    }
}

#[inline]
fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    mapping.next().is_none().then_some(first)
}

/// Case mapping of a single code unit, without looking at its neighbors.
///
/// Bytes are mapped as Latin-1 characters, UTF-16 code units as Basic
/// Multilingual Plane characters. A unit whose mapping falls outside of the
/// unit's range, and every surrogate, maps to itself. Mapping never changes
/// the number of units, which keeps case-insensitive comparison and search
/// position-preserving.
pub trait CodeUnitCase: Copy + Eq + Ord {
    fn to_lower_unit(self) -> Self;
    fn to_upper_unit(self) -> Self;

    /// The representative compared by case-insensitive operations.
    #[inline]
    fn fold_case(self) -> Self {
        self.to_lower_unit()
    }
}

impl CodeUnitCase for u8 {
    #[inline]
    fn to_lower_unit(self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_lowercase();
        }
        u8::try_from(char::from(self).to_lowercase_ignore_special()).unwrap_or(self)
    }

    #[inline]
    fn to_upper_unit(self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_uppercase();
        }
        u8::try_from(char::from(self).to_uppercase_ignore_special()).unwrap_or(self)
    }
}

impl CodeUnitCase for u16 {
    #[inline]
    fn to_lower_unit(self) -> Self {
        map_bmp_unit(self, CharCaseMapper::to_lowercase_ignore_special)
    }

    #[inline]
    fn to_upper_unit(self) -> Self {
        map_bmp_unit(self, CharCaseMapper::to_uppercase_ignore_special)
    }
}

#[inline]
fn map_bmp_unit(unit: u16, map: impl FnOnce(&char) -> char) -> u16 {
    match char::from_u32(u32::from(unit)) {
        Some(ch) => u16::try_from(u32::from(map(&ch))).unwrap_or(unit),
        None => unit,
    }
}

/// Maps UTF-16 text to lower case, character by character. Unpaired
/// surrogates are kept as they are.
pub fn utf16_to_lowercase<E: Extend<u16>>(input: &[u16], target: &mut E) {
    map_utf16(input, target, CharCaseMapper::to_lowercase_ignore_special)
}

/// Maps UTF-16 text to upper case, character by character. Unpaired
/// surrogates are kept as they are.
pub fn utf16_to_uppercase<E: Extend<u16>>(input: &[u16], target: &mut E) {
    map_utf16(input, target, CharCaseMapper::to_uppercase_ignore_special)
}

fn map_utf16<E: Extend<u16>>(input: &[u16], target: &mut E, map: fn(&char) -> char) {
    let mut dst = [0u16; 2];
    for ch in std::char::decode_utf16(input.iter().copied()) {
        match ch {
            Ok(ch) => target.extend(map(&ch).encode_utf16(&mut dst).iter().copied()),
            Err(e) => target.extend([e.unpaired_surrogate()]),
        }
    }
}
