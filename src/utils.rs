pub mod version {
    use openxr_sys::Version;

    /// Render a packed OpenXR version as `major.minor`
    ///
    /// This is the form the report uses for graphics-API bounds
    pub fn short(version: Version) -> String {
        format!("{}.{}", version.major(), version.minor())
    }

    /// Render a packed OpenXR version as `major.minor.patch`
    pub fn full(version: Version) -> String {
        format!(
            "{}.{}.{}",
            version.major(),
            version.minor(),
            version.patch()
        )
    }
}

pub mod strings {
    use std::os::raw::c_char;

    /// Read a NUL-terminated string out of a fixed-size field
    ///
    /// Never reads past the field even if the terminator is missing
    pub fn from_fixed(field: &[c_char]) -> String {
        let len = field
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(field.len());

        let bytes: Vec<u8> = field[..len].iter().map(|&c| c as u8).collect();

        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Copy `src` into a fixed-size NUL-terminated field
    ///
    /// Bytes past `field.len() - 1` are dropped so the terminator always
    /// fits. Truncation happens at a byte boundary
    pub fn to_fixed(field: &mut [c_char], src: &str) {
        let len = src.len().min(field.len().saturating_sub(1));

        for (dst, byte) in field.iter_mut().zip(src.as_bytes()[..len].iter()) {
            *dst = *byte as c_char;
        }

        field[len] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{strings, version};

    use openxr_sys::Version;

    use std::os::raw::c_char;

    #[test]
    fn short_version_format() {
        assert_eq!(version::short(Version::new(1, 0, 0)), "1.0");
        assert_eq!(version::short(Version::new(4, 6, 13)), "4.6");
    }

    #[test]
    fn version_format_is_idempotent() {
        let v = Version::new(4, 1, 0);

        assert_eq!(version::short(v), version::short(v));
        assert_eq!(version::full(v), version::full(v));
    }

    #[test]
    fn fixed_field_round_trip() {
        let mut field = [0 as c_char; 16];

        strings::to_fixed(&mut field, "xrinfo");

        assert_eq!(field[6], 0);
        assert_eq!(strings::from_fixed(&field), "xrinfo");
    }

    #[test]
    fn overlong_name_is_truncated() {
        let mut field = [0x7f as c_char; 8];

        strings::to_fixed(&mut field, "a-very-long-application-name");

        assert_eq!(field[7], 0);
        assert_eq!(strings::from_fixed(&field), "a-very-");
    }

    #[test]
    fn unterminated_field_is_bounded() {
        let field = [0x41 as c_char; 4];

        assert_eq!(strings::from_fixed(&field), "AAAA");
    }
}
