/// Straight-alpha RGBA color, 8 bits per channel.
///
/// Frames store exactly these bytes, so there is no premultiplication
/// anywhere in the pipeline; solid fills overwrite, they do not blend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(33, 150, 243);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    ///
    /// Returns `None` for anything that is not 6 or 8 hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !(digits.len() == 6 || digits.len() == 8)
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }
        // Validated above, so the pair conversions never fail.
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).expect("validated hex digits")
        };
        let a = if digits.len() == 8 { channel(6) } else { 255 };
        Some(Self::new(channel(0), channel(2), channel(4), a))
    }

    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Channel-wise linear interpolation.
    pub fn lerp(self, rhs: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::new(
            mix(self.r, rhs.r),
            mix(self.g, rhs.g),
            mix(self.b, rhs.b),
            mix(self.a, rhs.a),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_6digit() {
        assert_eq!(Color::from_hex("#2196f3"), Some(Color::BLUE));
    }

    #[test]
    fn hex_8digit_and_bare() {
        assert_eq!(
            Color::from_hex("ff000080"),
            Some(Color::new(255, 0, 0, 128))
        );
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert_eq!(Color::from_hex("#xyzxyz"), None);
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex(""), None);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
    }
}
