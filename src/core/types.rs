//! Core type aliases and re-exports

pub use glam::{
    Vec2, Vec3, Vec4,
    Mat3, Mat4,
    Quat,
};

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Linear RGB colour.
pub type Color = [f32; 3];

/// Parse a `#rrggbb` (or `rrggbb`) hex string into a linear-ish RGB triple.
///
/// Returns `None` for anything that is not exactly six hex digits.
pub fn color_from_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some([
        ((value >> 16) & 0xFF) as f32 / 255.0,
        ((value >> 8) & 0xFF) as f32 / 255.0,
        (value & 0xFF) as f32 / 255.0,
    ])
}

/// Build a colour from a packed `0xRRGGBB` constant.
pub const fn rgb(value: u32) -> Color {
    [
        ((value >> 16) & 0xFF) as f32 / 255.0,
        ((value >> 8) & 0xFF) as f32 / 255.0,
        (value & 0xFF) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = color_from_hex("#ff8000").unwrap();
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(color_from_hex("ff8000"), Some(c));
    }

    #[test]
    fn test_color_from_hex_rejects_garbage() {
        assert!(color_from_hex("#fff").is_none());
        assert!(color_from_hex("#zzzzzz").is_none());
        assert!(color_from_hex("").is_none());
    }

    #[test]
    fn test_rgb_matches_hex() {
        assert_eq!(rgb(0x336699), color_from_hex("#336699").unwrap());
    }
}
