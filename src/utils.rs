use gpui::{point, px, Pixels, Point};

pub mod date_formatter;

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

/// Window position relative to `origin`, in plain pixels.
pub fn local_position(position: Point<Pixels>, origin: Point<Pixels>) -> (f32, f32) {
    ((position.x - origin.x).as_f32(), (position.y - origin.y).as_f32())
}

/// Offsets `origin` by a point given in plain pixels.
pub fn offset(origin: Point<Pixels>, x: f32, y: f32) -> Point<Pixels> {
    origin + point(px(x), px(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_position_roundtrip() {
        let origin = point(px(12.0), px(30.0));
        let p = offset(origin, 5.0, -4.0);
        assert_eq!(local_position(p, origin), (5.0, -4.0));
    }
}
