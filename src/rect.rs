use crate::units::*;

/// The box text is laid out in: an origin (the top-left corner) plus a width
/// and a height, all in device units.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the top-left corner.
    pub x: Px,
    /// The y-coordinate of the top-left corner.
    pub y: Px,
    pub width: Px,
    pub height: Px,
}

impl Rect {
    pub fn new(x: Px, y: Px, width: Px, height: Px) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box as fractions of an image's dimensions, i.e. a box starting
    /// 10% in from the left and 60% down from the top, spanning 80% of the width
    /// and 20% of the height would be `from_fractions(w, h, 0.1, 0.6, 0.8, 0.2)`.
    /// Every component is floored to a whole pixel.
    pub fn from_fractions(
        image_width: u32,
        image_height: u32,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    ) -> Rect {
        let w = Px::from(image_width);
        let h = Px::from(image_height);
        Rect {
            x: (w * left).floor(),
            y: (h * top).floor(),
            width: (w * width).floor(),
            height: (h * height).floor(),
        }
    }
}
