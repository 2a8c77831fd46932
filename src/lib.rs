mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// Fitting text into a box and breaking it into lines
pub mod layout;

mod rect;
pub use rect::*;

mod units;
pub use units::*;

/// Re-export of the image crate, for building and saving [PixmapCanvas]es
pub use image;
