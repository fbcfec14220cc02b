mod order;
mod profile;
mod utils;

pub use order::ColorOrder;
pub use profile::{ColorProfile, compute_color, pyralis_color};
use smart_leds::RGB8;
pub use utils::{BLACK, rgb_from_u32};

pub type Rgb = RGB8;
