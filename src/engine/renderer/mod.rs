// Software rendering: surfaces, region blits and tinted/rotated compositing

mod surface;

pub use surface::{DrawFlags, Surface};
