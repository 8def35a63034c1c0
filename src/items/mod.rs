mod source;
mod traits;
mod window;

pub use source::WindowSource;
pub use traits::{DisplayItem, Executable, IconProvider};
pub use window::{WindowAction, WindowItem};
