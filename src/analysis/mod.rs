pub mod difference;
pub mod mask;
pub mod recompress;

pub use self::difference::difference;
pub use self::mask::mask;
pub use self::recompress::recompress;
