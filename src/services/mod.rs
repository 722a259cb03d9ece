pub mod shortener;

pub use shortener::{ShortLink, Shortener};
