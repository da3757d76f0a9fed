//! Background Adapter - 背景音乐来源

mod file_background;

pub use file_background::FileBackgroundTrack;
