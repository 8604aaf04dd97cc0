//! Storage - 临时文件存储适配器

mod temp_audio;

pub use temp_audio::FsAudioStore;
