pub mod icons;
pub mod markdown;
pub mod storage;
pub mod theme;
pub mod time_utils;
