pub mod format;
pub mod nav;
pub mod storage;
