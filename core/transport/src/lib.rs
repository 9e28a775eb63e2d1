pub mod framerate;
pub mod timeline;
