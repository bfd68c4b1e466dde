pub mod archive_transport;
pub mod audio_device;
pub mod clock;
pub mod durable_store;
pub mod haptic_device;
pub mod sensor_source;
pub mod session_delegate;
