pub mod mood;
pub mod server;

pub use mood::{ConfigError, DecodePolicy, MoodSettings, ProcessEnv, SettingsSource};
pub use server::{parse_listen_addr, upstream_timeout, upstream_timeout_from};
