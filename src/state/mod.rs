pub mod app_settings;
pub mod messages;
pub mod monitor;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;
