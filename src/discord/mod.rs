mod bot;
pub mod commands;
pub mod image_gen;
mod locks;
mod theme;
mod webhook_log;

pub use bot::{Data, create_framework};
pub use image_gen::ImageGenerator;
pub use locks::UserLocks;
pub use webhook_log::WebhookLogger;
