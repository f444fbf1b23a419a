mod brawler_catalog;

pub use brawler_catalog::{BrawlerCatalog, start_polling};
