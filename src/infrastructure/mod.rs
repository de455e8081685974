pub mod address_bar;
pub mod backends;
pub mod storage;
