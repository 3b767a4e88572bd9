pub mod composer;
pub mod repository;
pub mod reveal;
pub mod service;
pub mod wall;
