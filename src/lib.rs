pub mod accounts;
pub mod bank;
pub mod clients;
pub mod commands;
pub mod dispenser;
pub mod repository;
