pub mod accounts;
pub mod generate;
pub mod paths;
