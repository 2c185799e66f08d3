pub mod audit;
pub mod enrich;
pub mod import;
pub mod push;
pub mod status;
pub mod volume;
