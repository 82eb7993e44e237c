// Export components
pub mod availability;
pub mod marketplace;
pub mod repository;

// Re-export the data service
pub use marketplace::DataService;
