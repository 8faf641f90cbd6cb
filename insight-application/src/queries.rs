pub mod dashboard_queries;
pub mod device_queries;
