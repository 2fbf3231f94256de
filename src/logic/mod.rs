pub mod dataset;
pub mod drift;
pub mod missing;
pub mod incident;
pub mod report;
pub mod model;
