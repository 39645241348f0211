pub mod assessment_tool;
pub mod patient;
pub mod report;
pub mod session;
