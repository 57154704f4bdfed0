pub mod analysis;
pub mod company;

pub use analysis::AnalysisResult;
pub use company::Company;
