//! Report section data structures.

pub mod authors;
pub mod months;
pub mod overview;
pub mod timeline;
pub mod years;

pub use authors::AuthorsSection;
pub use months::MonthsSection;
pub use overview::{OverviewSection, RecordRow};
pub use timeline::TimelineSection;
pub use years::YearsSection;

/// Fewest records for which every report statistic is defined.
///
/// The average publication interval divides by `n - 1`.
pub const MIN_RECORDS: usize = 2;
