pub mod formatter;
pub mod report;

pub use formatter::{
    format_course_detail, format_questions, format_score, format_scored_table, format_tier_groups,
    format_tsv, should_use_colors,
};
pub use report::RecommendationReport;
