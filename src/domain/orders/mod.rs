pub mod company_group;
pub mod parser;
pub mod types;

pub use company_group::{CompanyGroup, group_by_company};
pub use parser::{ParseSummary, parse_all, parse_all_with_summary, parse_line};
pub use types::{OrderRecord, OrderType, TIMESTAMP_FORMAT};
