//! Layout exports: delimited guest rows, a vector floor plan and the
//! paginated setup report.

pub mod report;
pub mod rows;
pub mod vector;

pub use report::{build_report, Report, ReportBlock, ReportInput, ReportOptions, ReportPage};
pub use rows::{guest_rows, write_rows, GuestRow, ROW_HEADER};
pub use vector::{path_data, vector_drawing, VectorDrawing, VectorShape};
