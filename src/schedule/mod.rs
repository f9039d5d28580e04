mod freeform;
pub mod models;
mod tabular;
mod view;
pub mod week;

pub use freeform::{parse_freeform_schedule, parse_header};
pub use models::{
    DayKey, DaySchedule, NurseHeader, ParseIssue, RenderRow, RowKind, ScheduleRecord,
    ShiftEntry, ShiftPeriod, ShiftStyle, Ward, WeekBucket,
};
pub use tabular::{parse_full_schedule, parse_tabular_schedule};
pub use view::{DayOrder, ScheduleView, ViewOptions, WeekFilter};
pub use week::{classify_date, classify_week, week_bounds};
