pub mod attendance_pie;
pub mod monthly_bar_chart;
pub mod overview_card;

pub use attendance_pie::AttendancePie;
pub use monthly_bar_chart::{BarSpec, MonthlyBarChart};
pub use overview_card::OverviewCard;
