pub mod attendance_mode;

pub use attendance_mode::AttendanceMode;
