pub mod academic;
pub mod allotment;
pub mod attendance;
pub mod calendar;
pub mod complaint;
pub mod enrollment;
pub mod grade;
pub mod hostel;
pub mod settings;
pub mod student;
pub mod willingness;
