mod academic_test;
mod allotment_test;
mod config_test;
mod enrollment_test;
mod grade_test;
mod hostel_test;
mod middleware_test;
mod routes_test;
mod settings_test;
mod student_test;
