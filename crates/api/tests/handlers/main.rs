#[path = "../test_utils.rs"]
mod test_utils;

mod groups_test;
mod health_test;
mod lessons_test;
mod middleware_test;
mod schedules_test;
mod students_test;
mod time_slots_test;
