pub mod schedule;

pub use schedule::ScheduleRepository;
