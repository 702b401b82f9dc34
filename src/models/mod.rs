pub mod chore;
pub mod completion;
pub mod member;
pub mod one_time_task;
pub mod plant;
pub mod priority;
pub mod rotation_order;
pub mod task_type;
pub mod wire;
