pub mod cp_pool;
pub mod ioc;
