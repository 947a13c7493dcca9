mod dispatcher;

pub use dispatcher::DispatchScheduler;
