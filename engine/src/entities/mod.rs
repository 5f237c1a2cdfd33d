pub mod airport;
pub mod pilot;
pub mod scenario;
