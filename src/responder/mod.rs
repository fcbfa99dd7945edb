mod selector;

pub use selector::{Reply, ReplySource, ResponseSelector};
