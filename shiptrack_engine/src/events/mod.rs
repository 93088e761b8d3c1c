mod channel;
mod dispatcher;

pub use channel::{ChannelClosed, EventHandler, EventProducer, Handler};
pub use dispatcher::ChannelDispatcher;
