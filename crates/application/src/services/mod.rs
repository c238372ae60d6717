mod bounded_poll;
mod dns_query_helper;
mod dynamic_update_client;
mod zone_control_client;

pub use bounded_poll::{BoundedPoll, PollState};
pub use dns_query_helper::DnsQueryHelper;
pub use dynamic_update_client::DynamicUpdateClient;
pub use zone_control_client::{ZoneControlClient, INVALID_ZONE_MESSAGE, ZONE_FILE_MESSAGE};
