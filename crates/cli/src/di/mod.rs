mod clients;

pub use clients::{dns_query_helper, dynamic_update_client, zone_control_client};
