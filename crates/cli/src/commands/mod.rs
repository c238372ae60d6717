mod hosts;
mod zones;

pub use hosts::{host_add, host_delete, host_list, host_query, zone_search};
pub use zones::{status, zone_list, zone_modify, zone_status, ZoneChange};
