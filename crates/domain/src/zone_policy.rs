/// Which zones this tool is allowed to create or remove.
///
/// A zone listed in `protect` is never eligible. Otherwise a zone is eligible
/// only when it ends with one of the `require` suffixes, so an empty `require`
/// list makes every zone ineligible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZonePolicy {
    pub protect: Vec<String>,
    pub require: Vec<String>,
}

impl ZonePolicy {
    pub fn new(protect: Vec<String>, require: Vec<String>) -> Self {
        Self { protect, require }
    }

    pub fn is_protected(&self, zone: &str) -> bool {
        self.protect.iter().any(|p| p == zone)
    }

    /// Returns the first `require` suffix `zone` ends with.
    pub fn matching_suffix(&self, zone: &str) -> Option<&str> {
        self.require
            .iter()
            .map(String::as_str)
            .find(|suffix| zone.ends_with(suffix))
    }

    pub fn allows(&self, zone: &str) -> bool {
        !self.is_protected(zone) && self.matching_suffix(zone).is_some()
    }
}
