use crate::record_type::RecordType;

/// One line of `+noall +answer` lookup output.
///
/// `host.example.com. 86400 IN A 192.0.2.10`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub name: String,
    pub ttl: u32,
    pub record_type: String,
    pub data: String,
}

impl AnswerRecord {
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let name = fields.next()?;
        let ttl = fields.next()?.parse().ok()?;
        let _class = fields.next()?;
        let record_type = fields.next()?;
        let data: Vec<&str> = fields.collect();
        if data.is_empty() {
            return None;
        }

        Some(Self {
            name: name.trim_end_matches('.').to_string(),
            ttl,
            record_type: record_type.to_uppercase(),
            data: data.join(" ").trim_end_matches('.').to_string(),
        })
    }

    pub fn is(&self, record_type: RecordType) -> bool {
        self.record_type == record_type.as_str()
    }
}

/// Keeps answer lines: drops comments and blank lines.
pub fn answer_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.starts_with(';'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
