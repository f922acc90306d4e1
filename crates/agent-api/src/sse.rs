/// Incremental parser for a server-sent-events byte stream.
///
/// Accumulates chunks as they arrive and yields the joined `data:` payload of
/// each complete event (events end at a blank line). Comment lines and fields
/// other than `data` are dropped, which is all the agent stream uses.
#[derive(Debug, Default)]
pub(crate) struct SseBuffer {
    buf: String,
}

impl SseBuffer {
    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.buf.push_str(&String::from_utf8_lossy(bytes).replace("\r\n", "\n"));
    }

    /// Next complete event's data payload, if one is fully buffered.
    /// Events without any `data:` line are skipped.
    pub(crate) fn next_event(&mut self) -> Option<String> {
        while let Some(end) = self.buf.find("\n\n") {
            let raw: String = self.buf.drain(..end + 2).collect();
            if let Some(data) = parse_event(&raw) {
                return Some(data);
            }
        }
        None
    }

    /// Data of a final event not terminated by a blank line, once the
    /// underlying stream has ended.
    pub(crate) fn flush(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.buf);
        parse_event(&raw)
    }
}

fn parse_event(raw: &str) -> Option<String> {
    let mut data_lines = Vec::new();
    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}
