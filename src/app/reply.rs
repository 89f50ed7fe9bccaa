pub struct SearchReply {
    messages: Vec<String>,
}

impl SearchReply {
    pub fn new() -> Self {
        SearchReply {
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, msg: String) {
        if !msg.is_empty() {
            self.messages.push(msg);
        }
    }

    pub fn add_boxed(&mut self, msg: String) {
        let width = msg.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rule = "-".repeat(width);
        self.messages.push(format!("{}\n{}\n{}", rule, msg, rule));
    }

    pub fn to_string(&self) -> String {
        self.messages.join("\n")
    }
}

impl Default for SearchReply {
    fn default() -> Self {
        Self::new()
    }
}
