/// Banner text that scrolls one character per step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleMarquee {
    text: String,
}

impl TitleMarquee {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Move the first character to the end
    pub fn step(&mut self) {
        let mut chars = self.text.chars();
        if let Some(first) = chars.next() {
            let mut rotated: String = chars.collect();
            rotated.push(first);
            self.text = rotated;
        }
    }
}
