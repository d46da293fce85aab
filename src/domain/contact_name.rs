#[derive(Debug, Clone)]
pub struct ContactName(String);

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ContactName {
    pub fn parse(name: impl ToString) -> Result<Self, String> {
        let name = name.to_string();
        if name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        Ok(Self(name.trim().to_string()))
    }

    /// First whitespace-delimited token of the name.
    pub fn first_name(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or_default()
    }

    /// Every token after the first, joined by single spaces. Empty for one-word names.
    pub fn last_name(&self) -> String {
        self.0.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
    }
}
