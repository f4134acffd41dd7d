use std::sync::LazyLock;

use regex::Regex;

// Contains something, an @, something, a dot, something. Deliberately loose.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email shape pattern is valid"));

#[derive(Debug)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<ContactEmail, String> {
        if EMAIL_SHAPE.is_match(s.trim()) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid contact email.", s))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
