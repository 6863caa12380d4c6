#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedItem {
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub saved_at: i64,
    pub tags: Vec<String>,
}
