//! Flat CSV rendering of exported resources.

use crate::models::Resource;

const HEADER: [&str; 13] = [
    "id",
    "title",
    "url",
    "category",
    "language",
    "source",
    "quality_score",
    "recommendation",
    "description",
    "stars",
    "programming_language",
    "updated_at",
    "keyword",
];

/// Quote a field when it contains a delimiter, quote or line break.
fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render resources as CSV with a header row.
pub fn render_csv(resources: &[&Resource]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');

    for r in resources {
        let fields = [
            r.id.clone(),
            r.title.clone(),
            r.url.clone(),
            r.category.to_string(),
            r.language.to_string(),
            r.source.to_string(),
            r.quality_score.to_string(),
            r.recommendation.clone(),
            r.description.clone(),
            r.stars.map(|s| s.to_string()).unwrap_or_default(),
            r.programming_language.clone().unwrap_or_default(),
            r.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            r.keyword.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Language, Source};

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_render_csv_rows() {
        let resource = Resource {
            id: "abc".to_string(),
            title: "CUDA, explained".to_string(),
            url: "https://example.com/cuda".to_string(),
            description: String::new(),
            source: Source::GitHub,
            keyword: "cuda".to_string(),
            category: Category::Code,
            quality_score: 4,
            recommendation: "Practical code examples.".to_string(),
            dedup_key: "https://example.com/cuda".to_string(),
            language: Language::En,
            stars: Some(12),
            programming_language: None,
            updated_at: None,
        };

        let csv = render_csv(&[&resource]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,title,url,category"));
        assert_eq!(
            lines[1],
            "abc,\"CUDA, explained\",https://example.com/cuda,code,en,GitHub,4,Practical code examples.,,12,,,cuda"
        );
    }

    #[test]
    fn test_render_csv_empty() {
        assert_eq!(render_csv(&[]).lines().count(), 1);
    }
}
